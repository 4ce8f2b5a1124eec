//! Page-assigned block model produced by a layout pass and consumed by a backend.

use serde::Serialize;
use tracing::warn;

use crate::layout::engine::{PageGeometry, Placement};
use crate::layout::geometry::PaperSettings;

/// An atomic unit of content. A block lands on exactly one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Title {
        text: String,
    },
    Question {
        ordinal: usize,
        question_text: String,
        options: Vec<String>,
    },
    TableHeaderRow {
        columns: Vec<String>,
    },
    TableDataRow {
        columns: Vec<String>,
    },
}

impl Block {
    /// Short human-readable name used in diagnostics and logs.
    pub fn label(&self) -> String {
        match self {
            Block::Title { .. } => "title".to_string(),
            Block::Question { ordinal, .. } => format!("question {ordinal}"),
            Block::TableHeaderRow { .. } => "answer key header".to_string(),
            Block::TableDataRow { columns } => format!(
                "answer key row {}",
                columns.first().map(String::as_str).unwrap_or("?")
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedBlock {
    pub block: Block,
    pub y: f32,
    pub height: f32,
    pub overflows: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// 1-based.
    pub number: usize,
    /// Decoration drawn at the top margin, above the first block.
    pub caption: Option<String>,
    pub blocks: Vec<PlacedBlock>,
    /// Distance from the top margin to the bottom of the lowest block.
    pub height_used: f32,
}

impl Page {
    fn empty(number: usize) -> Self {
        Self {
            number,
            caption: None,
            blocks: Vec::new(),
            height_used: 0.0,
        }
    }
}

/// Non-fatal findings from a layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A block taller than the page budget was placed anyway and runs past the
    /// bottom margin by `overflow_pt`.
    Overflow {
        page: usize,
        block: String,
        overflow_pt: f32,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub pages: Vec<Page>,
    /// The settings the pages were laid out with. Backends draw with these.
    pub settings: PaperSettings,
    /// First page of the answer key.
    pub answer_key_page: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn blocks(&self) -> impl Iterator<Item = (usize, &PlacedBlock)> {
        self.pages
            .iter()
            .flat_map(|page| page.blocks.iter().map(move |b| (page.number, b)))
    }

    pub fn block_count(&self) -> usize {
        self.pages.iter().map(|p| p.blocks.len()).sum()
    }
}

/// Collects placements into lazily created pages.
pub struct DocumentBuilder {
    geometry: PageGeometry,
    pages: Vec<Page>,
    diagnostics: Vec<Diagnostic>,
}

impl DocumentBuilder {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn page_mut(&mut self, number: usize) -> &mut Page {
        while self.pages.len() < number {
            let next = self.pages.len() + 1;
            self.pages.push(Page::empty(next));
        }
        &mut self.pages[number - 1]
    }

    pub fn push(&mut self, block: Block, placement: Placement) {
        if placement.overflows {
            let bottom = self.geometry.height_pt - self.geometry.margin_pt;
            let overflow_pt = placement.y + placement.height - bottom;
            warn!(
                page = placement.page,
                block = %block.label(),
                overflow_pt,
                "Block is taller than the page budget; placed without splitting"
            );
            self.diagnostics.push(Diagnostic::Overflow {
                page: placement.page,
                block: block.label(),
                overflow_pt,
            });
        }

        let margin = self.geometry.margin_pt;
        let page = self.page_mut(placement.page);
        page.height_used = page
            .height_used
            .max(placement.y + placement.height - margin);
        page.blocks.push(PlacedBlock {
            block,
            y: placement.y,
            height: placement.height,
            overflows: placement.overflows,
        });
    }

    pub fn set_caption(&mut self, page: usize, caption: impl Into<String>) {
        self.page_mut(page).caption = Some(caption.into());
    }

    pub fn finish(self, settings: PaperSettings, answer_key_page: usize) -> Document {
        Document {
            pages: self.pages,
            settings,
            answer_key_page,
            diagnostics: self.diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> PageGeometry {
        PageGeometry {
            width_pt: 100.0,
            height_pt: 100.0,
            margin_pt: 10.0,
        }
    }

    fn title() -> Block {
        Block::Title {
            text: "T".to_string(),
        }
    }

    #[test]
    fn test_pages_are_created_lazily_up_to_placement() {
        let mut builder = DocumentBuilder::new(geometry());
        builder.push(
            title(),
            Placement {
                page: 3,
                y: 10.0,
                height: 5.0,
                overflows: false,
            },
        );
        let doc = builder.finish(PaperSettings::default(), 3);
        assert_eq!(doc.page_count(), 3);
        assert!(doc.pages[0].blocks.is_empty());
        assert_eq!(doc.pages[2].number, 3);
        assert_eq!(doc.pages[2].height_used, 5.0);
    }

    #[test]
    fn test_overflow_records_diagnostic() {
        let mut builder = DocumentBuilder::new(geometry());
        builder.push(
            Block::Question {
                ordinal: 4,
                question_text: "q".to_string(),
                options: vec![],
            },
            Placement {
                page: 1,
                y: 10.0,
                height: 100.0,
                overflows: true,
            },
        );
        let doc = builder.finish(PaperSettings::default(), 2);
        assert_eq!(
            doc.diagnostics,
            vec![Diagnostic::Overflow {
                page: 1,
                block: "question 4".to_string(),
                overflow_pt: 20.0,
            }]
        );
    }

    #[test]
    fn test_blocks_iterates_in_page_order() {
        let mut builder = DocumentBuilder::new(geometry());
        for page in [1, 1, 2] {
            builder.push(
                title(),
                Placement {
                    page,
                    y: 10.0,
                    height: 1.0,
                    overflows: false,
                },
            );
        }
        builder.set_caption(2, "Answer Key");
        let doc = builder.finish(PaperSettings::default(), 2);
        let pages: Vec<usize> = doc.blocks().map(|(p, _)| p).collect();
        assert_eq!(pages, vec![1, 1, 2]);
        assert_eq!(doc.block_count(), 3);
        assert_eq!(doc.pages[1].caption.as_deref(), Some("Answer Key"));
    }

    #[test]
    fn test_block_labels() {
        assert_eq!(title().label(), "title");
        let row = Block::TableDataRow {
            columns: vec!["7".to_string(), "B) x".to_string()],
        };
        assert_eq!(row.label(), "answer key row 7");
    }
}
