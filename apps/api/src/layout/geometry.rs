//! Block geometry: the single place that turns a block into positioned draw operations.
//!
//! The composer only keeps `height`; the backend only keeps `ops`. Both come from the
//! same call with the same `PaperSettings`, so what gets paginated is what gets drawn.

use serde::{Deserialize, Serialize};

use crate::layout::document::Block;
use crate::layout::engine::PageGeometry;
use crate::layout::font_metrics::{Rgb, StyleSheet, TextStyle};
use crate::layout::measure::{MeasureError, TextMeasurer};

const MM_TO_PT: f32 = 72.0 / 25.4;

/// Fixed vertical and horizontal spacing, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    pub after_title: f32,
    pub after_question_text: f32,
    pub between_options: f32,
    /// Gap between consecutive question blocks.
    pub between_questions: f32,
    pub option_indent: f32,
    pub cell_padding: f32,
    /// Gap between the answer-key caption and the table.
    pub after_caption: f32,
    /// Share of the content width given to the "Q. No." column.
    pub ordinal_column_ratio: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            after_title: 10.0 * MM_TO_PT,
            after_question_text: 5.0 * MM_TO_PT,
            between_options: 2.0 * MM_TO_PT,
            between_questions: 10.0 * MM_TO_PT,
            option_indent: 5.0 * MM_TO_PT,
            cell_padding: 4.0,
            after_caption: 4.0 * MM_TO_PT,
            ordinal_column_ratio: 0.2,
        }
    }
}

/// Everything a layout pass depends on besides the measurer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperSettings {
    pub geometry: PageGeometry,
    pub styles: StyleSheet,
    pub spacing: Spacing,
}

impl Default for PaperSettings {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::a4(),
            styles: StyleSheet::default(),
            spacing: Spacing::default(),
        }
    }
}

impl PaperSettings {
    pub fn with_geometry(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            ..Self::default()
        }
    }

    /// Left edges and widths of the two answer-key columns.
    pub fn table_columns(&self) -> [(f32, f32); 2] {
        let left = self.geometry.margin_pt;
        let width = self.geometry.content_width();
        let first = width * self.spacing.ordinal_column_ratio;
        [(left, first), (left + first, width - first)]
    }
}

/// Letter label for the option at `index`: A, B, … Z, AA, AB, …
pub fn option_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut label = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8(label).unwrap_or_default()
}

/// A positioned drawing primitive. `dy` is relative to the top of the block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// One wrapped line; `dy` is the top of its line box.
    Text {
        x: f32,
        dy: f32,
        text: String,
        style: TextStyle,
    },
    Rect {
        x: f32,
        dy: f32,
        width: f32,
        height: f32,
        fill: Option<Rgb>,
        stroke: Option<Rgb>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockGeometry {
    pub ops: Vec<DrawOp>,
    pub height: f32,
}

/// Lays out one block's content relative to its top edge.
pub fn block_geometry(
    block: &Block,
    measurer: &dyn TextMeasurer,
    settings: &PaperSettings,
) -> Result<BlockGeometry, MeasureError> {
    match block {
        Block::Title { text } => title_geometry(text, measurer, settings),
        Block::Question {
            ordinal,
            question_text,
            options,
        } => question_geometry(*ordinal, question_text, options, measurer, settings),
        Block::TableHeaderRow { columns } => row_geometry(
            columns,
            &settings.styles.table_header,
            Some(Rgb::MIDNIGHT_BLUE),
            measurer,
            settings,
        ),
        Block::TableDataRow { columns } => row_geometry(
            columns,
            &settings.styles.table_cell,
            None,
            measurer,
            settings,
        ),
    }
}

fn title_geometry(
    text: &str,
    measurer: &dyn TextMeasurer,
    settings: &PaperSettings,
) -> Result<BlockGeometry, MeasureError> {
    let style = settings.styles.title;
    let left = settings.geometry.margin_pt;
    let content_width = settings.geometry.content_width();
    let measured = measurer.measure(text, content_width, &style)?;

    let mut ops = Vec::with_capacity(measured.lines.len());
    for (i, line) in measured.lines.into_iter().enumerate() {
        let line_width = measurer.width(&line, &style)?;
        ops.push(DrawOp::Text {
            x: left + ((content_width - line_width) / 2.0).max(0.0),
            dy: i as f32 * style.line_height(),
            text: line,
            style,
        });
    }

    Ok(BlockGeometry {
        ops,
        height: measured.height,
    })
}

fn question_geometry(
    ordinal: usize,
    question_text: &str,
    options: &[String],
    measurer: &dyn TextMeasurer,
    settings: &PaperSettings,
) -> Result<BlockGeometry, MeasureError> {
    let styles = &settings.styles;
    let spacing = &settings.spacing;
    let left = settings.geometry.margin_pt;
    let content_width = settings.geometry.content_width();

    let mut ops = Vec::new();
    let mut dy = 0.0_f32;

    let label = format!("{ordinal}. {question_text}");
    let measured = measurer.measure(&label, content_width, &styles.question)?;
    push_lines(&mut ops, measured.lines, left, dy, &styles.question);
    dy += measured.height + spacing.after_question_text;

    for (i, option) in options.iter().enumerate() {
        if i > 0 {
            dy += spacing.between_options;
        }
        let line = format!("{}) {option}", option_letter(i));
        let measured = measurer.measure(
            &line,
            content_width - spacing.option_indent,
            &styles.option,
        )?;
        push_lines(
            &mut ops,
            measured.lines,
            left + spacing.option_indent,
            dy,
            &styles.option,
        );
        dy += measured.height;
    }

    Ok(BlockGeometry { ops, height: dy })
}

fn row_geometry(
    columns: &[String],
    style: &TextStyle,
    fill: Option<Rgb>,
    measurer: &dyn TextMeasurer,
    settings: &PaperSettings,
) -> Result<BlockGeometry, MeasureError> {
    let padding = settings.spacing.cell_padding;
    let mut text_ops = Vec::new();
    let mut content_height = style.line_height();

    for (cell, (x, width)) in columns.iter().zip(settings.table_columns()) {
        let measured = measurer.measure(cell, width - 2.0 * padding, style)?;
        content_height = content_height.max(measured.height);
        push_lines(&mut text_ops, measured.lines, x + padding, padding, style);
    }

    let height = content_height + 2.0 * padding;
    let mut ops: Vec<DrawOp> = settings
        .table_columns()
        .into_iter()
        .map(|(x, width)| DrawOp::Rect {
            x,
            dy: 0.0,
            width,
            height,
            fill,
            stroke: Some(Rgb::GRID_GREY),
        })
        .collect();
    ops.extend(text_ops);

    Ok(BlockGeometry { ops, height })
}

fn push_lines(ops: &mut Vec<DrawOp>, lines: Vec<String>, x: f32, top: f32, style: &TextStyle) {
    for (i, text) in lines.into_iter().enumerate() {
        ops.push(DrawOp::Text {
            x,
            dy: top + i as f32 * style.line_height(),
            text,
            style: *style,
        });
    }
}
