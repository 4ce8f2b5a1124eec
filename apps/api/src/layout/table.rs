//! Table pagination with a repeating header row.
//!
//! Rows are atomic and abut each other (no spacing). When a row does not fit, the
//! table continues on a new page and the header row is drawn again first.

use crate::layout::document::Block;
use crate::layout::engine::{PaginationState, Placement};
use crate::layout::geometry::{block_geometry, PaperSettings};
use crate::layout::measure::{MeasureError, TextMeasurer};

/// Which row a slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSlot {
    Header,
    /// Index into the data rows.
    Data(usize),
}

/// Paginates pre-measured rows. Pure: no measuring, no blocks.
///
/// - `lead` is space kept free directly above the first header (a caption). It
///   always lands on the same page as that header.
/// - The header is never stranded: if it cannot share a page with the lead and
///   the first data row, the table starts on the next page.
/// - Every page after a mid-table break starts with the header.
/// - A row taller than a page is placed anyway and flagged as overflowing.
pub fn paginate_rows(
    state: PaginationState,
    lead: f32,
    header_height: f32,
    row_heights: &[f32],
) -> (Vec<(RowSlot, Placement)>, PaginationState) {
    let mut slots = Vec::with_capacity(row_heights.len() + 1);
    let mut state = state;

    let first = row_heights.first().copied().unwrap_or(0.0);
    if !state.fits(lead + header_height + first) && !state.at_page_top() {
        state = state.force_break();
    }
    state = state.reserve(lead);
    let (placement, next) = state.commit(header_height, 0.0);
    slots.push((RowSlot::Header, placement));
    state = next;

    let mut rows_on_page = 0usize;
    for (i, &height) in row_heights.iter().enumerate() {
        if !state.fits(height) && rows_on_page > 0 {
            state = state.force_break();
            let (placement, next) = state.commit(header_height, 0.0);
            slots.push((RowSlot::Header, placement));
            state = next;
            rows_on_page = 0;
        }
        let (placement, next) = state.commit(height, 0.0);
        slots.push((RowSlot::Data(i), placement));
        state = next;
        rows_on_page += 1;
    }

    (slots, state)
}

/// Measures table rows and paginates them into placed blocks.
pub struct TableRenderer<'a> {
    measurer: &'a dyn TextMeasurer,
    settings: &'a PaperSettings,
    lead: f32,
}

impl<'a> TableRenderer<'a> {
    pub fn new(measurer: &'a dyn TextMeasurer, settings: &'a PaperSettings) -> Self {
        Self {
            measurer,
            settings,
            lead: 0.0,
        }
    }

    /// Keeps `height` free above the first header row, on the header's page.
    pub fn with_lead(mut self, height: f32) -> Self {
        self.lead = height;
        self
    }

    pub fn render(
        &self,
        state: PaginationState,
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<(Vec<(Block, Placement)>, PaginationState), MeasureError> {
        let header = Block::TableHeaderRow { columns: header };
        let header_height = block_geometry(&header, self.measurer, self.settings)?.height;

        let rows: Vec<Block> = rows
            .into_iter()
            .map(|columns| Block::TableDataRow { columns })
            .collect();
        let row_heights = rows
            .iter()
            .map(|row| block_geometry(row, self.measurer, self.settings).map(|g| g.height))
            .collect::<Result<Vec<f32>, MeasureError>>()?;

        let (slots, state) = paginate_rows(state, self.lead, header_height, &row_heights);
        let placed = slots
            .into_iter()
            .map(|(slot, placement)| match slot {
                RowSlot::Header => (header.clone(), placement),
                RowSlot::Data(i) => (rows[i].clone(), placement),
            })
            .collect();

        Ok((placed, state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::engine::PageGeometry;
    use crate::layout::measure::testing::FixedWidthMeasurer;

    /// 80pt budget.
    fn state() -> PaginationState {
        PaginationState::new(&PageGeometry {
            width_pt: 100.0,
            height_pt: 100.0,
            margin_pt: 10.0,
        })
    }

    fn kinds(slots: &[(RowSlot, Placement)]) -> Vec<(RowSlot, usize)> {
        slots.iter().map(|(s, p)| (*s, p.page)).collect()
    }

    #[test]
    fn test_short_table_fits_on_one_page() {
        let (slots, state) = paginate_rows(state(), 0.0, 10.0, &[10.0, 10.0, 10.0]);
        assert_eq!(
            kinds(&slots),
            vec![
                (RowSlot::Header, 1),
                (RowSlot::Data(0), 1),
                (RowSlot::Data(1), 1),
                (RowSlot::Data(2), 1),
            ]
        );
        assert_eq!(state.cursor, 50.0);
    }

    #[test]
    fn test_header_repeats_on_continuation_pages() {
        // header 10 + 3 rows of 20 = 70 per page; fourth row breaks
        let (slots, _) = paginate_rows(state(), 0.0, 10.0, &[20.0; 7]);
        let pages: Vec<(RowSlot, usize)> = kinds(&slots);
        assert_eq!(pages[0], (RowSlot::Header, 1));
        assert_eq!(pages[4], (RowSlot::Header, 2));
        assert_eq!(pages[5], (RowSlot::Data(3), 2));
        assert_eq!(pages[8], (RowSlot::Header, 3));
        assert_eq!(pages[9], (RowSlot::Data(6), 3));

        // the header is the first slot on every page
        let mut last_page = 0;
        for (slot, page) in pages {
            if page != last_page {
                assert_eq!(slot, RowSlot::Header, "page {page} must start with the header");
                last_page = page;
            }
        }
    }

    #[test]
    fn test_header_is_not_stranded_at_page_bottom() {
        let (_, s) = state().place(65.0, 0.0);
        let (slots, _) = paginate_rows(s, 0.0, 10.0, &[10.0]);
        assert_eq!(kinds(&slots), vec![(RowSlot::Header, 2), (RowSlot::Data(0), 2)]);
    }

    #[test]
    fn test_lead_stays_on_header_page() {
        // at page top: no break even though lead + header + row overflow
        let (slots, _) = paginate_rows(state(), 30.0, 10.0, &[60.0]);
        assert_eq!(kinds(&slots), vec![(RowSlot::Header, 1), (RowSlot::Data(0), 1)]);
        assert!((slots[0].1.y - 40.0).abs() < 1e-3);
        assert!(slots[1].1.overflows);

        // mid-page: the lead moves to the next page with the header
        let (_, s) = state().place(30.0, 0.0);
        let (slots, _) = paginate_rows(s, 30.0, 10.0, &[20.0]);
        assert_eq!(kinds(&slots), vec![(RowSlot::Header, 2), (RowSlot::Data(0), 2)]);
        assert!((slots[0].1.y - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_oversized_row_is_placed_without_extra_breaks() {
        let (slots, state) = paginate_rows(state(), 0.0, 10.0, &[10.0, 200.0, 10.0]);
        assert_eq!(
            kinds(&slots),
            vec![
                (RowSlot::Header, 1),
                (RowSlot::Data(0), 1),
                (RowSlot::Header, 2),
                (RowSlot::Data(1), 2),
                (RowSlot::Header, 3),
                (RowSlot::Data(2), 3),
            ]
        );
        assert!(slots[3].1.overflows);
        assert_eq!(state.page_count(), 3);
    }

    #[test]
    fn test_empty_table_is_just_a_header() {
        let (slots, _) = paginate_rows(state(), 0.0, 10.0, &[]);
        assert_eq!(kinds(&slots), vec![(RowSlot::Header, 1)]);
    }

    #[test]
    fn test_renderer_emits_header_and_data_blocks() {
        let settings = PaperSettings::default();
        let measurer = FixedWidthMeasurer { char_width: 5.0 };
        let renderer = TableRenderer::new(&measurer, &settings);
        let start = PaginationState::new(&settings.geometry);
        let rows = (1..=3)
            .map(|i| vec![i.to_string(), format!("A) answer {i}")])
            .collect();
        let (placed, _) = renderer
            .render(start, vec!["Q. No.".into(), "Correct Answer".into()], rows)
            .unwrap();
        assert_eq!(placed.len(), 4);
        assert!(matches!(placed[0].0, Block::TableHeaderRow { .. }));
        assert_eq!(
            placed[3].0,
            Block::TableDataRow {
                columns: vec!["3".to_string(), "A) answer 3".to_string()]
            }
        );
        // rows abut
        assert!((placed[1].1.y - (placed[0].1.y + placed[0].1.height)).abs() < 1e-3);
    }
}
