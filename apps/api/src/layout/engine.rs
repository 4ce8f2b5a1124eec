//! Pagination state machine over the page height budget.
//!
//! `PaginationState` is a plain value: `place`, `force_break` and `reserve` consume it
//! and hand back the next state, so a layout pass is a fold over its blocks.
//! Offsets are measured in points from the top edge of the page.

use serde::{Deserialize, Serialize};

/// Tolerance for float comparisons against the page budget.
const EPSILON: f32 = 0.01;

const MM_TO_PT: f32 = 72.0 / 25.4;

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    A4,
    Letter,
}

impl std::str::FromStr for PaperSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PaperSize::A4),
            "letter" => Ok(PaperSize::Letter),
            other => Err(format!("unknown paper size '{other}' (expected a4 or letter)")),
        }
    }
}

/// Physical page dimensions, in points. One margin applies to all four sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width_pt: f32,
    pub height_pt: f32,
    pub margin_pt: f32,
}

impl PageGeometry {
    /// A4 portrait with 20mm margins.
    pub fn a4() -> Self {
        Self {
            width_pt: 210.0 * MM_TO_PT,
            height_pt: 297.0 * MM_TO_PT,
            margin_pt: 20.0 * MM_TO_PT,
        }
    }

    /// US letter portrait with 20mm margins.
    pub fn letter() -> Self {
        Self {
            width_pt: 612.0,
            height_pt: 792.0,
            margin_pt: 20.0 * MM_TO_PT,
        }
    }

    pub fn for_size(size: PaperSize) -> Self {
        match size {
            PaperSize::A4 => Self::a4(),
            PaperSize::Letter => Self::letter(),
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width_pt - 2.0 * self.margin_pt
    }

    /// Usable vertical space per page.
    pub fn content_height(&self) -> f32 {
        self.height_pt - 2.0 * self.margin_pt
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pagination state
// ────────────────────────────────────────────────────────────────────────────

/// Where a block landed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    /// 1-based page number.
    pub page: usize,
    /// Offset of the block's top edge from the top of the page.
    pub y: f32,
    pub height: f32,
    /// True when the block runs past the bottom margin.
    pub overflows: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaginationState {
    /// 1-based index of the page the cursor is on.
    pub page_index: usize,
    pub cursor: f32,
    pub page_height: f32,
    pub margin: f32,
}

impl PaginationState {
    /// Page 1, cursor at the top margin.
    pub fn new(geometry: &PageGeometry) -> Self {
        Self {
            page_index: 1,
            cursor: geometry.margin_pt,
            page_height: geometry.height_pt,
            margin: geometry.margin_pt,
        }
    }

    pub fn bottom_limit(&self) -> f32 {
        self.page_height - self.margin
    }

    pub fn fits(&self, height: f32) -> bool {
        self.cursor + height <= self.bottom_limit() + EPSILON
    }

    pub fn at_page_top(&self) -> bool {
        (self.cursor - self.margin).abs() < EPSILON
    }

    /// Unconditionally starts a new page.
    pub fn force_break(self) -> Self {
        Self {
            page_index: self.page_index + 1,
            cursor: self.margin,
            ..self
        }
    }

    /// Moves the cursor down without placing anything.
    pub fn reserve(self, height: f32) -> Self {
        Self {
            cursor: self.cursor + height,
            ..self
        }
    }

    /// Records a block at the cursor without any fit check.
    pub fn commit(self, height: f32, spacing_after: f32) -> (Placement, Self) {
        let placement = Placement {
            page: self.page_index,
            y: self.cursor,
            height,
            overflows: self.cursor + height > self.bottom_limit() + EPSILON,
        };
        let next = Self {
            cursor: self.cursor + height + spacing_after,
            ..self
        };
        (placement, next)
    }

    /// Places an atomic block, breaking to a new page first if it does not fit.
    ///
    /// A block that is taller than a whole page still gets exactly one break: it is
    /// placed at the top of the fresh page and reported as overflowing.
    pub fn place(self, height: f32, spacing_after: f32) -> (Placement, Self) {
        let state = if !self.fits(height) && !self.at_page_top() {
            self.force_break()
        } else {
            self
        };
        state.commit(height, spacing_after)
    }

    pub fn page_count(&self) -> usize {
        self.page_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 100pt tall page with 10pt margins: 80pt budget.
    fn small_page() -> PageGeometry {
        PageGeometry {
            width_pt: 100.0,
            height_pt: 100.0,
            margin_pt: 10.0,
        }
    }

    #[test]
    fn test_new_state_starts_at_top_of_page_one() {
        let state = PaginationState::new(&small_page());
        assert_eq!(state.page_index, 1);
        assert_eq!(state.cursor, 10.0);
        assert!(state.at_page_top());
        assert_eq!(state.bottom_limit(), 90.0);
    }

    #[test]
    fn test_place_advances_cursor_with_spacing() {
        let state = PaginationState::new(&small_page());
        let (placement, state) = state.place(20.0, 5.0);
        assert_eq!(placement.page, 1);
        assert_eq!(placement.y, 10.0);
        assert!(!placement.overflows);
        assert_eq!(state.cursor, 35.0);
    }

    #[test]
    fn test_place_breaks_when_block_does_not_fit() {
        let state = PaginationState::new(&small_page());
        let (_, state) = state.place(60.0, 0.0);
        let (placement, state) = state.place(30.0, 0.0);
        assert_eq!(placement.page, 2);
        assert_eq!(placement.y, 10.0);
        assert_eq!(state.cursor, 40.0);
    }

    #[test]
    fn test_block_exactly_filling_budget_fits() {
        let state = PaginationState::new(&small_page());
        let (placement, _) = state.place(80.0, 0.0);
        assert_eq!(placement.page, 1);
        assert!(!placement.overflows);
    }

    #[test]
    fn test_oversized_block_breaks_once_and_overflows() {
        let state = PaginationState::new(&small_page());
        let (_, state) = state.place(10.0, 0.0);
        let (placement, state) = state.place(250.0, 0.0);
        assert_eq!(placement.page, 2);
        assert_eq!(placement.y, 10.0);
        assert!(placement.overflows);
        assert_eq!(state.page_count(), 2);
    }

    #[test]
    fn test_oversized_block_on_fresh_page_does_not_break() {
        let state = PaginationState::new(&small_page());
        let (placement, state) = state.place(250.0, 0.0);
        assert_eq!(placement.page, 1);
        assert!(placement.overflows);
        assert_eq!(state.page_count(), 1);
    }

    #[test]
    fn test_force_break_ignores_remaining_space() {
        let state = PaginationState::new(&small_page()).force_break();
        assert_eq!(state.page_index, 2);
        assert!(state.at_page_top());
        let (placement, _) = state.place(5.0, 0.0);
        assert_eq!(placement.page, 2);
    }

    #[test]
    fn test_reserve_moves_cursor_without_placing() {
        let state = PaginationState::new(&small_page()).reserve(15.0);
        assert_eq!(state.cursor, 25.0);
        assert!(!state.at_page_top());
        assert_eq!(state.page_index, 1);
    }

    #[test]
    fn test_paper_size_parsing() {
        assert_eq!("A4".parse::<PaperSize>(), Ok(PaperSize::A4));
        assert_eq!(" letter ".parse::<PaperSize>(), Ok(PaperSize::Letter));
        assert!("legal".parse::<PaperSize>().is_err());
    }

    #[test]
    fn test_a4_geometry() {
        let a4 = PageGeometry::a4();
        assert!((a4.width_pt - 595.28).abs() < 0.01);
        assert!((a4.height_pt - 841.89).abs() < 0.01);
        assert!((a4.margin_pt - 56.69).abs() < 0.01);
        assert!((a4.content_width() - (a4.width_pt - 2.0 * a4.margin_pt)).abs() < 1e-3);
    }
}
