// Layout engine: text measurement, pagination, table flow, block geometry.
// Everything here is synchronous and deterministic; callers run it inside
// tokio::task::spawn_blocking.

pub mod document;
pub mod engine;
pub mod font_metrics;
pub mod geometry;
pub mod measure;
pub mod table;

pub use document::{Block, Diagnostic, Document, DocumentBuilder, Page, PlacedBlock};
pub use engine::{PageGeometry, PaginationState, PaperSize, Placement};
pub use geometry::{block_geometry, option_letter, DrawOp, PaperSettings};
pub use measure::{MeasureError, MetricMeasurer, TextMeasurer};
pub use table::TableRenderer;
