// Quiz paper generation: validation, composition, rendering, archiving.
// All LLM-free and deterministic apart from the PDF creation timestamp.

pub mod archive;
pub mod composer;
pub mod file_name;
pub mod handlers;
pub mod render;

use thiserror::Error;

use crate::layout::MeasureError;
use crate::models::question::QuestionDefect;

pub use composer::{compose, generate_document, RenderedPaper};
pub use render::{PdfBackend, RenderBackend};

#[derive(Debug, Error)]
pub enum PaperError {
    #[error("at least one question is required")]
    EmptyQuestionSet,

    /// `ordinal` is 1-based, matching the number printed on the paper.
    #[error("question {ordinal}: {defect}")]
    InvalidQuestion {
        ordinal: usize,
        defect: QuestionDefect,
    },

    #[error("cannot measure {context}: {source}")]
    Measurement {
        context: String,
        #[source]
        source: MeasureError,
    },

    #[error("rendering failed: {0}")]
    Render(String),
}
