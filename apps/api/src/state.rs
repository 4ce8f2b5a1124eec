use std::sync::Arc;

use crate::config::Config;
use crate::layout::{PaperSettings, TextMeasurer};
use crate::paper::RenderBackend;
use crate::questions::source::QuestionSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when no LLM credentials are configured.
    pub question_source: Option<Arc<dyn QuestionSource>>,
    /// Used for both layout and drawing; the two must never differ.
    pub measurer: Arc<dyn TextMeasurer>,
    pub backend: Arc<dyn RenderBackend>,
    pub paper_settings: PaperSettings,
}
