mod config;
mod errors;
mod layout;
mod llm_client;
mod models;
mod paper;
mod questions;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::layout::{MetricMeasurer, PageGeometry, PaperSettings};
use crate::llm_client::LlmClient;
use crate::paper::PdfBackend;
use crate::questions::source::{LlmQuestionSource, QuestionSource};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting quizpaper API v{}", env!("CARGO_PKG_VERSION"));

    // Question generation is optional; papers can always be built from posted questions
    let question_source: Option<Arc<dyn QuestionSource>> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(LlmQuestionSource::new(llm)))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; question generation disabled");
            None
        }
    };

    let paper_settings = PaperSettings::with_geometry(PageGeometry::for_size(config.paper_size));
    info!(
        "Paper layout: {:?} {}x{}pt, margin {:.1}pt",
        config.paper_size,
        paper_settings.geometry.width_pt,
        paper_settings.geometry.height_pt,
        paper_settings.geometry.margin_pt
    );
    if let Some(dir) = &config.paper_archive_dir {
        info!("Archiving rendered papers to {}", dir.display());
    }

    // Build app state
    let state = AppState {
        config: config.clone(),
        question_source,
        measurer: Arc::new(MetricMeasurer),
        backend: Arc::new(PdfBackend),
        paper_settings,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
