//! Axum route handlers for the Papers API.
//!
//! Layout and rendering are CPU-bound and synchronous, so both handlers move the
//! work onto the blocking pool.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{error, info_span};
use uuid::Uuid;

use crate::errors::AppError;
use crate::layout::{Diagnostic, Page};
use crate::models::question::Question;
use crate::paper::archive::archive_paper;
use crate::paper::file_name::output_file_name;
use crate::paper::{compose, generate_document};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct PaperRequest {
    #[serde(default)]
    pub heading: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    pub paper_id: Uuid,
    pub file_name: String,
    pub page_count: usize,
    pub answer_key_page: usize,
    pub pages: Vec<Page>,
    pub diagnostics: Vec<Diagnostic>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/papers/layout
///
/// Composes the paper and returns the page layout without rendering it.
pub async fn handle_layout(
    State(state): State<AppState>,
    Json(request): Json<PaperRequest>,
) -> Result<Json<LayoutResponse>, AppError> {
    let paper_id = Uuid::new_v4();
    let span = info_span!("paper_layout", %paper_id);
    let extension = state.backend.extension();

    let document = tokio::task::spawn_blocking(move || {
        let _entered = span.enter();
        compose(
            &request.questions,
            &request.heading,
            &state.paper_settings,
            state.measurer.as_ref(),
        )
        .map(|document| (document, output_file_name(&request.heading, extension)))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("layout task failed: {e}")))?;

    let (document, file_name) = document?;

    Ok(Json(LayoutResponse {
        paper_id,
        file_name,
        page_count: document.page_count(),
        answer_key_page: document.answer_key_page,
        pages: document.pages,
        diagnostics: document.diagnostics,
    }))
}

/// POST /api/v1/papers
///
/// Returns the rendered paper as a download. When an archive directory is
/// configured the bytes are also stored there; an archive failure is logged
/// and does not fail the request.
pub async fn handle_render(
    State(state): State<AppState>,
    Json(request): Json<PaperRequest>,
) -> Result<Response, AppError> {
    let paper_id = Uuid::new_v4();
    let span = info_span!("paper_render", %paper_id);

    let paper = tokio::task::spawn_blocking(move || {
        let _entered = span.enter();
        let paper = generate_document(
            &request.questions,
            &request.heading,
            &state.paper_settings,
            state.measurer.as_ref(),
            state.backend.as_ref(),
        )?;
        if let Some(dir) = &state.config.paper_archive_dir {
            if let Err(e) = archive_paper(dir, &paper.file_name, &paper.bytes) {
                error!("Failed to archive {}: {e:?}", paper.file_name);
            }
        }
        Ok::<_, AppError>(paper)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("render task failed: {e}")))??;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(content_type(&paper.file_name)),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", paper.file_name))
            .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid file name header: {e}")))?,
    );
    headers.insert(
        HeaderName::from_static("x-page-count"),
        HeaderValue::from(paper.document.page_count()),
    );
    headers.insert(
        HeaderName::from_static("x-paper-id"),
        HeaderValue::from_str(&paper_id.to_string())
            .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid paper id header: {e}")))?,
    );

    Ok((headers, Bytes::from(paper.bytes)).into_response())
}

fn content_type(file_name: &str) -> &'static str {
    match file_name.rsplit_once('.').map(|(_, ext)| ext) {
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}
