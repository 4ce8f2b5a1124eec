//! Axum route handlers for the Questions API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::question::Question;
use crate::questions::sample::{sample_questions, SAMPLE_HEADING};
use crate::questions::source::GenerateQuestionsRequest;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SampleResponse {
    pub heading: &'static str,
    pub questions: Vec<Question>,
}

#[derive(Debug, Serialize)]
pub struct GenerateQuestionsResponse {
    pub questions: Vec<Question>,
}

/// GET /api/v1/questions/sample
pub async fn handle_sample() -> Json<SampleResponse> {
    Json(SampleResponse {
        heading: SAMPLE_HEADING,
        questions: sample_questions(),
    })
}

/// POST /api/v1/questions/generate
///
/// Returns 503 when no question source is configured.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateQuestionsRequest>,
) -> Result<Json<GenerateQuestionsResponse>, AppError> {
    request.validate()?;

    let source = state.question_source.as_ref().ok_or_else(|| {
        AppError::Unavailable(
            "Question generation is not configured; set ANTHROPIC_API_KEY.".to_string(),
        )
    })?;

    let questions = source.generate(&request).await?;

    Ok(Json(GenerateQuestionsResponse { questions }))
}
