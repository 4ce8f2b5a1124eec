use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::paper::PaperError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<PaperError> for AppError {
    fn from(err: PaperError) -> Self {
        match err {
            PaperError::EmptyQuestionSet | PaperError::InvalidQuestion { .. } => {
                AppError::Validation(err.to_string())
            }
            PaperError::Measurement { .. } => AppError::UnprocessableEntity(err.to_string()),
            PaperError::Render(_) => AppError::Internal(anyhow::Error::new(err)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Unavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                msg.clone(),
            ),
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "Failed to generate questions. Please try again.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::MeasureError;
    use crate::layout::font_metrics::FontFace;
    use crate::models::question::QuestionDefect;

    #[test]
    fn test_paper_validation_maps_to_bad_request() {
        let err: AppError = PaperError::InvalidQuestion {
            ordinal: 3,
            defect: QuestionDefect::EmptyText,
        }
        .into();
        match &err {
            AppError::Validation(msg) => assert_eq!(msg, "question 3: question text is empty"),
            other => panic!("expected Validation, got {other:?}"),
        }
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_measurement_maps_to_unprocessable() {
        let err: AppError = PaperError::Measurement {
            context: "question 1".to_string(),
            source: MeasureError::UnsupportedCharacter {
                ch: 'λ',
                face: FontFace::Helvetica,
            },
        }
        .into();
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_render_failure_is_internal() {
        let err: AppError = PaperError::Render("boom".to_string()).into();
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
