use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::docx::DocxError;
use crate::generation::parse::UnparseableOutput;
use crate::layout::assembler::AssemblyError;
use crate::layout::buffer::LayoutError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("Generation failed: {0}")]
    UpstreamGenerationFailure(String),

    #[error("Unparseable generation output: expected {expected}")]
    UnparseableGenerationOutput { expected: &'static str, raw: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Document error: {0}")]
    Docx(#[from] DocxError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::UpstreamGenerationFailure(e.to_string())
    }
}

impl From<UnparseableOutput> for AppError {
    fn from(e: UnparseableOutput) -> Self {
        AppError::UnparseableGenerationOutput {
            expected: e.expected,
            raw: e.raw,
        }
    }
}

impl From<AssemblyError> for AppError {
    fn from(e: AssemblyError) -> Self {
        match e {
            AssemblyError::Layout(e) => AppError::Layout(e),
            // A document we produced ourselves failed to serialize: not the caller's fault.
            AssemblyError::Docx(e) => AppError::Internal(e.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut raw_output = None;
        let (status, code, message) = match &self {
            AppError::MissingRequiredField(field) => (
                StatusCode::BAD_REQUEST,
                "MISSING_REQUIRED_FIELD",
                format!("{field} is required"),
            ),
            AppError::UpstreamGenerationFailure(msg) => {
                tracing::error!("Upstream generation failure: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_GENERATION_FAILURE",
                    "The content generator could not be reached".to_string(),
                )
            }
            AppError::UnparseableGenerationOutput { expected, raw } => {
                raw_output = Some(raw.clone());
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "UNPARSEABLE_GENERATION_OUTPUT",
                    format!("The generated output is not {expected}"),
                )
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Layout(e) => {
                tracing::error!("Layout error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LAYOUT_ERROR",
                    e.to_string(),
                )
            }
            AppError::Docx(e) => (
                StatusCode::BAD_REQUEST,
                "INVALID_DOCUMENT",
                e.to_string(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(raw) = raw_output {
            error["raw_output"] = json!(raw);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        let response = AppError::MissingRequiredField("job_title").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
        assert_eq!(body["error"]["message"], "job_title is required");
    }

    #[tokio::test]
    async fn test_unparseable_output_echoes_raw_text() {
        let err: AppError = UnparseableOutput {
            expected: "a JSON list",
            raw: "sorry".to_string(),
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["raw_output"], "sorry");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_bad_gateway() {
        let err: AppError = LlmError::EmptyContent.into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UPSTREAM_GENERATION_FAILURE");
        assert!(body["error"].get("raw_output").is_none());
    }
}
