//! Document downloads and resume upload.

use axum::{
    extract::Multipart,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use chrono::Local;
use serde::Serialize;
use tracing::info;

use crate::docx::{self, cover_letter_filename, resume_filename, DOCX_CONTENT_TYPE};
use crate::errors::AppError;
use crate::layout::assembler::{assemble, assemble_letter};
use crate::session::WizardState;

const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub paragraphs: Vec<String>,
    /// Paragraphs joined with newlines, ready to use as `resume_content`.
    pub resume_content: String,
}

/// POST /api/v1/documents/resume
pub async fn handle_resume_document(Json(wizard): Json<WizardState>) -> Result<Response, AppError> {
    let bytes = assemble(wizard.require_resume()?)?;
    let filename = resume_filename(
        wizard.candidate_name(),
        &wizard.company_name,
        Local::now().date_naive(),
    );
    docx_attachment(bytes, &filename)
}

/// POST /api/v1/documents/cover-letter
pub async fn handle_cover_letter_document(
    Json(wizard): Json<WizardState>,
) -> Result<Response, AppError> {
    let letter = wizard
        .cover_letter
        .as_deref()
        .filter(|l| !l.trim().is_empty())
        .ok_or_else(|| AppError::Validation("write the cover letter before downloading it".to_string()))?;
    let bytes = assemble_letter(letter)?;
    let filename = cover_letter_filename(
        wizard.candidate_name(),
        &wizard.company_name,
        Local::now().date_naive(),
    );
    docx_attachment(bytes, &filename)
}

fn docx_attachment(bytes: Vec<u8>, filename: &str) -> Result<Response, AppError> {
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
        .map_err(|e| AppError::Internal(e.into()))?;
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(DOCX_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// POST /api/v1/uploads/resume
///
/// Accepts a `.docx` in the multipart field `file` and returns its non-blank paragraphs.
pub async fn handle_upload_resume(mut multipart: Multipart) -> Result<Json<UploadResponse>, AppError> {
    let mut upload: Option<Bytes> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            upload = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?,
            );
        }
    }
    let upload = upload.ok_or(AppError::MissingRequiredField(UPLOAD_FIELD))?;

    let paragraphs = docx::extract_paragraphs(&upload)?;
    info!(
        bytes = upload.len(),
        paragraphs = paragraphs.len(),
        "Extracted uploaded resume"
    );
    Ok(Json(UploadResponse {
        resume_content: docx::paragraphs_to_text(&paragraphs),
        paragraphs,
    }))
}
