//! Axum route handlers for the Resume API.

use anyhow::Context;
use axum::{
    extract::{multipart::Field, Multipart, Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{extract_text, is_supported_upload};
use crate::models::resume::{ResumeData, ResumeRecord};
use crate::resume::parser::parse_resume;
use crate::state::AppState;

/// Largest accepted résumé file.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Multipart field names that may carry the file.
const FILE_FIELDS: [&str; 2] = ["file", "resume"];

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ResumeUploadResponse {
    pub success: bool,
    pub resume_id: Uuid,
    pub parsed_data: ResumeData,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteResumeResponse {
    pub success: bool,
    pub message: String,
}

struct UploadedFile {
    filename: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/upload-resume
///
/// Validates the upload, extracts its text, asks the LLM for structured
/// fields (best effort) and stores the result in memory.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeUploadResponse>, AppError> {
    let upload = read_upload(&mut multipart).await?;

    if !is_supported_upload(upload.content_type.as_deref(), upload.filename.as_deref()) {
        return Err(AppError::Validation(format!(
            "Unsupported file type '{}'. Please upload a PDF, DOC, DOCX or TXT file",
            upload
                .content_type
                .as_deref()
                .or(upload.filename.as_deref())
                .unwrap_or("unknown")
        )));
    }

    let filename = upload
        .filename
        .clone()
        .unwrap_or_else(|| "resume".to_string());

    // PDF and DOCX decoding is CPU-bound.
    let content = tokio::task::spawn_blocking(move || {
        extract_text(
            &upload.data,
            upload.content_type.as_deref(),
            upload.filename.as_deref(),
        )
    })
    .await
    .context("text extraction task failed")?;

    if content.trim().is_empty() {
        return Err(AppError::Validation(
            "Could not extract any text from the uploaded file".to_string(),
        ));
    }

    let parsed_data = parse_resume(&content, &state.llm).await;
    let record = state.resumes.insert(filename, content, parsed_data).await;

    info!(
        "Stored resume {} ({}, {} chars); {} resumes in memory",
        record.id,
        record.filename,
        record.content.len(),
        state.resumes.len().await
    );

    Ok(Json(ResumeUploadResponse {
        success: true,
        resume_id: record.id,
        parsed_data: record.parsed_data,
        message: "Resume uploaded and parsed successfully".to_string(),
    }))
}

/// GET /api/resumes
pub async fn handle_list_resumes(State(state): State<AppState>) -> Json<Vec<ResumeRecord>> {
    Json(state.resumes.list().await)
}

/// DELETE /api/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<String>,
) -> Result<Json<DeleteResumeResponse>, AppError> {
    let not_found = || AppError::NotFound(format!("Resume {resume_id} not found"));

    let id = Uuid::parse_str(&resume_id).map_err(|_| not_found())?;
    state.resumes.remove(id).await.ok_or_else(not_found)?;

    info!("Deleted resume {id}");
    Ok(Json(DeleteResumeResponse {
        success: true,
        message: "Resume deleted successfully".to_string(),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart helpers
// ────────────────────────────────────────────────────────────────────────────

async fn read_upload(multipart: &mut Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(invalid_body)? {
        if !field.name().is_some_and(|name| FILE_FIELDS.contains(&name)) {
            continue;
        }

        let filename = field.file_name().map(String::from);
        let content_type = field.content_type().map(String::from);
        let data = read_limited(field).await?;

        return Ok(UploadedFile {
            filename,
            content_type,
            data,
        });
    }

    Err(AppError::Validation(
        "No file provided. Send the resume in a 'file' or 'resume' form field".to_string(),
    ))
}

/// Buffers a field, bailing out as soon as it exceeds `MAX_UPLOAD_BYTES`.
async fn read_limited(mut field: Field<'_>) -> Result<Vec<u8>, AppError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(invalid_body)? {
        if data.len() + chunk.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::Validation(format!(
                "File too large. Maximum size is {} MB",
                MAX_UPLOAD_BYTES / (1024 * 1024)
            )));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

fn invalid_body(err: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("Invalid multipart body: {err}"))
}
