//! Axum route handlers for the text generators.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::cover_letter::generate_cover_letter;
use crate::generation::email::generate_job_email;
use crate::generation::tone::Tone;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub tone: Tone,
}

#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company: String,
}

/// Generated text, returned verbatim so the client can copy it to the clipboard.
#[derive(Debug, Serialize)]
pub struct GeneratedText {
    pub text: String,
}

/// POST /api/v1/generate/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<GeneratedText>, AppError> {
    let session = state.session.lock().await;
    let text = generate_cover_letter(&session.document, &request.job_title, &request.company, request.tone);
    Ok(Json(GeneratedText { text }))
}

/// POST /api/v1/generate/email
pub async fn handle_email(
    State(state): State<AppState>,
    Json(request): Json<EmailRequest>,
) -> Result<Json<GeneratedText>, AppError> {
    let session = state.session.lock().await;
    let text = generate_job_email(&session.document, &request.job_title, &request.company);
    Ok(Json(GeneratedText { text }))
}
