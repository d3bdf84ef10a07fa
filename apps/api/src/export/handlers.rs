use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderName},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::editor::actions::Action;
use crate::errors::AppError;
use crate::export::pipeline::{ExportOutcome, PresetAnswer};
use crate::state::AppState;

/// Number of pages in the returned PDF.
pub const EXPORT_PAGES_HEADER: HeaderName = HeaderName::from_static("x-export-pages");

#[derive(Debug, Default, Deserialize)]
pub struct ExportRequest {
    /// Answer to the pay prompt, should gating raise one.
    #[serde(default)]
    pub confirm_payment: bool,
}

/// POST /api/v1/export
///
/// Responds with the PDF as an attachment, 402 with the prompt text when a
/// required pay prompt was not confirmed, or 409 while another export runs.
/// The body is optional; a body that is not a valid request is a 400.
pub async fn handle_export(
    State(state): State<AppState>,
    body: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => ExportRequest::default(),
        Err(rejection) => return Err(AppError::Validation(rejection.body_text())),
    };
    let permit = state
        .export
        .try_begin()
        .map_err(|busy| AppError::Conflict(busy.to_string()))?;

    let session = state.snapshot().await;
    let run = permit
        .run(
            &session.document,
            session.template,
            session.gating,
            &PresetAnswer(request.confirm_payment),
        )
        .await;

    match run.outcome {
        ExportOutcome::Saved(saved) => {
            // still holding the permit: no other export can read stale credits
            let updated = state.dispatch(Action::ExportSaved(session.template)).await?;
            info!(
                pages = saved.pages,
                paid = saved.paid,
                free_exports_remaining = updated.gating.free_exports_remaining,
                "export delivered"
            );
            debug_assert_eq!(
                updated.gating.free_exports_remaining, saved.gating_after.free_exports_remaining,
                "exports are serialized, so the live counter matches the pipeline's"
            );
            drop(permit);
            let disposition = format!("attachment; filename=\"{}\"", saved.file_name);
            Ok((
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                    (EXPORT_PAGES_HEADER, saved.pages.to_string()),
                ],
                saved.bytes,
            )
                .into_response())
        }
        ExportOutcome::Declined(kind) => Err(AppError::PaymentRequired(kind.message().to_string())),
        ExportOutcome::Failed(_) => Err(AppError::ExportFailed),
    }
}
