use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::editor::actions::{Action, EducationPatch, ExperiencePatch, LinkPatch, ProfilePatch};
use crate::editor::session::Session;
use crate::errors::AppError;
use crate::layout::LayoutTree;
use crate::models::resume::EntryId;
use crate::models::template::{TemplateId, TemplateInfo};
use crate::state::AppState;
use crate::templates::render_preview;

#[derive(Deserialize)]
pub struct SkillRequest {
    pub skill: String,
}

#[derive(Deserialize)]
pub struct TemplateSelection {
    pub template: TemplateId,
}

#[derive(Deserialize)]
pub struct SubscriptionToggle {
    pub active: bool,
}

#[derive(Deserialize)]
pub struct PreviewQuery {
    pub template: Option<String>,
}

#[derive(Serialize)]
pub struct CreatedEntry {
    pub id: EntryId,
    pub session: Session,
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateInfo>> {
    Json(TemplateId::catalogue())
}

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<Session> {
    Json(state.snapshot().await)
}

/// PATCH /api/v1/resume
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Json(patch): Json<ProfilePatch>,
) -> Result<Json<Session>, AppError> {
    Ok(Json(state.dispatch(Action::UpdateProfile(patch)).await?))
}

// ────────────────────────────────────────────────────────────────────────────
// Experience & education
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/experience
pub async fn handle_add_experience(
    State(state): State<AppState>,
) -> Result<Json<CreatedEntry>, AppError> {
    let id = EntryId::generate();
    let session = state.dispatch(Action::AddExperience(id.clone())).await?;
    Ok(Json(CreatedEntry { id, session }))
}

/// PATCH /api/v1/resume/experience/:id
pub async fn handle_update_experience(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ExperiencePatch>,
) -> Result<Json<Session>, AppError> {
    let action = Action::UpdateExperience(EntryId::from(id.as_str()), patch);
    Ok(Json(state.dispatch(action).await?))
}

/// DELETE /api/v1/resume/experience/:id
pub async fn handle_remove_experience(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Session>, AppError> {
    let action = Action::RemoveExperience(EntryId::from(id.as_str()));
    Ok(Json(state.dispatch(action).await?))
}

/// POST /api/v1/resume/education
pub async fn handle_add_education(
    State(state): State<AppState>,
) -> Result<Json<CreatedEntry>, AppError> {
    let id = EntryId::generate();
    let session = state.dispatch(Action::AddEducation(id.clone())).await?;
    Ok(Json(CreatedEntry { id, session }))
}

/// PATCH /api/v1/resume/education/:id
pub async fn handle_update_education(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<EducationPatch>,
) -> Result<Json<Session>, AppError> {
    let action = Action::UpdateEducation(EntryId::from(id.as_str()), patch);
    Ok(Json(state.dispatch(action).await?))
}

/// DELETE /api/v1/resume/education/:id
pub async fn handle_remove_education(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Session>, AppError> {
    let action = Action::RemoveEducation(EntryId::from(id.as_str()));
    Ok(Json(state.dispatch(action).await?))
}

// ────────────────────────────────────────────────────────────────────────────
// Skills & links
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Json(req): Json<SkillRequest>,
) -> Result<Json<Session>, AppError> {
    if req.skill.trim().is_empty() {
        return Err(AppError::Validation("skill must not be blank".to_string()));
    }
    Ok(Json(state.dispatch(Action::AddSkill(req.skill)).await?))
}

/// DELETE /api/v1/resume/skills/:index
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<Session>, AppError> {
    Ok(Json(state.dispatch(Action::RemoveSkill(index)).await?))
}

/// POST /api/v1/resume/links
pub async fn handle_add_link(State(state): State<AppState>) -> Result<Json<Session>, AppError> {
    Ok(Json(state.dispatch(Action::AddLink).await?))
}

/// PATCH /api/v1/resume/links/:index
pub async fn handle_update_link(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(patch): Json<LinkPatch>,
) -> Result<Json<Session>, AppError> {
    Ok(Json(state.dispatch(Action::UpdateLink(index, patch)).await?))
}

/// DELETE /api/v1/resume/links/:index
pub async fn handle_remove_link(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<Session>, AppError> {
    Ok(Json(state.dispatch(Action::RemoveLink(index)).await?))
}

// ────────────────────────────────────────────────────────────────────────────
// Template, subscription, preview
// ────────────────────────────────────────────────────────────────────────────

/// PUT /api/v1/template
pub async fn handle_select_template(
    State(state): State<AppState>,
    Json(req): Json<TemplateSelection>,
) -> Result<Json<Session>, AppError> {
    Ok(Json(state.dispatch(Action::SelectTemplate(req.template)).await?))
}

/// PUT /api/v1/subscription
pub async fn handle_set_subscription(
    State(state): State<AppState>,
    Json(req): Json<SubscriptionToggle>,
) -> Result<Json<Session>, AppError> {
    Ok(Json(state.dispatch(Action::SetSubscription(req.active)).await?))
}

/// GET /api/v1/preview[?template=]
///
/// Renders without changing the selection, chrome included.
pub async fn handle_preview(
    State(state): State<AppState>,
    Query(params): Query<PreviewQuery>,
) -> Result<Json<LayoutTree>, AppError> {
    let session = state.snapshot().await;
    let template = match params.template.as_deref() {
        Some(raw) => TemplateId::parse(raw)
            .ok_or_else(|| AppError::Validation(format!("unknown template '{raw}'")))?,
        None => session.template,
    };
    Ok(Json(render_preview(template, &session.document)))
}
