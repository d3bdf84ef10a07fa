//! Editor reducer: `reduce(old session, action) -> new session`.
//!
//! Every form interaction is one `Action`. The reducer is pure: ids for new
//! entries are minted by the caller and carried in the action, so replaying the
//! same actions always yields the same session.

use serde::Deserialize;
use tracing::debug;

use crate::editor::session::Session;
use crate::export::gating::record_success;
use crate::models::resume::{EducationEntry, EntryId, ExperienceEntry, LinkItem};
use crate::models::template::TemplateId;

// ────────────────────────────────────────────────────────────────────────────
// Patches
// ────────────────────────────────────────────────────────────────────────────

/// Top-level profile fields. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExperiencePatch {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub bullets: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EducationPatch {
    pub degree: Option<String>,
    pub school: Option<String>,
    pub year: Option<String>,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LinkPatch {
    pub label: Option<String>,
    pub url: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Actions
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    UpdateProfile(ProfilePatch),
    AddExperience(EntryId),
    UpdateExperience(EntryId, ExperiencePatch),
    RemoveExperience(EntryId),
    AddEducation(EntryId),
    UpdateEducation(EntryId, EducationPatch),
    RemoveEducation(EntryId),
    /// Trimmed before insertion; blank input and exact duplicates are ignored.
    AddSkill(String),
    RemoveSkill(usize),
    AddLink,
    UpdateLink(usize, LinkPatch),
    RemoveLink(usize),
    SelectTemplate(TemplateId),
    SetSubscription(bool),
    /// A PDF of `TemplateId` was saved; consumes a free credit if applicable.
    ExportSaved(TemplateId),
}

fn set(field: &mut String, value: Option<String>) {
    if let Some(v) = value {
        *field = v;
    }
}

/// Describes the entry `action` points at when the session has no such entry.
/// Actions that do not target an existing entry always pass.
pub fn missing_target(session: &Session, action: &Action) -> Option<String> {
    let doc = &session.document;
    match action {
        Action::UpdateExperience(id, _) | Action::RemoveExperience(id)
            if doc.experience_by_id(id).is_none() =>
        {
            Some(format!("Experience entry {id} not found"))
        }
        Action::UpdateEducation(id, _) | Action::RemoveEducation(id)
            if doc.education_by_id(id).is_none() =>
        {
            Some(format!("Education entry {id} not found"))
        }
        Action::RemoveSkill(index) if *index >= doc.skills.len() => {
            Some(format!("Skill {index} not found"))
        }
        Action::UpdateLink(index, _) | Action::RemoveLink(index) if *index >= doc.links.len() => {
            Some(format!("Link {index} not found"))
        }
        _ => None,
    }
}

/// Applies one action. Unknown ids and out-of-range indices leave the session
/// unchanged.
pub fn reduce(session: Session, action: Action) -> Session {
    let Session {
        mut document,
        mut template,
        mut gating,
    } = session;

    match action {
        Action::UpdateProfile(patch) => {
            set(&mut document.name, patch.name);
            set(&mut document.role, patch.role);
            set(&mut document.email, patch.email);
            set(&mut document.phone, patch.phone);
            set(&mut document.location, patch.location);
            set(&mut document.summary, patch.summary);
        }
        Action::AddExperience(id) => {
            if document.experience_by_id(&id).is_some() {
                debug!("Ignoring experience add with existing id {id}");
            } else {
                document.experience.push(ExperienceEntry::placeholder(id));
            }
        }
        Action::UpdateExperience(id, patch) => {
            if let Some(entry) = document.experience.iter_mut().find(|e| e.id == id) {
                set(&mut entry.title, patch.title);
                set(&mut entry.company, patch.company);
                set(&mut entry.start, patch.start);
                set(&mut entry.end, patch.end);
                if let Some(location) = patch.location {
                    entry.location = Some(location);
                }
                if let Some(bullets) = patch.bullets {
                    entry.bullets = bullets;
                }
            }
        }
        Action::RemoveExperience(id) => document.experience.retain(|e| e.id != id),
        Action::AddEducation(id) => {
            if document.education_by_id(&id).is_some() {
                debug!("Ignoring education add with existing id {id}");
            } else {
                document.education.push(EducationEntry::placeholder(id));
            }
        }
        Action::UpdateEducation(id, patch) => {
            if let Some(entry) = document.education.iter_mut().find(|e| e.id == id) {
                set(&mut entry.degree, patch.degree);
                set(&mut entry.school, patch.school);
                set(&mut entry.year, patch.year);
                if let Some(details) = patch.details {
                    entry.details = Some(details);
                }
            }
        }
        Action::RemoveEducation(id) => document.education.retain(|e| e.id != id),
        Action::AddSkill(raw) => {
            let skill = raw.trim();
            if !skill.is_empty() && !document.skills.iter().any(|s| s == skill) {
                document.skills.push(skill.to_string());
            }
        }
        Action::RemoveSkill(index) => {
            if index < document.skills.len() {
                document.skills.remove(index);
            }
        }
        Action::AddLink => document.links.push(LinkItem::placeholder()),
        Action::UpdateLink(index, patch) => {
            if let Some(link) = document.links.get_mut(index) {
                set(&mut link.label, patch.label);
                set(&mut link.url, patch.url);
            }
        }
        Action::RemoveLink(index) => {
            if index < document.links.len() {
                document.links.remove(index);
            }
        }
        Action::SelectTemplate(id) => template = id,
        Action::SetSubscription(active) => gating.subscription_active = active,
        Action::ExportSaved(exported) => gating = record_success(exported, &gating),
    }

    Session {
        document,
        template,
        gating,
    }
}
