use serde::{Deserialize, Serialize};

use crate::export::gating::GatingState;
use crate::models::resume::ResumeDocument;
use crate::models::template::TemplateId;

/// Everything the editor owns: the document, the selected layout, and the
/// simulated paywall counters. Replaced wholesale by `actions::reduce`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub document: ResumeDocument,
    pub template: TemplateId,
    pub gating: GatingState,
}

impl Session {
    /// A brand-new session: seed document, default template, `free_exports` credits.
    pub fn fresh(free_exports: u32) -> Self {
        Session {
            document: ResumeDocument::seed(),
            template: TemplateId::default(),
            gating: GatingState::new(free_exports),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::fresh(GatingState::default().free_exports_remaining)
    }
}
