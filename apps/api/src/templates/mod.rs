//! Template renderers: one pure function per layout, selected by `TemplateId`.
//!
//! Every renderer shows the same fields (name, role, contact line, summary,
//! skills, experience, education) in insertion order and never mutates the
//! document. Empty sequences render as empty sections.

pub mod blocks;
pub mod cards;
pub mod compact;
pub mod elegant;
pub mod indigo;
pub mod minimal;
pub mod sidebar;
pub mod slate;

use crate::layout::tree::LayoutTree;
use crate::models::resume::ResumeDocument;
use crate::models::template::TemplateId;

/// Renders `doc` with the chosen layout. Document content only, no chrome.
pub fn render(template: TemplateId, doc: &ResumeDocument) -> LayoutTree {
    let (width_px, root) = match template {
        TemplateId::Minimal => (minimal::WIDTH_PX, minimal::render(doc)),
        TemplateId::Sidebar => (sidebar::WIDTH_PX, sidebar::render(doc)),
        TemplateId::Elegant => (elegant::WIDTH_PX, elegant::render(doc)),
        TemplateId::SlateShade => (slate::WIDTH_PX, slate::render(doc)),
        TemplateId::IndigoHeader => (indigo::WIDTH_PX, indigo::render(doc)),
        TemplateId::Cards => (cards::WIDTH_PX, cards::render(doc)),
        TemplateId::CompactTwoCol => (compact::WIDTH_PX, compact::render(doc)),
    };
    LayoutTree {
        template,
        width_px,
        root,
    }
}

/// Renders the on-screen preview: the document layout topped by the
/// export-hidden template badge.
pub fn render_preview(template: TemplateId, doc: &ResumeDocument) -> LayoutTree {
    let LayoutTree {
        template,
        width_px,
        root,
    } = render(template, doc);
    LayoutTree {
        template,
        width_px,
        root: blocks::stack(vec![blocks::template_badge(template), root]),
    }
}
