//! Compact 2-Col: experience on the wide left, summary/skills/education on the right.

use crate::layout::tree::{Align, Edges, LayoutNode, Rgb};
use crate::models::resume::ResumeDocument;
use crate::templates::blocks::*;

pub const WIDTH_PX: f32 = 820.0;

pub fn render(doc: &ResumeDocument) -> LayoutNode {
    let p = Palette::gray();
    let heading = |label| section_heading(label, &p, HeadingKind::Ruled);

    let header = spaced(
        split(
            stack(identity(doc, &p, 24.0)),
            contact_column(doc, p.meta(), Align::End),
        ),
        0.0,
        12.0,
    );

    let left = section(
        heading("Experience"),
        experience_list(
            doc,
            &p,
            ExperienceFormat {
                joiner: " – ",
                entry_gap: 12.0,
            },
        ),
        0.0,
    );
    let right = stack(vec![
        section(heading("Summary"), paragraph(&doc.summary, &p), 12.0),
        section(heading("Skills"), skill_chips(doc, &p), 12.0),
        section(heading("Education"), education_list(doc, &p, EducationFormat::DegreeOver), 0.0),
    ]);

    boxed(
        stack(vec![header, grid(vec![3, 2], vec![left, right], 16.0)]),
        Edges::all(24.0),
        Some(Rgb::WHITE),
    )
}
