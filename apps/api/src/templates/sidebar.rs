//! Modern Sidebar: identity, skills and education in a shaded left rail;
//! summary and experience in the main column.

use crate::layout::tree::{Align, Edges, LayoutNode, Rgb};
use crate::models::resume::ResumeDocument;
use crate::templates::blocks::*;

pub const WIDTH_PX: f32 = 900.0;

pub fn render(doc: &ResumeDocument) -> LayoutNode {
    let p = Palette::gray();
    let heading = |label| section_heading(label, &p, HeadingKind::Ruled);

    let mut rail = identity(doc, &p, 24.0);
    rail.push(spaced(contact_column(doc, p.meta(), Align::Start), 16.0, 0.0));
    rail.push(spaced(section(heading("Skills"), skill_chips(doc, &p), 0.0), 24.0, 0.0));
    rail.push(spaced(
        section(heading("Education"), education_list(doc, &p, EducationFormat::DegreeOver), 0.0),
        24.0,
        0.0,
    ));
    let aside = boxed(stack(rail), Edges::all(24.0), Some(Rgb::SLATE_50));

    let main = boxed(
        stack(vec![
            section(heading("Summary"), paragraph(&doc.summary, &p), 16.0),
            section(
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
            ),
        ]),
        Edges::all(32.0),
        None,
    );

    // Columns touch: the rail's shading runs to the page edge.
    boxed(grid(vec![1, 2], vec![aside, main], 0.0), Edges::default(), Some(Rgb::WHITE))
}
