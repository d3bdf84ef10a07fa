//! Indigo Header: solid indigo banner with white identity text.

use crate::layout::tree::{Edges, LayoutNode, Rgb, TextStyle};
use crate::models::resume::ResumeDocument;
use crate::templates::blocks::*;

pub const WIDTH_PX: f32 = 820.0;

pub fn render(doc: &ResumeDocument) -> LayoutNode {
    let p = Palette {
        heading: Rgb::INDIGO_700,
        ..Palette::gray()
    };
    let on_banner = |style: TextStyle| style.color(Rgb::WHITE);
    let heading = |label| section_heading(label, &p, HeadingKind::Plain);

    let banner = boxed(
        stack(vec![
            text(&doc.name, on_banner(p.name(30.0))),
            spaced(text(&doc.role, on_banner(p.role())), 2.0, 0.0),
            contact_line(doc, on_banner(p.meta()), true),
        ]),
        Edges::xy(32.0, 24.0),
        Some(Rgb::INDIGO_600),
    );

    let body = boxed(
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
            grid(
                vec![2, 1],
                vec![
                    section(heading("Education"), education_list(doc, &p, EducationFormat::DegreeSchool), 0.0),
                    section(heading("Skills"), skill_chips(doc, &p), 0.0),
                ],
                16.0,
            ),
        ]),
        Edges::xy(32.0, 24.0),
        None,
    );

    boxed(stack(vec![banner, body]), Edges::default(), Some(Rgb::WHITE))
}
