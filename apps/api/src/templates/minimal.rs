//! ATS Minimal: single column, ruled section headings, skills beside education.

use crate::layout::tree::{Border, BoxStyle, Edges, LayoutNode, Rgb};
use crate::models::resume::ResumeDocument;
use crate::templates::blocks::*;

pub const WIDTH_PX: f32 = 800.0;

pub fn render(doc: &ResumeDocument) -> LayoutNode {
    let p = Palette::gray();
    let fmt = ExperienceFormat {
        joiner: " • ",
        entry_gap: 12.0,
    };

    let mut header_rows = identity(doc, &p, 30.0);
    header_rows.push(contact_line(doc, p.meta(), true));
    let header = stack(header_rows).with_style(BoxStyle {
        padding: Edges {
            bottom: 8.0,
            ..Default::default()
        },
        border_bottom: Some(Border {
            width: 1.0,
            color: Rgb::GRAY_200,
        }),
        ..Default::default()
    });

    let heading = |label| section_heading(label, &p, HeadingKind::Ruled);
    let body = stack(vec![
        header,
        spaced(section(heading("Summary"), paragraph(&doc.summary, &p), 0.0), 16.0, 0.0),
        spaced(section(heading("Experience"), experience_list(doc, &p, fmt), 0.0), 16.0, 0.0),
        spaced(
            grid(
                vec![2, 1],
                vec![
                    section(heading("Education"), education_list(doc, &p, EducationFormat::DegreeSchool), 0.0),
                    section(heading("Skills"), skill_chips(doc, &p), 0.0),
                ],
                16.0,
            ),
            16.0,
            0.0,
        ),
    ]);
    boxed(body, Edges::all(32.0), Some(Rgb::WHITE))
}
