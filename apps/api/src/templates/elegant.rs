//! Elegant Serif: centred serif header, skills as tags above experience.

use crate::layout::tree::{Align, Border, BoxStyle, Edges, LayoutNode, Rgb};
use crate::layout::FontFamily;
use crate::models::resume::ResumeDocument;
use crate::templates::blocks::*;

pub const WIDTH_PX: f32 = 820.0;

pub fn render(doc: &ResumeDocument) -> LayoutNode {
    let p = Palette {
        family: FontFamily::Serif,
        chip_fill: Rgb::SLATE_100,
        body_px: 12.5,
        ..Palette::gray()
    };
    let heading = |label| section_heading(label, &p, HeadingKind::Plain);

    let mut name_rows = identity(doc, &p, 36.0);
    for row in &mut name_rows {
        row.style.align = Align::Center;
    }
    if let Some(role) = name_rows.get_mut(1) {
        if let crate::layout::NodeContent::Text { span } = &mut role.content {
            span.style = span.style.italic();
        }
    }
    let mut contact = contact_line(doc, p.meta(), true);
    contact.style.align = Align::Center;
    name_rows.push(contact);
    let header = stack(name_rows).with_style(BoxStyle {
        padding: Edges {
            bottom: 12.0,
            ..Default::default()
        },
        border_bottom: Some(Border {
            width: 1.0,
            color: Rgb::GRAY_200,
        }),
        ..Default::default()
    });

    let mut skills = skill_chips(doc, &p);
    skills.style.gap = 8.0;

    let body = stack(vec![
        header,
        spaced(section(heading("Professional Summary"), paragraph(&doc.summary, &p), 0.0), 16.0, 0.0),
        spaced(section(heading("Core Skills"), skills, 0.0), 16.0, 0.0),
        spaced(
            section(
                heading("Experience"),
                experience_list(
                    doc,
                    &p,
                    ExperienceFormat {
                        joiner: ", ",
                        entry_gap: 12.0,
                    },
                ),
                0.0,
            ),
            16.0,
            0.0,
        ),
        spaced(
            section(heading("Education"), education_list(doc, &p, EducationFormat::DegreeSchool), 0.0),
            16.0,
            0.0,
        ),
    ]);
    boxed(body, Edges::all(40.0), Some(Rgb::WHITE))
}
