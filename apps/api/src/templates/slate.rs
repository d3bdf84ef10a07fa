//! Slate Shaded: shaded header band, bar-marked headings, skills and education
//! sharing the closing section.

use crate::layout::tree::{Edges, LayoutNode, Rgb};
use crate::models::resume::ResumeDocument;
use crate::templates::blocks::*;

pub const WIDTH_PX: f32 = 820.0;

pub fn render(doc: &ResumeDocument) -> LayoutNode {
    let p = Palette {
        body: Rgb::SLATE_900,
        muted: Rgb::SLATE_600,
        heading: Rgb::SLATE_900,
        ..Palette::gray()
    };
    let heading = |label| section_heading(label, &p, HeadingKind::Barred(Rgb::SLATE_300));

    let mut band_rows = identity(doc, &p, 30.0);
    band_rows.push(contact_line(doc, p.meta().color(Rgb::SLATE_700), true));
    let band = boxed(stack(band_rows), Edges::xy(32.0, 24.0), Some(Rgb::SLATE_100));

    let closing = grid(
        vec![2, 1],
        vec![
            skill_chips(doc, &p),
            education_list(doc, &p, EducationFormat::DegreeOver),
        ],
        16.0,
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
                        entry_gap: 16.0,
                    },
                ),
                0.0,
            ),
            section(heading("Skills & Education"), closing, 0.0),
        ]),
        Edges::xy(32.0, 24.0),
        None,
    );

    boxed(stack(vec![band, body]), Edges::default(), Some(Rgb::WHITE))
}
