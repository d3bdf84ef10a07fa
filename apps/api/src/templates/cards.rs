//! Card Sections: every section sits on its own shaded card.

use crate::layout::tree::{Edges, LayoutNode, Rgb};
use crate::models::resume::ResumeDocument;
use crate::templates::blocks::*;

pub const WIDTH_PX: f32 = 820.0;

fn card(node: LayoutNode) -> LayoutNode {
    boxed(node, Edges::all(16.0), Some(Rgb::SLATE_50))
}

pub fn render(doc: &ResumeDocument) -> LayoutNode {
    let p = Palette::gray();
    let heading = |label| section_heading(label, &p, HeadingKind::Plain);

    let mut header_rows = identity(doc, &p, 30.0);
    header_rows.push(contact_line(doc, p.meta(), true));
    let header = spaced(
        boxed(stack(header_rows), Edges::all(20.0), Some(Rgb::SLATE_50)),
        0.0,
        16.0,
    );

    let mut cards = stack(vec![
        card(section(heading("Summary"), paragraph(&doc.summary, &p), 0.0)),
        card(section(
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
        )),
        grid(
            vec![2, 1],
            vec![
                card(section(heading("Education"), education_list(doc, &p, EducationFormat::DegreeSchool), 0.0)),
                card(section(heading("Skills"), skill_chips(doc, &p), 0.0)),
            ],
            16.0,
        ),
    ]);
    cards.style.gap = 16.0;

    boxed(stack(vec![header, cards]), Edges::all(24.0), Some(Rgb::WHITE))
}
