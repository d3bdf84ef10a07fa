//! Building blocks shared by the template renderers.

use crate::layout::tree::{
    Align, Border, BoxStyle, Edges, LayoutNode, NodeContent, Rgb, TextSpan, TextStyle, Weight,
};
use crate::layout::FontFamily;
use crate::models::resume::{EducationEntry, ExperienceEntry, ResumeDocument};
use crate::models::template::TemplateId;

/// Base body size shared by all layouts (`text-[12.2px]`).
pub const BODY_PX: f32 = 12.2;
pub const META_PX: f32 = 12.0;
pub const HEADING_PX: f32 = 13.0;

pub fn text(s: &str, style: TextStyle) -> LayoutNode {
    LayoutNode::new(NodeContent::Text {
        span: TextSpan {
            text: s.to_string(),
            style,
        },
    })
}

pub fn bullet(s: &str, style: TextStyle) -> LayoutNode {
    LayoutNode::new(NodeContent::Bullet {
        span: TextSpan {
            text: s.to_string(),
            style,
        },
    })
}

pub fn chip(s: &str, style: TextStyle, fill: Rgb) -> LayoutNode {
    LayoutNode::new(NodeContent::Chip {
        span: TextSpan {
            text: s.to_string(),
            style,
        },
        fill,
    })
}

pub fn stack(children: Vec<LayoutNode>) -> LayoutNode {
    LayoutNode::new(NodeContent::Stack { children })
}

pub fn flow(children: Vec<LayoutNode>, gap: f32) -> LayoutNode {
    LayoutNode::new(NodeContent::Flow { children }).with_style(BoxStyle {
        gap,
        ..Default::default()
    })
}

pub fn split(left: LayoutNode, right: LayoutNode) -> LayoutNode {
    LayoutNode::new(NodeContent::Split {
        left: Box::new(left),
        right: Box::new(right),
    })
    .with_style(BoxStyle {
        gap: 8.0,
        ..Default::default()
    })
}

pub fn grid(weights: Vec<u16>, columns: Vec<LayoutNode>, gap: f32) -> LayoutNode {
    LayoutNode::new(NodeContent::Grid { weights, columns }).with_style(BoxStyle {
        gap,
        ..Default::default()
    })
}

/// Applies margins without touching the rest of the node's style.
pub fn spaced(mut node: LayoutNode, top: f32, bottom: f32) -> LayoutNode {
    node.style.margin_top = top;
    node.style.margin_bottom = bottom;
    node
}

pub fn boxed(node: LayoutNode, padding: Edges, background: Option<Rgb>) -> LayoutNode {
    let mut node = node;
    node.style.padding = padding;
    node.style.background = background;
    node
}

// ────────────────────────────────────────────────────────────────────────────
// Palette
// ────────────────────────────────────────────────────────────────────────────

/// Per-template colours and type family.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub family: FontFamily,
    pub body: Rgb,
    pub muted: Rgb,
    pub heading: Rgb,
    pub chip_fill: Rgb,
    pub chip_text: Rgb,
    pub body_px: f32,
}

impl Palette {
    pub fn gray() -> Self {
        Palette {
            family: FontFamily::Sans,
            body: Rgb::GRAY_900,
            muted: Rgb::GRAY_600,
            heading: Rgb::GRAY_900,
            chip_fill: Rgb::GRAY_100,
            chip_text: Rgb::GRAY_700,
            body_px: BODY_PX,
        }
    }

    pub fn body(&self) -> TextStyle {
        TextStyle::new(self.family, self.body_px, self.body).leading(1.6)
    }

    pub fn strong(&self) -> TextStyle {
        self.body().weight(Weight::Semibold)
    }

    pub fn meta(&self) -> TextStyle {
        TextStyle::new(self.family, META_PX, self.muted)
    }

    pub fn role(&self) -> TextStyle {
        TextStyle::new(self.family, 14.0, Rgb::GRAY_700)
    }

    pub fn name(&self, size_px: f32) -> TextStyle {
        TextStyle::new(self.family, size_px, self.body)
            .weight(Weight::Bold)
            .leading(1.25)
    }

    pub fn heading(&self) -> TextStyle {
        TextStyle::new(self.family, HEADING_PX, self.heading)
            .weight(Weight::Semibold)
            .uppercase()
    }

    pub fn chip(&self, s: &str) -> LayoutNode {
        chip(s, TextStyle::new(self.family, META_PX, self.chip_text), self.chip_fill)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section headings
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub enum HeadingKind {
    /// Uppercase label over a hairline rule.
    Ruled,
    /// Uppercase label with a thick bar on its left.
    Barred(Rgb),
    /// Uppercase label, no decoration.
    Plain,
}

pub fn section_heading(label: &str, palette: &Palette, kind: HeadingKind) -> LayoutNode {
    let node = text(label, palette.heading());
    match kind {
        HeadingKind::Ruled => node.with_style(BoxStyle {
            margin_bottom: 4.0,
            border_bottom: Some(Border {
                width: 1.0,
                color: Rgb::GRAY_200,
            }),
            ..Default::default()
        }),
        HeadingKind::Barred(color) => node.with_style(BoxStyle {
            padding: Edges {
                left: 12.0,
                ..Default::default()
            },
            margin_bottom: 12.0,
            border_left: Some(Border { width: 4.0, color }),
            ..Default::default()
        }),
        HeadingKind::Plain => node.with_style(BoxStyle {
            margin_bottom: 4.0,
            ..Default::default()
        }),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document sections
// ────────────────────────────────────────────────────────────────────────────

/// Name, role and contact block for the page header.
pub fn identity(doc: &ResumeDocument, palette: &Palette, name_px: f32) -> Vec<LayoutNode> {
    vec![
        text(&doc.name, palette.name(name_px)),
        spaced(text(&doc.role, palette.role()), 2.0, 0.0),
    ]
}

/// Contact items as a single wrapped line separated by bullets.
pub fn contact_line(doc: &ResumeDocument, style: TextStyle, with_links: bool) -> LayoutNode {
    let mut items = vec![
        text(&doc.email, style),
        text("•", style),
        text(&doc.phone, style),
        text("•", style),
        text(&doc.location, style),
    ];
    if with_links {
        for link in &doc.links {
            items.push(text("•", style));
            items.push(text(&link.label, style.underline()));
        }
    }
    spaced(flow(items, 12.0), 8.0, 0.0)
}

/// Contact items one per line (sidebars and compact headers).
pub fn contact_column(doc: &ResumeDocument, style: TextStyle, align: Align) -> LayoutNode {
    let mut rows = vec![
        text(&doc.email, style),
        text(&doc.phone, style),
        text(&doc.location, style),
    ];
    for link in &doc.links {
        rows.push(text(&link.label, style.underline()));
    }
    for row in &mut rows {
        row.style.align = align;
    }
    stack(rows)
}

#[derive(Debug, Clone, Copy)]
pub struct ExperienceFormat {
    /// Joins title and company, e.g. " • " or ", ".
    pub joiner: &'static str,
    pub entry_gap: f32,
}

pub fn experience_entry(exp: &ExperienceEntry, palette: &Palette, fmt: ExperienceFormat) -> LayoutNode {
    let mut dates = format!("{} – {}", exp.start, exp.end);
    if let Some(location) = exp.location_text() {
        dates.push_str(" • ");
        dates.push_str(location);
    }
    let heading = split(
        text(&format!("{}{}{}", exp.title, fmt.joiner, exp.company), palette.strong()),
        text(&dates, palette.meta()),
    );
    let bullets: Vec<LayoutNode> = exp.bullets.iter().map(|b| bullet(b, palette.body())).collect();
    spaced(stack(vec![heading, stack(bullets)]), 0.0, fmt.entry_gap)
}

pub fn experience_list(doc: &ResumeDocument, palette: &Palette, fmt: ExperienceFormat) -> LayoutNode {
    stack(
        doc.experience
            .iter()
            .map(|exp| experience_entry(exp, palette, fmt))
            .collect(),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationFormat {
    /// "Degree – School" over the year.
    DegreeSchool,
    /// "Degree" over "School • Year".
    DegreeOver,
}

pub fn education_entry(ed: &EducationEntry, palette: &Palette, fmt: EducationFormat) -> LayoutNode {
    let mut rows = match fmt {
        EducationFormat::DegreeSchool => vec![
            text(&format!("{} – {}", ed.degree, ed.school), palette.strong()),
            text(&ed.year, palette.meta()),
        ],
        EducationFormat::DegreeOver => vec![
            text(&ed.degree, palette.strong()),
            text(&format!("{} • {}", ed.school, ed.year), palette.meta()),
        ],
    };
    if let Some(details) = ed.details_text() {
        rows.push(text(details, palette.meta()));
    }
    spaced(stack(rows), 0.0, 8.0)
}

pub fn education_list(doc: &ResumeDocument, palette: &Palette, fmt: EducationFormat) -> LayoutNode {
    stack(
        doc.education
            .iter()
            .map(|ed| education_entry(ed, palette, fmt))
            .collect(),
    )
}

pub fn skill_chips(doc: &ResumeDocument, palette: &Palette) -> LayoutNode {
    flow(doc.skills.iter().map(|s| palette.chip(s)).collect(), 6.0)
}

pub fn paragraph(s: &str, palette: &Palette) -> LayoutNode {
    text(s, palette.body())
}

/// Heading plus body, with a trailing gap.
pub fn section(heading: LayoutNode, body: LayoutNode, bottom: f32) -> LayoutNode {
    spaced(stack(vec![heading, body]), 0.0, bottom)
}

/// Preview-only badge naming the template; hidden during export.
pub fn template_badge(template: TemplateId) -> LayoutNode {
    let style = TextStyle::new(FontFamily::Sans, 11.0, Rgb::INDIGO_700).weight(Weight::Semibold);
    let label = format!("{} · {}", template.display_name(), template.badge());
    let mut badge = flow(vec![chip(&label, style, Rgb::INDIGO_100)], 0.0).chrome();
    badge.style.align = Align::End;
    badge.style.padding = Edges::xy(8.0, 6.0);
    badge
}
