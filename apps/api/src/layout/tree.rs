//! Layout tree produced by the template renderers.
//!
//! A tree of styled boxes and text, sized in CSS pixels. Renderers build it,
//! `measure` positions it, and the rasterizer paints it.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::FontFamily;
use crate::models::template::TemplateId;

// ────────────────────────────────────────────────────────────────────────────
// Styles
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const GRAY_100: Rgb = Rgb(243, 244, 246);
    pub const GRAY_200: Rgb = Rgb(229, 231, 235);
    pub const GRAY_600: Rgb = Rgb(75, 85, 99);
    pub const GRAY_700: Rgb = Rgb(55, 65, 81);
    pub const GRAY_900: Rgb = Rgb(17, 24, 39);
    pub const SLATE_50: Rgb = Rgb(248, 250, 252);
    pub const SLATE_100: Rgb = Rgb(241, 245, 249);
    pub const SLATE_300: Rgb = Rgb(203, 213, 225);
    pub const SLATE_600: Rgb = Rgb(71, 85, 105);
    pub const SLATE_700: Rgb = Rgb(51, 65, 85);
    pub const SLATE_900: Rgb = Rgb(15, 23, 42);
    pub const INDIGO_600: Rgb = Rgb(79, 70, 229);
    pub const INDIGO_700: Rgb = Rgb(67, 56, 202);
    pub const INDIGO_100: Rgb = Rgb(224, 231, 255);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weight {
    Regular,
    Semibold,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub family: FontFamily,
    pub size_px: f32,
    pub weight: Weight,
    pub italic: bool,
    pub uppercase: bool,
    pub underline: bool,
    pub color: Rgb,
    /// Line height as a multiple of `size_px`.
    pub leading: f32,
}

impl TextStyle {
    pub fn new(family: FontFamily, size_px: f32, color: Rgb) -> Self {
        TextStyle {
            family,
            size_px,
            weight: Weight::Regular,
            italic: false,
            uppercase: false,
            underline: false,
            color,
            leading: 1.5,
        }
    }

    pub fn weight(mut self, weight: Weight) -> Self {
        self.weight = weight;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn uppercase(mut self) -> Self {
        self.uppercase = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn leading(mut self, leading: f32) -> Self {
        self.leading = leading;
        self
    }

    pub fn line_height(&self) -> f32 {
        self.size_px * self.leading
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub fn all(v: f32) -> Self {
        Edges {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub fn xy(x: f32, y: f32) -> Self {
        Edges {
            top: y,
            right: x,
            bottom: y,
            left: x,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Border {
    pub width: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxStyle {
    pub padding: Edges,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub background: Option<Rgb>,
    pub border_bottom: Option<Border>,
    pub border_left: Option<Border>,
    /// Spacing between children (both axes for flow layouts).
    pub gap: f32,
    pub align: Align,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Visible,
    /// Occupies space but is not painted.
    Hidden,
}

// ────────────────────────────────────────────────────────────────────────────
// Nodes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    pub text: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeContent {
    /// Children laid out top to bottom.
    Stack { children: Vec<LayoutNode> },
    /// Children laid out left to right, wrapping onto new rows.
    Flow { children: Vec<LayoutNode> },
    /// `left` takes the remaining width, `right` hugs the far edge. Stacks when too narrow.
    Split {
        left: Box<LayoutNode>,
        right: Box<LayoutNode>,
    },
    /// Side-by-side columns sized by relative weight.
    Grid {
        weights: Vec<u16>,
        columns: Vec<LayoutNode>,
    },
    /// Word-wrapped paragraph.
    Text { span: TextSpan },
    /// Disc-marked list item.
    Bullet { span: TextSpan },
    /// Pill-shaped label.
    Chip { span: TextSpan, fill: Rgb },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub content: NodeContent,
    pub style: BoxStyle,
    /// Interactive chrome (badges, toolbars) that must not appear in exports.
    #[serde(default)]
    pub export_hidden: bool,
    #[serde(default)]
    pub visibility: Visibility,
}

impl LayoutNode {
    pub fn new(content: NodeContent) -> Self {
        LayoutNode {
            content,
            style: BoxStyle::default(),
            export_hidden: false,
            visibility: Visibility::Visible,
        }
    }

    pub fn with_style(mut self, style: BoxStyle) -> Self {
        self.style = style;
        self
    }

    pub fn chrome(mut self) -> Self {
        self.export_hidden = true;
        self
    }

    pub fn children(&self) -> Vec<&LayoutNode> {
        match &self.content {
            NodeContent::Stack { children } | NodeContent::Flow { children } => {
                children.iter().collect()
            }
            NodeContent::Split { left, right } => vec![left.as_ref(), right.as_ref()],
            NodeContent::Grid { columns, .. } => columns.iter().collect(),
            NodeContent::Text { .. } | NodeContent::Bullet { .. } | NodeContent::Chip { .. } => {
                Vec::new()
            }
        }
    }

    pub fn children_mut(&mut self) -> Vec<&mut LayoutNode> {
        match &mut self.content {
            NodeContent::Stack { children } | NodeContent::Flow { children } => {
                children.iter_mut().collect()
            }
            NodeContent::Split { left, right } => vec![left.as_mut(), right.as_mut()],
            NodeContent::Grid { columns, .. } => columns.iter_mut().collect(),
            NodeContent::Text { .. } | NodeContent::Bullet { .. } | NodeContent::Chip { .. } => {
                Vec::new()
            }
        }
    }

    pub fn span(&self) -> Option<&TextSpan> {
        match &self.content {
            NodeContent::Text { span } | NodeContent::Bullet { span } | NodeContent::Chip { span, .. } => {
                Some(span)
            }
            _ => None,
        }
    }

    fn collect_text<'a>(&'a self, include_chrome: bool, out: &mut Vec<&'a str>) {
        if self.export_hidden && !include_chrome {
            return;
        }
        if let Some(span) = self.span() {
            out.push(&span.text);
        }
        for child in self.children() {
            child.collect_text(include_chrome, out);
        }
    }

    /// Depth-first visit of this node and all descendants.
    pub fn visit_mut(&mut self, f: &mut dyn FnMut(&mut LayoutNode)) {
        f(self);
        for child in self.children_mut() {
            child.visit_mut(f);
        }
    }
}

/// A rendered resume: one template applied to one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutTree {
    pub template: TemplateId,
    pub width_px: f32,
    pub root: LayoutNode,
}

impl LayoutTree {
    /// Text of every document node, chrome excluded, in paint order.
    pub fn document_text(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.root.collect_text(false, &mut out);
        out
    }

    /// Text of every node including export-hidden chrome.
    pub fn all_text(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.root.collect_text(true, &mut out);
        out
    }

    /// Number of non-overlapping occurrences of `needle` across document text.
    pub fn count_occurrences(&self, needle: &str) -> usize {
        if needle.is_empty() {
            return 0;
        }
        self.document_text()
            .iter()
            .map(|t| t.matches(needle).count())
            .sum()
    }

    pub fn visit_mut(&mut self, f: &mut dyn FnMut(&mut LayoutNode)) {
        self.root.visit_mut(f);
    }

    pub fn has_hidden_nodes(&self) -> bool {
        fn any_hidden(node: &LayoutNode) -> bool {
            node.visibility == Visibility::Hidden || node.children().into_iter().any(any_hidden)
        }
        any_hidden(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> LayoutNode {
        LayoutNode::new(NodeContent::Text {
            span: TextSpan {
                text: s.to_string(),
                style: TextStyle::new(FontFamily::Sans, 12.0, Rgb::GRAY_900),
            },
        })
    }

    fn tree() -> LayoutTree {
        LayoutTree {
            template: TemplateId::Minimal,
            width_px: 800.0,
            root: LayoutNode::new(NodeContent::Stack {
                children: vec![
                    text("Badge").chrome(),
                    text("Alpha Beta"),
                    LayoutNode::new(NodeContent::Flow {
                        children: vec![text("Alpha"), text("Gamma")],
                    }),
                ],
            }),
        }
    }

    #[test]
    fn test_document_text_skips_chrome() {
        let t = tree();
        assert_eq!(t.document_text(), vec!["Alpha Beta", "Alpha", "Gamma"]);
        assert_eq!(t.all_text().len(), 4);
    }

    #[test]
    fn test_count_occurrences_sums_across_nodes() {
        let t = tree();
        assert_eq!(t.count_occurrences("Alpha"), 2);
        assert_eq!(t.count_occurrences("Badge"), 0);
        assert_eq!(t.count_occurrences(""), 0);
    }

    #[test]
    fn test_visit_mut_reaches_every_node() {
        let mut t = tree();
        let mut n = 0;
        t.visit_mut(&mut |_| n += 1);
        assert_eq!(n, 6);
    }

    #[test]
    fn test_has_hidden_nodes() {
        let mut t = tree();
        assert!(!t.has_hidden_nodes());
        t.visit_mut(&mut |node| {
            if node.export_hidden {
                node.visibility = Visibility::Hidden;
            }
        });
        assert!(t.has_hidden_nodes());
    }
}
