//! Box layout: turns a `LayoutTree` into absolutely positioned paint operations.
//!
//! Coordinates are CSS pixels from the top-left corner of the tree. Hidden
//! nodes keep their space but emit no paint operations, which is how
//! export-hidden chrome disappears from a capture without shifting content.

use serde::Serialize;

use crate::layout::font_metrics::{display_text, measure_px, wrap_lines, FIT_TOLERANCE_PX};
use crate::layout::tree::{
    Align, LayoutNode, LayoutTree, NodeContent, Rgb, TextSpan, TextStyle, Visibility,
};

/// Left indent of a bullet's text (Tailwind `ml-5`).
const BULLET_INDENT: f32 = 20.0;
const CHIP_PAD_X: f32 = 10.0;
const CHIP_PAD_Y: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PaintOp {
    Fill { rect: Rect, color: Rgb },
    /// One laid-out line of text; `y` is the top of the line box.
    Text {
        x: f32,
        y: f32,
        line: String,
        style: TextStyle,
    },
    Disc { cx: f32, cy: f32, r: f32, color: Rgb },
}

#[derive(Debug, Clone, Serialize)]
pub struct MeasuredLayout {
    pub width: f32,
    pub height: f32,
    pub ops: Vec<PaintOp>,
}

/// Lays out the whole tree at its declared width.
pub fn measure(tree: &LayoutTree) -> MeasuredLayout {
    let mut ops = Vec::new();
    let height = place(&tree.root, 0.0, 0.0, tree.width_px, true, &mut ops);
    MeasuredLayout {
        width: tree.width_px,
        height,
        ops,
    }
}

/// Places `node` with its margin box starting at (`x`, `y`). Returns the
/// margin-box height.
fn place(node: &LayoutNode, x: f32, y: f32, width: f32, painted: bool, ops: &mut Vec<PaintOp>) -> f32 {
    let painted = painted && node.visibility == Visibility::Visible;
    let style = &node.style;
    let top = y + style.margin_top;
    let pad = style.padding;

    // Background must be painted beneath the content, but its height is only
    // known afterwards: reserve the slot now.
    let bg_slot = match (painted, style.background) {
        (true, Some(_)) => {
            ops.push(PaintOp::Fill {
                rect: Rect { x, y: top, w: width, h: 0.0 },
                color: Rgb::WHITE,
            });
            Some(ops.len() - 1)
        }
        _ => None,
    };

    let inner_x = x + pad.left;
    let inner_w = (width - pad.left - pad.right).max(0.0);
    let content_h = place_content(node, inner_x, top + pad.top, inner_w, painted, ops);
    let box_h = pad.top + content_h + pad.bottom;

    if let (Some(slot), Some(color)) = (bg_slot, style.background) {
        ops[slot] = PaintOp::Fill {
            rect: Rect { x, y: top, w: width, h: box_h },
            color,
        };
    }
    if painted {
        if let Some(border) = style.border_left {
            ops.push(PaintOp::Fill {
                rect: Rect { x, y: top, w: border.width, h: box_h },
                color: border.color,
            });
        }
        if let Some(border) = style.border_bottom {
            ops.push(PaintOp::Fill {
                rect: Rect { x, y: top + box_h - border.width, w: width, h: border.width },
                color: border.color,
            });
        }
    }

    style.margin_top + box_h + style.margin_bottom
}

fn place_content(
    node: &LayoutNode,
    x: f32,
    y: f32,
    width: f32,
    painted: bool,
    ops: &mut Vec<PaintOp>,
) -> f32 {
    let gap = node.style.gap;
    match &node.content {
        NodeContent::Stack { children } => {
            let mut cursor = y;
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    cursor += gap;
                }
                cursor += place(child, x, cursor, width, painted, ops);
            }
            cursor - y
        }
        NodeContent::Flow { children } => place_flow(children, x, y, width, gap, node.style.align, painted, ops),
        NodeContent::Split { left, right } => {
            let right_w = natural_width(right).min(width);
            let left_w = width - right_w - gap;
            if left_w < width * 0.4 {
                let h = place(left, x, y, width, painted, ops);
                h + place(right, x, y + h, width, painted, ops)
            } else {
                let lh = place(left, x, y, left_w, painted, ops);
                let rh = place(right, x + width - right_w, y, right_w, painted, ops);
                lh.max(rh)
            }
        }
        NodeContent::Grid { weights, columns } => {
            let total: f32 = weights.iter().map(|w| *w as f32).sum::<f32>().max(1.0);
            let gaps = gap * columns.len().saturating_sub(1) as f32;
            let free = (width - gaps).max(0.0);
            let mut cx = x;
            let mut tallest = 0.0_f32;
            for (i, column) in columns.iter().enumerate() {
                let weight = weights.get(i).copied().unwrap_or(1) as f32;
                let cw = free * weight / total;
                tallest = tallest.max(place(column, cx, y, cw, painted, ops));
                cx += cw + gap;
            }
            tallest
        }
        NodeContent::Text { span } => place_text(span, x, y, width, node.style.align, painted, ops),
        NodeContent::Bullet { span } => {
            let h = place_text(span, x + BULLET_INDENT, y, width - BULLET_INDENT, Align::Start, painted, ops);
            if painted && h > 0.0 {
                let lh = span.style.line_height();
                ops.push(PaintOp::Disc {
                    cx: x + BULLET_INDENT - 9.0,
                    cy: y + lh / 2.0,
                    r: (span.style.size_px * 0.16).max(1.5),
                    color: span.style.color,
                });
            }
            h
        }
        NodeContent::Chip { span, fill } => {
            let text_w = measure_px(&display_text(&span.text, &span.style), &span.style);
            let w = (text_w + 2.0 * CHIP_PAD_X).min(width);
            // A label clamped to a narrow column wraps; the fill grows with it.
            let slot = painted.then(|| {
                ops.push(PaintOp::Fill {
                    rect: Rect { x, y, w, h: 0.0 },
                    color: *fill,
                });
                ops.len() - 1
            });
            let text_h = place_text(span, x + CHIP_PAD_X, y + CHIP_PAD_Y, w - 2.0 * CHIP_PAD_X, Align::Start, painted, ops);
            let h = text_h.max(span.style.line_height()) + 2.0 * CHIP_PAD_Y;
            if let Some(slot) = slot {
                ops[slot] = PaintOp::Fill {
                    rect: Rect { x, y, w, h },
                    color: *fill,
                };
            }
            h
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn place_flow(
    children: &[LayoutNode],
    x: f32,
    y: f32,
    width: f32,
    gap: f32,
    align: Align,
    painted: bool,
    ops: &mut Vec<PaintOp>,
) -> f32 {
    // Break children into rows first so each row can be aligned as a whole.
    let mut rows: Vec<Vec<(&LayoutNode, f32)>> = vec![Vec::new()];
    let mut row_w = 0.0_f32;
    for child in children {
        let w = natural_width(child).min(width);
        let row = rows.last_mut().map(|r| r.len()).unwrap_or(0);
        if row > 0 && row_w + gap + w > width + FIT_TOLERANCE_PX {
            rows.push(Vec::new());
            row_w = 0.0;
        }
        if let Some(current) = rows.last_mut() {
            if !current.is_empty() {
                row_w += gap;
            }
            current.push((child, w));
        }
        row_w += w;
    }

    let mut cursor = y;
    for (i, row) in rows.iter().filter(|r| !r.is_empty()).enumerate() {
        if i > 0 {
            cursor += gap;
        }
        let used: f32 = row.iter().map(|(_, w)| *w).sum::<f32>() + gap * (row.len() - 1) as f32;
        let mut cx = match align {
            Align::Start => x,
            Align::Center => x + (width - used).max(0.0) / 2.0,
            Align::End => x + (width - used).max(0.0),
        };
        let mut tallest = 0.0_f32;
        for (child, w) in row {
            tallest = tallest.max(place(child, cx, cursor, *w, painted, ops));
            cx += w + gap;
        }
        cursor += tallest;
    }
    cursor - y
}

fn place_text(
    span: &TextSpan,
    x: f32,
    y: f32,
    width: f32,
    align: Align,
    painted: bool,
    ops: &mut Vec<PaintOp>,
) -> f32 {
    let lines = wrap_lines(&span.text, &span.style, width);
    let lh = span.style.line_height();
    if painted {
        for (i, line) in lines.iter().enumerate() {
            let line_w = measure_px(line, &span.style);
            let lx = match align {
                Align::Start => x,
                Align::Center => x + (width - line_w).max(0.0) / 2.0,
                Align::End => x + (width - line_w).max(0.0),
            };
            ops.push(PaintOp::Text {
                x: lx,
                y: y + lh * i as f32,
                line: line.clone(),
                style: span.style,
            });
        }
    }
    lh * lines.len() as f32
}

/// Width a node wants when nothing constrains it.
fn natural_width(node: &LayoutNode) -> f32 {
    let pad = node.style.padding.left + node.style.padding.right;
    let inner = match &node.content {
        NodeContent::Text { span } => measure_px(&display_text(&span.text, &span.style), &span.style),
        NodeContent::Bullet { span } => {
            BULLET_INDENT + measure_px(&display_text(&span.text, &span.style), &span.style)
        }
        NodeContent::Chip { span, .. } => {
            measure_px(&display_text(&span.text, &span.style), &span.style) + 2.0 * CHIP_PAD_X
        }
        NodeContent::Stack { children } => children.iter().map(natural_width).fold(0.0, f32::max),
        NodeContent::Flow { children } => {
            let widths: f32 = children.iter().map(natural_width).sum();
            widths + node.style.gap * children.len().saturating_sub(1) as f32
        }
        NodeContent::Split { left, right } => natural_width(left) + node.style.gap + natural_width(right),
        NodeContent::Grid { columns, .. } => {
            let widths: f32 = columns.iter().map(natural_width).sum();
            widths + node.style.gap * columns.len().saturating_sub(1) as f32
        }
    };
    inner + pad
}
