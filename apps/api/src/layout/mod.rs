// Layout: the box tree templates render into, glyph metrics, and the box
// layout pass that positions it for painting.

pub mod font_metrics;
pub mod measure;
pub mod tree;

pub use font_metrics::FontFamily;
pub use measure::{measure, MeasuredLayout, PaintOp, Rect};
pub use tree::{LayoutNode, LayoutTree, NodeContent, Rgb, TextSpan, TextStyle, Visibility};
