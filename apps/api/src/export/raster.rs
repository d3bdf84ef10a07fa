//! Rasterizing a layout tree into an RGB bitmap.
//!
//! `InkRasterizer` paints the measured layout with solid shapes: fills and
//! rules as rectangles, bullet discs, and each glyph as an ink block sized
//! from the family metrics. It has no font files to load, so output is
//! deterministic across machines.

use tracing::debug;

use crate::export::ExportError;
use crate::layout::font_metrics::get_metrics;
use crate::layout::{measure, LayoutTree, MeasuredLayout, PaintOp, Rect, Rgb, TextStyle};

/// Capture resolution multiplier.
pub const CAPTURE_SCALE: f32 = 2.0;

/// Upper bound on captured pixels; a layout that would exceed it is refused.
const MAX_PIXELS: u64 = 80_000_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureOptions {
    pub scale: f32,
    pub background: Rgb,
    /// Size of the captured area in layout pixels.
    pub window_width: f32,
    pub window_height: f32,
}

impl CaptureOptions {
    /// Options capturing the whole of a measured layout at 2x on white.
    pub fn for_layout(layout: &MeasuredLayout) -> Self {
        CaptureOptions {
            scale: CAPTURE_SCALE,
            background: Rgb::WHITE,
            window_width: layout.width,
            window_height: layout.height,
        }
    }
}

/// Packed 8-bit RGB, row-major, top row first.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Bitmap {
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
        for _ in 0..(width as usize * height as usize) {
            pixels.extend_from_slice(&[color.0, color.1, color.2]);
        }
        Bitmap {
            width,
            height,
            pixels,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        Some(Rgb(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]))
    }

    /// Fills the pixel-space rectangle `[x0, x1) × [y0, y1)`, clipped to the bitmap.
    fn fill(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgb) {
        let clamp_x = |v: f32| v.round().clamp(0.0, self.width as f32) as usize;
        let clamp_y = |v: f32| v.round().clamp(0.0, self.height as f32) as usize;
        let (x0, x1) = (clamp_x(x0), clamp_x(x1));
        let (y0, y1) = (clamp_y(y0), clamp_y(y1));
        let stride = self.width as usize * 3;
        for y in y0..y1 {
            for x in x0..x1 {
                let i = y * stride + x * 3;
                self.pixels[i] = color.0;
                self.pixels[i + 1] = color.1;
                self.pixels[i + 2] = color.2;
            }
        }
    }

    fn fill_disc(&mut self, cx: f32, cy: f32, r: f32, color: Rgb) {
        let top = (cy - r).floor().max(0.0) as i64;
        let bottom = ((cy + r).ceil() as i64).min(self.height as i64);
        for y in top..bottom {
            let dy = y as f32 + 0.5 - cy;
            let half = (r * r - dy * dy).max(0.0).sqrt();
            self.fill(cx - half, y as f32, cx + half, y as f32 + 1.0, color);
        }
    }
}

/// Turns a rendered layout into pixels.
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, tree: &LayoutTree, options: &CaptureOptions) -> Result<Bitmap, ExportError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InkRasterizer;

impl InkRasterizer {
    fn paint_text(bitmap: &mut Bitmap, x: f32, y: f32, line: &str, style: &TextStyle, scale: f32) {
        let metrics = get_metrics(style.family);
        let size = style.size_px;
        let baseline = y + (style.line_height() + metrics.cap_height * size) / 2.0;
        let mut pen = x;
        for c in line.chars() {
            let advance = metrics.glyph_em(c) * size;
            let ink = metrics.ink_height(c) * size;
            if ink > 0.0 {
                // leave side bearings so words stay legible as blocks
                let inset = advance * 0.12;
                let slant = if style.italic { ink * 0.2 } else { 0.0 };
                bitmap.fill(
                    (pen + inset + slant) * scale,
                    (baseline - ink) * scale,
                    (pen + advance - inset + slant) * scale,
                    baseline * scale,
                    style.color,
                );
            }
            pen += advance;
        }
        if style.underline {
            let rule_y = baseline + size * 0.12;
            bitmap.fill(x * scale, rule_y * scale, pen * scale, (rule_y + 1.0) * scale, style.color);
        }
    }

    fn paint(bitmap: &mut Bitmap, layout: &MeasuredLayout, scale: f32) {
        for op in &layout.ops {
            match op {
                PaintOp::Fill {
                    rect: Rect { x, y, w, h },
                    color,
                } => bitmap.fill(x * scale, y * scale, (x + w) * scale, (y + h) * scale, *color),
                PaintOp::Disc { cx, cy, r, color } => {
                    bitmap.fill_disc(cx * scale, cy * scale, r * scale, *color)
                }
                PaintOp::Text { x, y, line, style } => {
                    Self::paint_text(bitmap, *x, *y, line, style, scale)
                }
            }
        }
    }
}

impl Rasterizer for InkRasterizer {
    fn rasterize(&self, tree: &LayoutTree, options: &CaptureOptions) -> Result<Bitmap, ExportError> {
        if !(options.scale > 0.0) {
            return Err(ExportError::Capture(format!("invalid scale {}", options.scale)));
        }
        let layout = measure(tree);
        let width = (options.window_width * options.scale).ceil().max(1.0) as u32;
        let height = (options.window_height * options.scale).ceil().max(1.0) as u32;
        if u64::from(width) * u64::from(height) > MAX_PIXELS {
            return Err(ExportError::Capture(format!(
                "capture of {width}x{height} px exceeds the pixel limit"
            )));
        }

        let mut bitmap = Bitmap::filled(width, height, options.background);
        Self::paint(&mut bitmap, &layout, options.scale);
        debug!(width, height, ops = layout.ops.len(), "layout rasterized");
        Ok(bitmap)
    }
}
