//! Slicing one tall capture into fixed-size pages.
//!
//! The capture is scaled to the page width. Every page shows the whole image,
//! shifted up by one page height per page, so page `i` displays the slice
//! `[i * page_height, (i + 1) * page_height)`.

use serde::Serialize;

const MM_PER_INCH: f32 = 25.4;
const PT_PER_INCH: f32 = 72.0;

/// Heights within this distance of a page boundary do not spill onto a new page.
const BOUNDARY_EPSILON_MM: f32 = 1e-3;

pub fn mm_to_pt(mm: f32) -> f32 {
    mm * PT_PER_INCH / MM_PER_INCH
}

/// Page size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageFormat {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl PageFormat {
    pub const A4_PORTRAIT: PageFormat = PageFormat {
        width_mm: 210.0,
        height_mm: 297.0,
    };

    pub fn width_pt(&self) -> f32 {
        mm_to_pt(self.width_mm)
    }

    pub fn height_pt(&self) -> f32 {
        mm_to_pt(self.height_mm)
    }
}

/// Where the image goes on one page. `y_mm` is measured down from the page
/// top and is zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub page: usize,
    pub x_mm: f32,
    pub y_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagePlan {
    pub format: PageFormat,
    /// Image height once scaled to the page width.
    pub image_height_mm: f32,
    pub placements: Vec<Placement>,
}

impl PagePlan {
    pub fn page_count(&self) -> usize {
        self.placements.len()
    }
}

/// `ceil(image_height_mm / page_height_mm)`, never less than one.
pub fn page_count(image_height_mm: f32, page_height_mm: f32) -> usize {
    if image_height_mm <= page_height_mm + BOUNDARY_EPSILON_MM {
        return 1;
    }
    ((image_height_mm - BOUNDARY_EPSILON_MM) / page_height_mm).ceil() as usize
}

/// Lays a `width_px` × `height_px` capture out over as many pages as it needs.
pub fn plan(width_px: u32, height_px: u32, format: PageFormat) -> PagePlan {
    let ratio = if width_px == 0 {
        0.0
    } else {
        format.width_mm / width_px as f32
    };
    let image_height_mm = height_px as f32 * ratio;
    let pages = page_count(image_height_mm, format.height_mm);
    let placements = (0..pages)
        .map(|page| Placement {
            page,
            x_mm: 0.0,
            y_mm: -(page as f32) * format.height_mm,
            width_mm: format.width_mm,
            height_mm: image_height_mm,
        })
        .collect();
    PagePlan {
        format,
        image_height_mm,
        placements,
    }
}
