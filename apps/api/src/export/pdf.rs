//! Paged document assembly.
//!
//! `PageAssembler` opens a document in a fixed page format; images are
//! embedded once and then placed on any number of pages in millimetre
//! coordinates measured from the top-left corner.

use std::io::Write;

use chrono::{DateTime, Utc};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::export::pagination::{mm_to_pt, PageFormat};
use crate::export::raster::Bitmap;
use crate::export::ExportError;

/// An image embedded in a `PagedDocument`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHandle(usize);

pub trait PagedDocument: Send {
    fn embed_image(&mut self, bitmap: &Bitmap) -> Result<ImageHandle, ExportError>;

    /// Draws `image` on the current page. The box may extend past the page
    /// edges; whatever falls outside is clipped by the page.
    fn place_image(
        &mut self,
        image: ImageHandle,
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        height_mm: f32,
    ) -> Result<(), ExportError>;

    /// Starts a new, empty page which becomes the current page.
    fn add_page(&mut self);

    fn page_count(&self) -> usize;

    fn finish(self: Box<Self>) -> Result<Vec<u8>, ExportError>;
}

pub trait PageAssembler: Send + Sync {
    /// Opens a document holding one empty page.
    fn begin(&self, format: PageFormat) -> Box<dyn PagedDocument>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfAssembler;

impl PageAssembler for LopdfAssembler {
    fn begin(&self, format: PageFormat) -> Box<dyn PagedDocument> {
        Box::new(LopdfDocument::new(format))
    }
}

struct LopdfDocument {
    format: PageFormat,
    doc: Document,
    pages_id: ObjectId,
    images: Vec<ObjectId>,
    /// Content operations per page, in page order.
    pages: Vec<Vec<Operation>>,
}

/// PDF date string, e.g. `D:20240131094500+00'00'`.
fn pdf_date(at: DateTime<Utc>) -> String {
    at.format("D:%Y%m%d%H%M%S+00'00'").to_string()
}

fn image_name(index: usize) -> String {
    format!("Im{index}")
}

impl LopdfDocument {
    fn new(format: PageFormat) -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        LopdfDocument {
            format,
            doc,
            pages_id,
            images: Vec::new(),
            pages: vec![Vec::new()],
        }
    }

    fn media_box(&self) -> Object {
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(self.format.width_pt()),
            Object::Real(self.format.height_pt()),
        ])
    }
}

impl PagedDocument for LopdfDocument {
    fn embed_image(&mut self, bitmap: &Bitmap) -> Result<ImageHandle, ExportError> {
        let expected = bitmap.width as usize * bitmap.height as usize * 3;
        if bitmap.width == 0 || bitmap.height == 0 || bitmap.pixels.len() != expected {
            return Err(ExportError::Assembly(format!(
                "malformed bitmap {}x{} with {} bytes",
                bitmap.width,
                bitmap.height,
                bitmap.pixels.len()
            )));
        }

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(&bitmap.pixels)
            .map_err(|e| ExportError::Assembly(format!("image compression failed: {e}")))?;
        let compressed = encoder
            .finish()
            .map_err(|e| ExportError::Assembly(format!("image compression failed: {e}")))?;

        let dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => Object::Integer(i64::from(bitmap.width)),
            "Height" => Object::Integer(i64::from(bitmap.height)),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => Object::Integer(8),
            "Filter" => "FlateDecode",
        };
        let image_id = self
            .doc
            .add_object(Stream::new(dict, compressed).with_compression(false));
        self.images.push(image_id);
        Ok(ImageHandle(self.images.len() - 1))
    }

    fn place_image(
        &mut self,
        image: ImageHandle,
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        height_mm: f32,
    ) -> Result<(), ExportError> {
        if image.0 >= self.images.len() {
            return Err(ExportError::Assembly(format!("unknown image {}", image.0)));
        }
        let w = mm_to_pt(width_mm);
        let h = mm_to_pt(height_mm);
        let x = mm_to_pt(x_mm);
        // PDF space grows upward from the bottom edge
        let y = self.format.height_pt() - mm_to_pt(y_mm) - h;
        let ops = self
            .pages
            .last_mut()
            .ok_or_else(|| ExportError::Assembly("document has no pages".to_string()))?;
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "cm",
            vec![
                Object::Real(w),
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(h),
                Object::Real(x),
                Object::Real(y),
            ],
        ));
        ops.push(Operation::new(
            "Do",
            vec![Object::Name(image_name(image.0).into_bytes())],
        ));
        ops.push(Operation::new("Q", vec![]));
        Ok(())
    }

    fn add_page(&mut self) {
        self.pages.push(Vec::new());
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn finish(mut self: Box<Self>) -> Result<Vec<u8>, ExportError> {
        let mut xobjects = Dictionary::new();
        for (i, id) in self.images.iter().enumerate() {
            xobjects.set(image_name(i), Object::Reference(*id));
        }
        let resources_id = self.doc.add_object(dictionary! {
            "XObject" => Object::Dictionary(xobjects),
        });

        let media_box = self.media_box();
        let pages = std::mem::take(&mut self.pages);
        let mut kids = Vec::with_capacity(pages.len());
        for operations in pages {
            let encoded = Content { operations }
                .encode()
                .map_err(|e| ExportError::Assembly(format!("content encoding failed: {e}")))?;
            let content_id = self
                .doc
                .add_object(Stream::new(Dictionary::new(), encoded));
            let page_id = self.doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(self.pages_id),
                "MediaBox" => media_box.clone(),
                "Resources" => Object::Reference(resources_id),
                "Contents" => Object::Reference(content_id),
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Object::Array(kids),
                "Count" => Object::Integer(count),
            }),
        );
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(self.pages_id),
        });
        self.doc.trailer.set("Root", Object::Reference(catalog_id));
        let info_id = self.doc.add_object(dictionary! {
            "Producer" => Object::String(b"CVCraft".to_vec(), StringFormat::Literal),
            "CreationDate" => Object::String(pdf_date(Utc::now()).into_bytes(), StringFormat::Literal),
        });
        self.doc.trailer.set("Info", Object::Reference(info_id));

        let mut buffer = Vec::new();
        self.doc
            .save_to(&mut buffer)
            .map_err(|e| ExportError::Assembly(format!("save failed: {e}")))?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Rgb;

    fn bitmap() -> Bitmap {
        Bitmap::filled(40, 100, Rgb::GRAY_200)
    }

    fn image_streams(doc: &Document) -> usize {
        doc.objects
            .values()
            .filter(|o| match o {
                Object::Stream(s) => s
                    .dict
                    .get(b"Subtype")
                    .and_then(|v| v.as_name())
                    .map(|n| n == b"Image")
                    .unwrap_or(false),
                _ => false,
            })
            .count()
    }

    #[test]
    fn test_single_page_document_loads() {
        let mut pdf = LopdfAssembler.begin(PageFormat::A4_PORTRAIT);
        let image = pdf.embed_image(&bitmap()).unwrap();
        pdf.place_image(image, 0.0, 0.0, 210.0, 100.0).unwrap();
        let bytes = pdf.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
        assert_eq!(image_streams(&doc), 1);
    }

    #[test]
    fn test_image_shared_across_pages() {
        let mut pdf = LopdfAssembler.begin(PageFormat::A4_PORTRAIT);
        let image = pdf.embed_image(&bitmap()).unwrap();
        for page in 0..3 {
            if page > 0 {
                pdf.add_page();
            }
            pdf.place_image(image, 0.0, -297.0 * page as f32, 210.0, 800.0)
                .unwrap();
        }
        assert_eq!(pdf.page_count(), 3);
        let doc = Document::load_mem(&pdf.finish().unwrap()).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
        assert_eq!(image_streams(&doc), 1, "image must be embedded once");
    }

    #[test]
    fn test_second_page_offsets_image_upward() {
        let mut pdf = LopdfAssembler.begin(PageFormat::A4_PORTRAIT);
        let image = pdf.embed_image(&bitmap()).unwrap();
        pdf.place_image(image, 0.0, 0.0, 210.0, 594.0).unwrap();
        pdf.add_page();
        pdf.place_image(image, 0.0, -297.0, 210.0, 594.0).unwrap();
        let doc = Document::load_mem(&pdf.finish().unwrap()).unwrap();

        let page_ys: Vec<f32> = doc
            .get_pages()
            .values()
            .map(|id| {
                let content = doc.get_and_decode_page_content(*id).unwrap();
                let cm = content
                    .operations
                    .iter()
                    .find(|op| op.operator == "cm")
                    .unwrap();
                cm.operands[5].as_float().unwrap()
            })
            .collect();
        let page_h = PageFormat::A4_PORTRAIT.height_pt();
        // first page: image top at page top, so its bottom sits one page below
        assert!((page_ys[0] - (-page_h)).abs() < 0.5, "got {}", page_ys[0]);
        // second page: shifted up by one page, bottom edge on the page bottom
        assert!(page_ys[1].abs() < 0.5, "got {}", page_ys[1]);
    }

    #[test]
    fn test_pdf_date_format() {
        let at = DateTime::parse_from_rfc3339("2024-01-31T09:45:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(pdf_date(at), "D:20240131094500+00'00'");
    }

    #[test]
    fn test_rejects_malformed_bitmap() {
        let mut pdf = LopdfAssembler.begin(PageFormat::A4_PORTRAIT);
        let bad = Bitmap {
            width: 10,
            height: 10,
            pixels: vec![0; 5],
        };
        assert!(matches!(pdf.embed_image(&bad), Err(ExportError::Assembly(_))));
    }

    #[test]
    fn test_unknown_image_handle_is_rejected() {
        let mut pdf = LopdfAssembler.begin(PageFormat::A4_PORTRAIT);
        assert!(pdf.place_image(ImageHandle(3), 0.0, 0.0, 1.0, 1.0).is_err());
    }
}
