//! printpdf-backed page assembly.
//!
//! The rasterized bitmap is embedded once and referenced from every page with
//! a per-page vertical offset, so page N shows slice N of the image.

use printpdf::{Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Pt, RawImage, XObjectId, XObjectTransform};

use super::paginate::{PageComposer, A4_HEIGHT_MM, A4_WIDTH_MM};
use super::rasterize::RasterImage;
use super::PdfError;

const PT_PER_MM: f32 = 72.0 / 25.4;

pub struct PrintPdfComposer {
    doc: PdfDocument,
    image_id: XObjectId,
    width_px: u32,
    height_px: u32,
}

impl PrintPdfComposer {
    pub fn new(title: &str, raster: &RasterImage) -> Result<Self, PdfError> {
        let mut doc = PdfDocument::new(title);
        let mut warnings = Vec::new();

        let image = RawImage::decode_from_bytes(&raster.png, &mut warnings)
            .map_err(|e| PdfError::Compose(format!("PNG decode failed: {e}")))?;
        if !warnings.is_empty() {
            log::debug!("PNG decode warnings: {warnings:?}");
        }
        let image_id = doc.add_image(&image);

        Ok(Self {
            doc,
            image_id,
            width_px: raster.width_px,
            height_px: raster.height_px,
        })
    }

    /// Consume the composer and produce the document bytes.
    pub fn finish(self) -> Vec<u8> {
        let mut warnings = Vec::new();
        let bytes = self.doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            log::debug!("PDF save warnings: {warnings:?}");
        }
        bytes
    }
}

impl PageComposer for PrintPdfComposer {
    fn add_page(&mut self, offset_px: u32) -> Result<(), PdfError> {
        // dpi at which the bitmap spans the full A4 width
        let dpi = self.width_px as f32 * 25.4 / A4_WIDTH_MM;
        let image_height_mm = self.height_px as f32 * 25.4 / dpi;
        let offset_mm = offset_px as f32 * 25.4 / dpi;

        // PDF origin is bottom-left; shift the image up so the slice at
        // `offset_px` lands at the top of this page.
        let translate_y_mm = A4_HEIGHT_MM - image_height_mm + offset_mm;

        let ops = vec![Op::UseXobject {
            id: self.image_id.clone(),
            transform: XObjectTransform {
                translate_x: Some(Pt(0.0)),
                translate_y: Some(Pt(translate_y_mm * PT_PER_MM)),
                dpi: Some(dpi),
                ..Default::default()
            },
        }];

        self.doc
            .pages
            .push(PdfPage::new(Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), ops));
        Ok(())
    }
}
