//! The A4 slicing loop.
//!
//! The rasterized notice is one tall bitmap; it is spread across successive
//! A4 pages by walking `height_left -= page_height` until the remaining
//! height is exhausted. Page assembly goes through [`PageComposer`] so the
//! loop is testable without a PDF library.

use super::rasterize::RasterImage;
use super::PdfError;

pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// Receives one call per produced page with the vertical pixel offset of the
/// slice shown on that page.
pub trait PageComposer {
    fn add_page(&mut self, offset_px: u32) -> Result<(), PdfError>;
}

/// Bitmap height that fits one A4 page, derived from the bitmap width
/// spanning the full page width.
pub fn page_height_px(width_px: u32) -> u32 {
    (width_px as f32 * A4_HEIGHT_MM / A4_WIDTH_MM).round() as u32
}

/// Drive the composer across the bitmap; returns the page count.
pub fn compose_pages(
    raster: &RasterImage,
    composer: &mut dyn PageComposer,
) -> Result<usize, PdfError> {
    let page_height = page_height_px(raster.width_px);
    if page_height == 0 {
        return Err(PdfError::Compose("raster width is zero".to_string()));
    }

    let mut height_left = raster.height_px as i64;
    let mut offset_px: u32 = 0;
    let mut pages = 0;

    while height_left > 0 {
        composer.add_page(offset_px)?;
        height_left -= page_height as i64;
        offset_px = offset_px.saturating_add(page_height);
        pages += 1;
    }

    // Even an empty raster yields a single blank page
    if pages == 0 {
        composer.add_page(0)?;
        pages = 1;
    }

    Ok(pages)
}
