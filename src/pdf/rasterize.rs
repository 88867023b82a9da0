//! HTML-to-bitmap rasterization.
//!
//! The real implementation writes the rendered HTML to a temp directory and
//! shells out to `wkhtmltoimage`; tests inject their own [`Rasterizer`].

use std::fs;
use std::process::Command;
use tempfile::tempdir;

use super::PdfError;

/// Fixed 2x scale for print resolution.
pub const RASTER_SCALE: u32 = 2;

/// CSS pixel width of an A4 page at 96 dpi.
pub const A4_WIDTH_CSS_PX: u32 = 794;

/// A rasterized notice: PNG bytes plus pixel dimensions.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pub width_px: u32,
    pub height_px: u32,
    pub png: Vec<u8>,
}

pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, html: &str, scale: u32) -> Result<RasterImage, PdfError>;
}

/// Read width/height from a PNG IHDR header without decoding the image.
pub fn png_dimensions(bytes: &[u8]) -> Result<(u32, u32), PdfError> {
    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    if bytes.len() < 24 {
        return Err(PdfError::InvalidPng("truncated file".to_string()));
    }
    if bytes[..8] != PNG_SIGNATURE {
        return Err(PdfError::InvalidPng("bad signature".to_string()));
    }
    if &bytes[12..16] != b"IHDR" {
        return Err(PdfError::InvalidPng("IHDR chunk not first".to_string()));
    }

    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    if width == 0 || height == 0 {
        return Err(PdfError::InvalidPng("zero dimension".to_string()));
    }
    Ok((width, height))
}

/// Rasterizer shelling out to the `wkhtmltoimage` CLI.
pub struct WkhtmltoimageRasterizer {
    binary: String,
}

impl WkhtmltoimageRasterizer {
    pub fn new() -> Self {
        Self {
            binary: "wkhtmltoimage".to_string(),
        }
    }

    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for WkhtmltoimageRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for WkhtmltoimageRasterizer {
    fn rasterize(&self, html: &str, scale: u32) -> Result<RasterImage, PdfError> {
        let temp_dir = tempdir().map_err(PdfError::TempDir)?;
        let html_path = temp_dir.path().join("notice.html");
        let png_path = temp_dir.path().join("notice.png");

        fs::write(&html_path, html).map_err(PdfError::WriteHtml)?;

        let status = Command::new(&self.binary)
            .arg("--format")
            .arg("png")
            .arg("--width")
            .arg((A4_WIDTH_CSS_PX * scale).to_string())
            .arg("--zoom")
            .arg(scale.to_string())
            .arg("--quiet")
            .arg(&html_path)
            .arg(&png_path)
            .current_dir(temp_dir.path())
            .status()
            .map_err(PdfError::RasterizerIo)?;

        if !status.success() {
            let code = status.code().unwrap_or(-1);
            return Err(PdfError::RasterizerExit(code));
        }

        let png = fs::read(&png_path).map_err(PdfError::ReadImage)?;
        let (width_px, height_px) = png_dimensions(&png)?;

        Ok(RasterImage {
            width_px,
            height_px,
            png,
        })
    }
}
