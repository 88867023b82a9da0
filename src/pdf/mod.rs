//! PDF export - rasterize the rendered notice and slice it across A4 pages.
//!
//! - `template` - NoticeData to standalone HTML
//! - `rasterize` - HTML to PNG through an external renderer
//! - `paginate` - the A4 slicing loop
//! - `composer` - printpdf-backed page assembly
//! - `engine` - the one-shot export pipeline

pub mod composer;
pub mod engine;
pub mod handlers;
pub mod paginate;
pub mod rasterize;
pub mod template;

pub use engine::{export_filename, PdfExportEngine};
pub use rasterize::{RasterImage, Rasterizer, WkhtmltoimageRasterizer, RASTER_SCALE};

use thiserror::Error;

/// Errors that can occur during PDF export. All of them surface to the user
/// as a single "PDF generation failed" message; the variant detail goes to
/// the log.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to write HTML source: {0}")]
    WriteHtml(#[source] std::io::Error),
    #[error("rasterizer execution failed: {0}")]
    RasterizerIo(#[source] std::io::Error),
    #[error("rasterizer exited with status {0}")]
    RasterizerExit(i32),
    #[error("failed to read rasterized image: {0}")]
    ReadImage(#[source] std::io::Error),
    #[error("invalid PNG data: {0}")]
    InvalidPng(String),
    #[error("PDF composition failed: {0}")]
    Compose(String),
}

/// Result of a successful export.
#[derive(Debug)]
pub struct ExportedPdf {
    pub filename: String,
    pub pdf: Vec<u8>,
    pub pages: usize,
}
