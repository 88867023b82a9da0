//! One-shot export pipeline: render, rasterize, slice, compose.

use std::sync::Arc;

use crate::notice::models::NoticeData;
use crate::translation::language::LanguageCode;

use super::composer::PrintPdfComposer;
use super::paginate::compose_pages;
use super::rasterize::{Rasterizer, RASTER_SCALE};
use super::template::render_notice_html;
use super::{ExportedPdf, PdfError};

/// Download filename: `notice_<language>.pdf`, `notice_korean.pdf` for the
/// untranslated original.
pub fn export_filename(language: Option<LanguageCode>) -> String {
    let suffix = language
        .map(|lang| lang.code().to_string())
        .unwrap_or_else(|| "korean".to_string());
    sanitize_filename::sanitize(format!("notice_{suffix}.pdf"))
}

/// Export engine over a pluggable rasterizer.
pub struct PdfExportEngine {
    rasterizer: Arc<dyn Rasterizer>,
}

impl PdfExportEngine {
    pub fn new(rasterizer: Arc<dyn Rasterizer>) -> Self {
        Self { rasterizer }
    }

    /// Export one notice to a multi-page A4 PDF. Blocking (spawns an external
    /// process); call from a blocking context.
    pub fn export(
        &self,
        notice: &NoticeData,
        language: Option<LanguageCode>,
    ) -> Result<ExportedPdf, PdfError> {
        let html = render_notice_html(notice);
        let raster = self.rasterizer.rasterize(&html, RASTER_SCALE)?;

        let mut composer = PrintPdfComposer::new(&notice.title, &raster)?;
        let pages = compose_pages(&raster, &mut composer)?;
        let pdf = composer.finish();

        let filename = export_filename(language);
        log::info!(
            "exported {filename}: {pages} page(s), {} bytes",
            pdf.len()
        );

        Ok(ExportedPdf {
            filename,
            pdf,
            pages,
        })
    }
}
