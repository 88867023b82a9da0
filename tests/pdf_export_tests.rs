//! Tests for the A4 slicing loop and export plumbing.

use school_notice_server::notice::models::NoticeData;
use school_notice_server::pdf::engine::export_filename;
use school_notice_server::pdf::paginate::{compose_pages, page_height_px, PageComposer};
use school_notice_server::pdf::rasterize::{png_dimensions, RasterImage, RASTER_SCALE};
use school_notice_server::pdf::template::render_notice_html;
use school_notice_server::pdf::PdfError;
use school_notice_server::translation::language::LanguageCode;

/// Mock composer standing in for the PDF library; counts add_page calls.
struct CountingComposer {
    add_page_calls: usize,
}

impl PageComposer for CountingComposer {
    fn add_page(&mut self, _offset_px: u32) -> Result<(), PdfError> {
        self.add_page_calls += 1;
        Ok(())
    }
}

fn raster(width_px: u32, height_px: u32) -> RasterImage {
    RasterImage {
        width_px,
        height_px,
        png: Vec::new(),
    }
}

#[test]
fn test_content_taller_than_one_page_produces_multiple_pages() {
    // A4 width at 2x scale; content three times the height of a page
    let width = 794 * RASTER_SCALE;
    let page = page_height_px(width);
    let mut composer = CountingComposer { add_page_calls: 0 };

    let pages = compose_pages(&raster(width, page * 3 - 50), &mut composer).unwrap();

    assert!(pages > 1, "tall content must span multiple pages");
    assert_eq!(pages, 3);
    assert_eq!(composer.add_page_calls, 3);
}

#[test]
fn test_single_page_content_never_calls_add_page_twice() {
    let width = 794 * RASTER_SCALE;
    let page = page_height_px(width);
    let mut composer = CountingComposer { add_page_calls: 0 };

    let pages = compose_pages(&raster(width, page / 2), &mut composer).unwrap();

    assert_eq!(pages, 1);
    assert_eq!(composer.add_page_calls, 1);
}

#[test]
fn test_page_height_follows_a4_aspect_ratio() {
    // 297/210 ratio regardless of scale
    assert_eq!(page_height_px(794), (794.0_f32 * 297.0 / 210.0).round() as u32);
    assert_eq!(page_height_px(1588), (1588.0_f32 * 297.0 / 210.0).round() as u32);
}

#[test]
fn test_composer_error_aborts_the_export() {
    struct FailingComposer;
    impl PageComposer for FailingComposer {
        fn add_page(&mut self, _offset_px: u32) -> Result<(), PdfError> {
            Err(PdfError::Compose("out of memory".to_string()))
        }
    }

    let result = compose_pages(&raster(1588, 5000), &mut FailingComposer);
    assert!(result.is_err());
}

#[test]
fn test_export_filenames_cover_original_and_translations() {
    assert_eq!(export_filename(None), "notice_korean.pdf");
    for lang in LanguageCode::all() {
        let name = export_filename(Some(*lang));
        assert!(name.starts_with("notice_"));
        assert!(name.ends_with(".pdf"));
    }
}

#[test]
fn test_png_dimensions_reads_rasterizer_output_header() {
    // wkhtmltoimage output starts with a standard IHDR; emulate one
    let mut png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    png.extend_from_slice(&13u32.to_be_bytes());
    png.extend_from_slice(b"IHDR");
    png.extend_from_slice(&1588u32.to_be_bytes());
    png.extend_from_slice(&6000u32.to_be_bytes());
    png.extend_from_slice(&[8, 6, 0, 0, 0, 0, 0, 0, 0]);

    assert_eq!(png_dimensions(&png).unwrap(), (1588, 6000));
}

#[test]
fn test_rendered_html_drives_rasterizer_input() {
    let mut notice = NoticeData::default();
    notice.title = "현장체험학습 안내".to_string();
    notice.content = "<p>안내 말씀드립니다.</p>".to_string();

    let html = render_notice_html(&notice);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("현장체험학습 안내"));
    assert!(html.contains("<p>안내 말씀드립니다.</p>"));
}
