//! HTTP-level tests over the API with injected store and rasterizer.

use actix_web::{test, web, App};
use std::collections::HashMap;
use std::sync::Arc;

use school_notice_server::config::Config;
use school_notice_server::notice::models::NoticeData;
use school_notice_server::pdf::rasterize::{RasterImage, Rasterizer};
use school_notice_server::pdf::PdfError;
use school_notice_server::settings::model::Settings;
use school_notice_server::settings::store::{MemorySettingsStore, SettingsStore};
use school_notice_server::translation::batch::{translate_all, BatchGuard};
use school_notice_server::translation::language::LanguageCode;
use school_notice_server::translation::{Translate, TranslationError};
use school_notice_server::{notice, pdf, settings, translation, AppState};

/// Rasterizer that always fails, standing in for a missing CLI tool.
struct FailingRasterizer;

impl Rasterizer for FailingRasterizer {
    fn rasterize(&self, _html: &str, _scale: u32) -> Result<RasterImage, PdfError> {
        Err(PdfError::RasterizerExit(1))
    }
}

async fn test_state() -> web::Data<AppState> {
    let store: Arc<dyn SettingsStore> = Arc::new(MemorySettingsStore::new());
    let rasterizer: Arc<dyn Rasterizer> = Arc::new(FailingRasterizer);
    let state = AppState::with_parts(Config::default(), store, rasterizer)
        .await
        .expect("state should build");
    web::Data::new(state)
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new().app_data($state.clone()).service(
                web::scope("/api")
                    .service(
                        web::resource("/notice")
                            .route(web::get().to(notice::handlers::get_notice))
                            .route(web::put().to(notice::handlers::update_notice)),
                    )
                    .service(
                        web::resource("/notice/translations")
                            .route(web::get().to(notice::handlers::get_translations)),
                    )
                    .service(
                        web::resource("/notice/validate")
                            .route(web::post().to(notice::handlers::validate_notice)),
                    )
                    .service(
                        web::resource("/translate")
                            .route(web::post().to(translation::handlers::translate_single)),
                    )
                    .service(
                        web::resource("/translate/progress")
                            .route(web::get().to(translation::handlers::translate_progress)),
                    )
                    .service(web::resource("/export").route(web::post().to(pdf::handlers::export_pdf)))
                    .service(
                        web::resource("/settings")
                            .route(web::get().to(settings::handlers::get_settings))
                            .route(web::put().to(settings::handlers::update_settings)),
                    ),
            ),
        )
        .await
    };
}

#[actix_web::test]
async fn test_get_notice_returns_defaults() {
    let state = test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api/notice").to_request();
    let notice: NoticeData = test::call_and_read_body_json(&app, req).await;

    assert_eq!(notice.title, "가정통신문");
    assert!(!notice.content.is_empty());
}

#[actix_web::test]
async fn test_put_notice_rejects_script_content() {
    let state = test_state().await;
    let app = test_app!(state);

    let mut notice = NoticeData::default();
    notice.content = "<p>ok</p><script>steal()</script>".to_string();

    let req = test::TestRequest::put()
        .uri("/api/notice")
        .set_json(&notice)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);

    // State must be untouched
    let req = test::TestRequest::get().uri("/api/notice").to_request();
    let stored: NoticeData = test::call_and_read_body_json(&app, req).await;
    assert!(!stored.content.contains("script"));
}

#[actix_web::test]
async fn test_put_notice_sanitizes_and_persists() {
    let state = test_state().await;
    let app = test_app!(state);

    let mut notice = NoticeData::default();
    notice.title = "현장학습 안내".to_string();
    notice.content = "<p>본문</p>".to_string();
    notice.intro_text = "<span onclick=\"x()\">인사말</span>".to_string();

    let req = test::TestRequest::put()
        .uri("/api/notice")
        .set_json(&notice)
        .to_request();
    let saved: NoticeData = test::call_and_read_body_json(&app, req).await;

    assert_eq!(saved.title, "현장학습 안내");
    assert!(!saved.intro_text.contains("onclick"));
    assert!(saved.intro_text.contains("인사말"));
    assert!(saved.content.contains("본문"));

    let req = test::TestRequest::get().uri("/api/notice").to_request();
    let stored: NoticeData = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stored, saved);
}

#[actix_web::test]
async fn test_translations_start_empty() {
    let state = test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/notice/translations")
        .to_request();
    let translations: HashMap<String, NoticeData> =
        test::call_and_read_body_json(&app, req).await;
    assert!(translations.is_empty());
}

#[actix_web::test]
async fn test_validate_endpoint_reports_missing_title() {
    let state = test_state().await;
    let app = test_app!(state);

    let mut notice = NoticeData::default();
    notice.title.clear();

    let req = test::TestRequest::post()
        .uri("/api/notice/validate")
        .set_json(&notice)
        .to_request();
    let violations: Vec<String> = test::call_and_read_body_json(&app, req).await;
    assert!(violations.iter().any(|v| v.contains("[title]")));
}

#[actix_web::test]
async fn test_translate_without_api_key_is_rejected() {
    let state = test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/translate")
        .set_json(serde_json::json!({ "language": "en" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_settings_round_trip_through_api() {
    let state = test_state().await;
    let app = test_app!(state);

    let settings = Settings {
        school: "사랑초등학교".to_string(),
        year: "2026학년도".to_string(),
        phone: "02-1234-5678".to_string(),
        ..Default::default()
    };

    let req = test::TestRequest::put()
        .uri("/api/settings")
        .set_json(&settings)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get().uri("/api/settings").to_request();
    let stored: Settings = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stored, settings);
}

#[actix_web::test]
async fn test_export_missing_translation_is_404() {
    let state = test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/export")
        .set_json(serde_json::json!({ "language": "vi" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_export_failure_reports_single_generic_error() {
    let state = test_state().await;
    let app = test_app!(state);

    // Original notice export; rasterizer always fails
    let req = test::TestRequest::post()
        .uri("/api/export")
        .set_json(serde_json::json!({ "language": null }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);
}

#[actix_web::test]
async fn test_export_uses_translated_copy_when_present() {
    let state = test_state().await;

    let mut translated = NoticeData::default();
    translated.title = "Sports Day Notice".to_string();
    state
        .translations
        .write()
        .insert(LanguageCode::En, translated);

    let app = test_app!(state);

    // Rasterizer fails, so the pipeline errors, but only after the
    // translated copy was found (404 would mean lookup failed)
    let req = test::TestRequest::post()
        .uri("/api/export")
        .set_json(serde_json::json!({ "language": "en" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);
}

#[actix_web::test]
async fn test_progress_starts_idle() {
    let state = test_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/translate/progress")
        .to_request();
    let progress: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(progress["total"], 0);
    assert_eq!(progress["done"], true);
}

#[actix_web::test]
async fn test_progress_endpoint_returns_last_batch_snapshot() {
    struct EchoTranslator;

    #[async_trait::async_trait]
    impl Translate for EchoTranslator {
        async fn translate(
            &self,
            text: &str,
            target: LanguageCode,
        ) -> Result<String, TranslationError> {
            Ok(format!("[{}] {}", target.code(), text))
        }
    }

    let state = test_state().await;

    // Same publishing path the batch handler uses: the snapshot must be
    // retained even though nothing subscribes until the GET below
    let notice = state.notice.read().clone();
    let guard = BatchGuard::begin(&state.batch_generation);
    translate_all(
        &EchoTranslator,
        &notice,
        &[LanguageCode::En, LanguageCode::Vi],
        &guard,
        |progress| {
            state.progress.send_replace(progress);
        },
    )
    .await;

    let app = test_app!(state);
    let req = test::TestRequest::get()
        .uri("/api/translate/progress")
        .to_request();
    let progress: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(progress["total"], 2);
    assert_eq!(progress["current"], 2);
    assert_eq!(progress["done"], true);
    assert_eq!(progress["language"], "vi");
    assert_eq!(progress["percent"].as_f64().unwrap().round() as i64, 100);
}
