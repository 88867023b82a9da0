use actix_web::{web, HttpResponse, Responder};
use std::collections::HashMap;

use crate::notice::models::NoticeData;
use crate::notice::validation::{sanitize_text_input, validate_html_content, validate_notice_data};
use crate::state::AppState;
use crate::translation::language::LanguageCode;
use crate::ErrorResponse;

#[utoipa::path(
    context_path = "/api",
    tag = "Notice Service",
    get,
    path = "/notice",
    responses(
        (status = 200, description = "The current notice document", body = NoticeData)
    )
)]
pub async fn get_notice(state: web::Data<AppState>) -> impl Responder {
    let notice = state.notice.read().clone();
    HttpResponse::Ok().json(notice)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Notice Service",
    put,
    path = "/notice",
    request_body = NoticeData,
    responses(
        (status = 200, description = "Notice replaced", body = NoticeData),
        (status = 400, description = "Content failed the HTML safety gate", body = ErrorResponse)
    )
)]
pub async fn update_notice(
    state: web::Data<AppState>,
    body: web::Json<NoticeData>,
) -> impl Responder {
    let mut notice = body.into_inner();

    // Editor output is rejected outright when it carries dangerous HTML; the
    // remaining text fields are sanitized on the way in.
    if !validate_html_content(&notice.content) {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(
            "본문에 허용되지 않는 HTML이 포함되어 있습니다",
        ));
    }

    notice.title = sanitize_text_input(&notice.title);
    notice.intro_text = sanitize_text_input(&notice.intro_text);
    notice.content = sanitize_text_input(&notice.content);
    notice.attachment_description = sanitize_text_input(&notice.attachment_description);
    notice.attachments = notice
        .attachments
        .iter()
        .map(|a| sanitize_text_input(a))
        .collect();
    notice.notice = sanitize_text_input(&notice.notice);
    notice.additional_info = sanitize_text_input(&notice.additional_info);

    // Violations do not block a save; the editor shows them inline
    let violations = validate_notice_data(&notice);
    if !violations.is_empty() {
        log::warn!("notice saved with validation warnings: {violations:?}");
    }

    *state.notice.write() = notice.clone();
    HttpResponse::Ok().json(notice)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Notice Service",
    get,
    path = "/notice/translations",
    responses(
        (status = 200, description = "Translated notices keyed by language code")
    )
)]
pub async fn get_translations(state: web::Data<AppState>) -> impl Responder {
    let translations: HashMap<LanguageCode, NoticeData> = state.translations.read().clone();
    HttpResponse::Ok().json(translations)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Notice Service",
    post,
    path = "/notice/validate",
    request_body = NoticeData,
    responses(
        (status = 200, description = "Validation messages, empty when the notice is complete", body = Vec<String>)
    )
)]
pub async fn validate_notice(body: web::Json<NoticeData>) -> impl Responder {
    HttpResponse::Ok().json(validate_notice_data(&body))
}
