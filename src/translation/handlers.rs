use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::notice::models::NoticeData;
use crate::state::AppState;
use crate::ErrorResponse;

use super::batch::{merge_outcome, translate_all, translate_notice, BatchGuard, BatchStatus};
use super::language::LanguageCode;
use super::TranslationError;

#[derive(Debug, Deserialize, ToSchema)]
pub struct TranslateRequest {
    pub language: LanguageCode,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TranslateResponse {
    pub language: LanguageCode,
    /// True when translation failed and the original text was returned
    /// instead (never-block-the-user policy; the failure is surfaced, not
    /// silent).
    pub fallback: bool,
    pub message: Option<String>,
    pub notice: NoticeData,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BatchTranslateRequest {
    /// Empty or missing list means the full fixed language set.
    #[serde(default)]
    pub languages: Vec<LanguageCode>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FailedLanguage {
    pub language: LanguageCode,
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BatchSummary {
    pub job: Uuid,
    pub status: BatchStatus,
    pub message: String,
    pub success_count: usize,
    pub fail_count: usize,
    pub cancelled: bool,
    pub failed: Vec<FailedLanguage>,
}

fn invalid_key_response(e: &TranslationError) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::bad_request(&format!(
        "Gemini API 키를 확인해 주세요: {e}"
    )))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Translation Service",
    post,
    path = "/translate",
    request_body = TranslateRequest,
    responses(
        (status = 200, description = "Translated notice, or the original marked as fallback", body = TranslateResponse),
        (status = 400, description = "Missing or malformed API key", body = ErrorResponse)
    )
)]
pub async fn translate_single(
    state: web::Data<AppState>,
    req: web::Json<TranslateRequest>,
) -> impl Responder {
    let language = req.language;
    let translator = match state.translator() {
        Ok(t) => t,
        Err(e) => return invalid_key_response(&e),
    };

    let notice = state.notice.read().clone();
    match translate_notice(&translator, &notice, language).await {
        Ok(translated) => {
            state
                .translations
                .write()
                .insert(language, translated.clone());
            HttpResponse::Ok().json(TranslateResponse {
                language,
                fallback: false,
                message: None,
                notice: translated,
            })
        }
        Err(e) => {
            log::warn!("single translation to {language} failed: {e}");
            HttpResponse::Ok().json(TranslateResponse {
                language,
                fallback: true,
                message: Some(format!("번역에 실패하여 원문을 표시합니다: {e}")),
                notice,
            })
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Translation Service",
    post,
    path = "/translate/batch",
    request_body = BatchTranslateRequest,
    responses(
        (status = 200, description = "Batch summary", body = BatchSummary),
        (status = 400, description = "Missing or malformed API key", body = ErrorResponse)
    )
)]
pub async fn translate_batch(
    state: web::Data<AppState>,
    req: web::Json<BatchTranslateRequest>,
) -> impl Responder {
    let languages: Vec<LanguageCode> = if req.languages.is_empty() {
        LanguageCode::all().to_vec()
    } else {
        req.languages.clone()
    };

    let translator = match state.translator() {
        Ok(t) => t,
        Err(e) => return invalid_key_response(&e),
    };

    let notice = state.notice.read().clone();
    let guard = BatchGuard::begin(&state.batch_generation);
    log::info!(
        "batch {} translating {} language(s)",
        guard.job(),
        languages.len()
    );

    // send_replace keeps the snapshot even when nobody is subscribed yet
    let outcome = translate_all(&translator, &notice, &languages, &guard, |progress| {
        state.progress.send_replace(progress);
    })
    .await;

    // A superseded batch must not overwrite the newer batch's results
    let merged = merge_outcome(&state.translations, &guard, &outcome);
    let cancelled = !merged;
    if cancelled {
        log::info!("batch {} cancelled, discarding results", guard.job());
    }

    let status = outcome.status();
    HttpResponse::Ok().json(BatchSummary {
        job: guard.job(),
        status,
        message: status.message().to_string(),
        success_count: outcome.success_count,
        fail_count: outcome.fail_count,
        cancelled,
        failed: outcome
            .failed
            .into_iter()
            .map(|(language, error)| FailedLanguage { language, error })
            .collect(),
    })
}

#[utoipa::path(
    context_path = "/api",
    tag = "Translation Service",
    get,
    path = "/translate/progress",
    responses(
        (status = 200, description = "Latest batch progress snapshot", body = super::batch::BatchProgress)
    )
)]
pub async fn translate_progress(state: web::Data<AppState>) -> impl Responder {
    let progress = state.progress.subscribe().borrow().clone();
    HttpResponse::Ok().json(progress)
}
