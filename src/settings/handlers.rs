use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::state::AppState;
use crate::translation::client::TemplateSuggestion;
use crate::ErrorResponse;

use super::model::Settings;

#[utoipa::path(
    context_path = "/api",
    tag = "Settings Service",
    get,
    path = "/settings",
    responses(
        (status = 200, description = "Current settings", body = Settings)
    )
)]
pub async fn get_settings(state: web::Data<AppState>) -> impl Responder {
    let settings = state.settings.read().clone();
    HttpResponse::Ok().json(settings)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Settings Service",
    put,
    path = "/settings",
    request_body = Settings,
    responses(
        (status = 200, description = "Settings replaced", body = Settings)
    )
)]
pub async fn update_settings(
    state: web::Data<AppState>,
    body: web::Json<Settings>,
) -> impl Responder {
    let settings = body.into_inner();

    // Write-through: in-memory copy first, persistence goes through the
    // debounced background worker
    *state.settings.write() = settings.clone();

    if let Err(e) = state.settings_persist_sender.send(settings.clone()).await {
        // In-memory copy stays valid until restart, so this is not fatal
        log::error!("Failed to queue settings for persistence: {e}");
    }

    HttpResponse::Ok().json(settings)
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeTemplateRequest {
    /// Sample notice text to extract school defaults from.
    pub text: String,
}

#[utoipa::path(
    context_path = "/api",
    tag = "Settings Service",
    post,
    path = "/settings/analyze-template",
    request_body = AnalyzeTemplateRequest,
    responses(
        (status = 200, description = "Extracted school defaults", body = TemplateSuggestion),
        (status = 400, description = "Missing API key or empty sample", body = ErrorResponse),
        (status = 502, description = "Analysis failed", body = ErrorResponse)
    )
)]
pub async fn analyze_template(
    state: web::Data<AppState>,
    req: web::Json<AnalyzeTemplateRequest>,
) -> impl Responder {
    let client = match state.gemini_client() {
        Ok(t) => t,
        Err(e) => {
            return HttpResponse::BadRequest().json(ErrorResponse::bad_request(&format!(
                "Gemini API 키를 확인해 주세요: {e}"
            )))
        }
    };

    if req.text.trim().is_empty() {
        return HttpResponse::BadRequest()
            .json(ErrorResponse::bad_request("분석할 통신문 내용을 입력해 주세요"));
    }

    match client.analyze_template(&req.text).await {
        Ok(suggestion) => HttpResponse::Ok().json(suggestion),
        Err(e) => {
            log::warn!("template analysis failed: {e}");
            HttpResponse::BadGateway().json(ErrorResponse::new(
                "TemplateAnalysisFailed",
                "통신문 분석에 실패했습니다. 잠시 후 다시 시도해 주세요.",
            ))
        }
    }
}
