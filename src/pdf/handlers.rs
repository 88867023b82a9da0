use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::state::AppState;
use crate::translation::language::LanguageCode;
use crate::ErrorResponse;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExportRequest {
    /// Language of the translated copy to export; omit for the Korean
    /// original.
    #[serde(default)]
    pub language: Option<LanguageCode>,
}

#[utoipa::path(
    context_path = "/api",
    tag = "Export Service",
    post,
    path = "/export",
    request_body = ExportRequest,
    responses(
        (status = 200, description = "PDF file download", content_type = "application/pdf"),
        (status = 404, description = "No translation exists for the requested language", body = ErrorResponse),
        (status = 500, description = "PDF generation failed", body = ErrorResponse)
    )
)]
pub async fn export_pdf(
    state: web::Data<AppState>,
    req: web::Json<ExportRequest>,
) -> impl Responder {
    let language = req.language;

    let notice = match language {
        None => state.notice.read().clone(),
        Some(lang) => match state.translations.read().get(&lang) {
            Some(translated) => translated.clone(),
            None => {
                return HttpResponse::NotFound().json(ErrorResponse::not_found(&format!(
                    "{} 번역본이 없습니다. 먼저 번역을 실행해 주세요.",
                    lang.korean_label()
                )))
            }
        },
    };

    let engine = state.pdf_engine.clone();
    let result = web::block(move || engine.export(&notice, language)).await;

    match result {
        Ok(Ok(exported)) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(exported.filename)],
            })
            .body(exported.pdf),
        Ok(Err(e)) => {
            log::error!("PDF export failed: {e}");
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("PDF 생성에 실패했습니다"))
        }
        Err(e) => {
            log::error!("PDF export task failed: {e}");
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("PDF 생성에 실패했습니다"))
        }
    }
}
