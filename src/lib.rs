use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod notice;
pub mod pdf;
pub mod settings;
pub mod state;
pub mod translation;

pub use crate::state::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

pub async fn run() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    #[derive(OpenApi)]
    #[openapi(
        paths(
            crate::notice::handlers::get_notice,
            crate::notice::handlers::update_notice,
            crate::notice::handlers::get_translations,
            crate::notice::handlers::validate_notice,
            crate::translation::handlers::translate_single,
            crate::translation::handlers::translate_batch,
            crate::translation::handlers::translate_progress,
            crate::pdf::handlers::export_pdf,
            crate::settings::handlers::get_settings,
            crate::settings::handlers::update_settings,
            crate::settings::handlers::analyze_template
        ),
        components(
            schemas(
                notice::models::NoticeData,
                settings::model::Settings,
                translation::language::LanguageCode,
                translation::handlers::TranslateRequest,
                translation::handlers::TranslateResponse,
                translation::handlers::BatchTranslateRequest,
                translation::handlers::BatchSummary,
                translation::handlers::FailedLanguage,
                translation::batch::BatchProgress,
                translation::batch::BatchStatus,
                translation::client::TemplateSuggestion,
                pdf::handlers::ExportRequest,
                settings::handlers::AnalyzeTemplateRequest,
                ErrorResponse,
            )
        ),
        tags(
            (name = "Notice Service", description = "Notice document endpoints."),
            (name = "Translation Service", description = "Single and batch translation endpoints."),
            (name = "Export Service", description = "PDF export endpoints."),
            (name = "Settings Service", description = "School defaults and template analysis.")
        )
    )]
    struct ApiDoc;

    dotenvy::dotenv().ok(); // Load .env file
    let config = crate::config::Config::from_env();
    let bind_addr = config.bind_addr.clone();

    let app_state = match AppState::new(config).await {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            log::error!("Failed to initialize application state: {e}");
            std::process::exit(1);
        }
    };

    let prometheus = PrometheusMetricsBuilder::new("school_notice_server")
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus metrics middleware");

    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = Cors::default()
            .allowed_origin("http://localhost:5173")
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://127.0.0.1:5173")
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .service(
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
                        web::resource("/translate/batch")
                            .route(web::post().to(translation::handlers::translate_batch)),
                    )
                    .service(
                        web::resource("/translate/progress")
                            .route(web::get().to(translation::handlers::translate_progress)),
                    )
                    .service(
                        web::resource("/export").route(web::post().to(pdf::handlers::export_pdf)),
                    )
                    .service(
                        web::resource("/settings")
                            .route(web::get().to(settings::handlers::get_settings))
                            .route(web::put().to(settings::handlers::update_settings)),
                    )
                    .service(
                        web::resource("/settings/analyze-template")
                            .route(web::post().to(settings::handlers::analyze_template)),
                    ),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
