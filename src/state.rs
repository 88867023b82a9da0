//! Shared application state.

use moka::future::Cache;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

use crate::config::Config;
use crate::notice::models::NoticeData;
use crate::pdf::engine::PdfExportEngine;
use crate::pdf::rasterize::{Rasterizer, WkhtmltoimageRasterizer};
use crate::settings::model::Settings;
use crate::settings::persistence::start_persistence_worker;
use crate::settings::store::{FileSettingsStore, SettingsStore};
use crate::translation::batch::BatchProgress;
use crate::translation::cache::CachedTranslator;
use crate::translation::client::GeminiClient;
use crate::translation::language::LanguageCode;
use crate::translation::TranslationError;

pub struct AppState {
    pub config: Config,
    /// The single in-memory notice document.
    pub notice: RwLock<NoticeData>,
    /// Translated copies keyed by language; entries replaced wholesale.
    pub translations: RwLock<HashMap<LanguageCode, NoticeData>>,
    pub settings: RwLock<Settings>,
    /// Bumped per batch run; in-flight batches check it between languages.
    pub batch_generation: AtomicU64,
    /// Latest batch progress snapshot. Published via `send_replace`, which
    /// stores the value even while no receiver is subscribed; readers
    /// `subscribe()` on demand.
    pub progress: watch::Sender<BatchProgress>,
    pub translation_cache: Cache<String, String>,
    pub http_client: reqwest::Client,
    pub settings_store: Arc<dyn SettingsStore>,
    pub settings_persist_sender: mpsc::Sender<Settings>,
    pub pdf_engine: Arc<PdfExportEngine>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        let store: Arc<dyn SettingsStore> =
            Arc::new(FileSettingsStore::new(config.settings_path.clone()));
        let rasterizer: Arc<dyn Rasterizer> = Arc::new(WkhtmltoimageRasterizer::new());
        Self::with_parts(config, store, rasterizer).await
    }

    /// Build state with injected store and rasterizer (the seams tests use).
    pub async fn with_parts(
        config: Config,
        store: Arc<dyn SettingsStore>,
        rasterizer: Arc<dyn Rasterizer>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let settings = store.load().await.map_err(std::io::Error::other)?.unwrap_or_default();

        let http_client = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(900))
            .user_agent("school-notice-server/0.3")
            .build()?;

        let translation_cache = Cache::builder()
            .time_to_live(Duration::from_secs(10 * 60))
            .max_capacity(500)
            .build();

        let (settings_persist_sender, receiver) = mpsc::channel(100);
        let store_clone = store.clone();
        tokio::spawn(async move {
            start_persistence_worker(receiver, store_clone).await;
        });

        let (progress, _) = watch::channel(BatchProgress::idle());

        Ok(Self {
            config,
            notice: RwLock::new(NoticeData::default()),
            translations: RwLock::new(HashMap::new()),
            settings: RwLock::new(settings),
            batch_generation: AtomicU64::new(0),
            progress,
            translation_cache,
            http_client,
            settings_store: store,
            settings_persist_sender,
            pdf_engine: Arc::new(PdfExportEngine::new(rasterizer)),
        })
    }

    /// API key from saved settings, falling back to the environment default.
    pub fn resolve_api_key(&self) -> Option<String> {
        let from_settings = self.settings.read().api_key.trim().to_string();
        if !from_settings.is_empty() {
            return Some(from_settings);
        }
        self.config.gemini_api_key.clone()
    }

    /// A Gemini client for the current key/settings.
    pub fn gemini_client(&self) -> Result<GeminiClient, TranslationError> {
        let api_key = self.resolve_api_key().ok_or(TranslationError::InvalidApiKey)?;
        GeminiClient::new(
            self.http_client.clone(),
            api_key,
            self.config.gemini_api_url.clone(),
            self.config.gemini_model.clone(),
        )
    }

    /// A cache-wrapped Gemini client for the current key/settings.
    pub fn translator(&self) -> Result<CachedTranslator<GeminiClient>, TranslationError> {
        let client = self.gemini_client()?;
        Ok(CachedTranslator::new(client, self.translation_cache.clone()))
    }
}
