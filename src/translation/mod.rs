//! Translation module - Gemini-backed translation of notice documents.
//!
//! - `client` - the Gemini `generateContent` HTTP client and reply cleanup
//! - `batch` - the sequential multi-language orchestrator
//! - `cache` - content-hash keyed translation cache
//! - `language` - the fixed set of target languages

pub mod batch;
pub mod cache;
pub mod client;
pub mod handlers;
pub mod language;

pub use batch::{merge_outcome, translate_all, BatchGuard, BatchOutcome, BatchProgress, BatchStatus};
pub use cache::CachedTranslator;
pub use client::GeminiClient;
pub use language::LanguageCode;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while translating text.
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("API key format is invalid")]
    InvalidApiKey,
    #[error("translation input is empty")]
    EmptyInput,
    #[error("translation request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Gemini API error (status {status}): {body}")]
    Api { status: u16, body: String },
    #[error("translation blocked by safety filter: {0}")]
    SafetyBlocked(String),
    #[error("model returned an empty response")]
    EmptyResponse,
    #[error("model returned the input unchanged")]
    Unchanged,
}

/// Seam between the orchestrator and the concrete translation backend.
///
/// Implemented by [`GeminiClient`] in production and by mocks in tests.
#[async_trait]
pub trait Translate: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        target: LanguageCode,
    ) -> Result<String, TranslationError>;
}
