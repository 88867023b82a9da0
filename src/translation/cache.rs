//! Content-hash keyed translation cache.
//!
//! Re-translating an unchanged notice is common (the editor re-runs the batch
//! after small tweaks elsewhere), so successful translations are kept in a
//! TTL cache and looked up before the network is touched.

use async_trait::async_trait;
use moka::future::Cache;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::language::LanguageCode;
use super::{Translate, TranslationError};

fn cache_key(target: LanguageCode, text: &str) -> String {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    format!("{}:{:016x}", target.code(), hasher.finish())
}

/// Wraps any [`Translate`] implementation with a moka cache. Only successful
/// translations are cached; failures always retry the backend.
pub struct CachedTranslator<T> {
    inner: T,
    cache: Cache<String, String>,
}

impl<T> CachedTranslator<T> {
    pub fn new(inner: T, cache: Cache<String, String>) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl<T: Translate> Translate for CachedTranslator<T> {
    async fn translate(
        &self,
        text: &str,
        target: LanguageCode,
    ) -> Result<String, TranslationError> {
        let key = cache_key(target, text);
        if let Some(hit) = self.cache.get(&key).await {
            log::debug!("translation cache hit for {target}");
            return Ok(hit);
        }

        let translated = self.inner.translate(text, target).await?;
        self.cache.insert(key, translated.clone()).await;
        Ok(translated)
    }
}
