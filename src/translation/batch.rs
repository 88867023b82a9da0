//! Batch translation orchestrator.
//!
//! Drives the translation client across the target languages strictly
//! sequentially: each language finishes (success or recorded failure) before
//! the next starts. Sequential processing is a deliberate choice to stay
//! under provider rate limits. A failed language never aborts the batch and
//! is absent from the result map; the per-language error is kept in the
//! outcome instead.
//!
//! Each invocation bumps a shared generation counter. The loop re-checks the
//! counter between languages, so starting a new batch cancels the previous
//! one and its stale results are never merged into shared state.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::notice::models::NoticeData;
use crate::notice::validation::sanitize_text_input;

use super::language::LanguageCode;
use super::{Translate, TranslationError};

/// Snapshot of batch progress, published after every completed language and
/// once more when a batch is superseded.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BatchProgress {
    pub job: Uuid,
    pub current: usize,
    pub total: usize,
    pub percent: f32,
    pub language: Option<LanguageCode>,
    pub done: bool,
    pub cancelled: bool,
}

impl BatchProgress {
    pub fn idle() -> Self {
        Self {
            job: Uuid::nil(),
            current: 0,
            total: 0,
            percent: 0.0,
            language: None,
            done: true,
            cancelled: false,
        }
    }
}

/// Terminal state of a finished batch, each mapping to a distinct
/// user-facing message tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    AllSucceeded,
    Partial,
    AllFailed,
}

impl BatchStatus {
    pub fn message(&self) -> &'static str {
        match self {
            BatchStatus::AllSucceeded => "모든 언어 번역이 완료되었습니다.",
            BatchStatus::Partial => "일부 언어 번역에 실패했습니다.",
            BatchStatus::AllFailed => "번역에 실패했습니다. API 키와 네트워크를 확인해 주세요.",
        }
    }
}

/// Aggregate result of one batch run.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Successfully translated notices, keyed by language. Failed languages
    /// are absent.
    pub results: HashMap<LanguageCode, NoticeData>,
    pub success_count: usize,
    pub fail_count: usize,
    pub failed: Vec<(LanguageCode, String)>,
    /// True when a newer batch superseded this one mid-run.
    pub cancelled: bool,
}

impl BatchOutcome {
    pub fn status(&self) -> BatchStatus {
        if self.fail_count == 0 {
            BatchStatus::AllSucceeded
        } else if self.success_count == 0 {
            BatchStatus::AllFailed
        } else {
            BatchStatus::Partial
        }
    }
}

/// Generation handle for one batch run. `begin` bumps the shared counter,
/// invalidating any batch started earlier.
pub struct BatchGuard<'a> {
    counter: &'a AtomicU64,
    generation: u64,
    job: Uuid,
}

impl<'a> BatchGuard<'a> {
    pub fn begin(counter: &'a AtomicU64) -> Self {
        let generation = counter.fetch_add(1, Ordering::SeqCst) + 1;
        Self {
            counter,
            generation,
            job: Uuid::new_v4(),
        }
    }

    pub fn is_current(&self) -> bool {
        self.counter.load(Ordering::SeqCst) == self.generation
    }

    pub fn job(&self) -> Uuid {
        self.job
    }
}

/// Translate one notice into one language: a full copy with the translated
/// fields replaced. Any field failure fails the whole language.
pub async fn translate_notice<T: Translate + ?Sized>(
    translator: &T,
    notice: &NoticeData,
    target: LanguageCode,
) -> Result<NoticeData, TranslationError> {
    let mut translated = notice.clone();
    translated.title = translator.translate(&notice.title, target).await?;
    let content = translator.translate(&notice.content, target).await?;
    // The model reply re-enters rendered HTML, so it passes the same gate as
    // editor input.
    translated.content = sanitize_text_input(&content);
    Ok(translated)
}

/// Run the sequential batch, reporting progress after every language.
pub async fn translate_all<T: Translate + ?Sized>(
    translator: &T,
    notice: &NoticeData,
    languages: &[LanguageCode],
    guard: &BatchGuard<'_>,
    mut progress: impl FnMut(BatchProgress),
) -> BatchOutcome {
    let total = languages.len();
    let mut outcome = BatchOutcome {
        results: HashMap::new(),
        success_count: 0,
        fail_count: 0,
        failed: Vec::new(),
        cancelled: false,
    };

    for (index, &language) in languages.iter().enumerate() {
        if !guard.is_current() {
            log::info!(
                "batch {} superseded after {} of {total} languages, stopping",
                guard.job(),
                index
            );
            outcome.cancelled = true;
            // Terminal snapshot, otherwise the last report stays not-done
            // forever
            progress(BatchProgress {
                job: guard.job(),
                current: index,
                total,
                percent: index as f32 / total as f32 * 100.0,
                language: None,
                done: true,
                cancelled: true,
            });
            break;
        }

        match translate_notice(translator, notice, language).await {
            Ok(translated) => {
                outcome.results.insert(language, translated);
                outcome.success_count += 1;
            }
            Err(e) => {
                log::warn!("batch translation to {language} failed: {e}");
                outcome.fail_count += 1;
                outcome.failed.push((language, e.to_string()));
            }
        }

        progress(BatchProgress {
            job: guard.job(),
            current: index + 1,
            total,
            percent: (index + 1) as f32 / total as f32 * 100.0,
            language: Some(language),
            done: index + 1 == total,
            cancelled: false,
        });
    }

    outcome
}

/// Merge a finished batch's results into the shared translation map unless
/// the batch was superseded. The generation is re-checked while the write
/// lock is held, so a batch superseded at the last moment cannot slip stale
/// results in. Returns true when the merge happened.
pub fn merge_outcome(
    translations: &parking_lot::RwLock<HashMap<LanguageCode, NoticeData>>,
    guard: &BatchGuard<'_>,
    outcome: &BatchOutcome,
) -> bool {
    if outcome.cancelled {
        return false;
    }
    let mut map = translations.write();
    if !guard.is_current() {
        return false;
    }
    for (language, translated) in &outcome.results {
        map.insert(*language, translated.clone());
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct EchoTranslator;

    #[async_trait]
    impl Translate for EchoTranslator {
        async fn translate(
            &self,
            text: &str,
            target: LanguageCode,
        ) -> Result<String, TranslationError> {
            Ok(format!("[{}] {}", target.code(), text))
        }
    }

    #[tokio::test]
    async fn test_translate_notice_replaces_title_and_content() {
        let notice = NoticeData::default();
        let translated = translate_notice(&EchoTranslator, &notice, LanguageCode::En)
            .await
            .unwrap();
        assert!(translated.title.starts_with("[en]"));
        assert!(translated.content.starts_with("[en]"));
        // Untranslated fields are carried over verbatim
        assert_eq!(translated.school, notice.school);
        assert_eq!(translated.phone, notice.phone);
    }

    #[tokio::test]
    async fn test_translated_content_is_sanitized() {
        struct MaliciousTranslator;

        #[async_trait]
        impl Translate for MaliciousTranslator {
            async fn translate(
                &self,
                _text: &str,
                _target: LanguageCode,
            ) -> Result<String, TranslationError> {
                Ok("<p>ok</p><script>alert(1)</script>".to_string())
            }
        }

        let translated =
            translate_notice(&MaliciousTranslator, &NoticeData::default(), LanguageCode::En)
                .await
                .unwrap();
        assert_eq!(translated.content, "<p>ok</p>");
    }

    #[test]
    fn test_status_mapping() {
        let outcome = |success, fail| BatchOutcome {
            results: HashMap::new(),
            success_count: success,
            fail_count: fail,
            failed: Vec::new(),
            cancelled: false,
        };
        assert_eq!(outcome(3, 0).status(), BatchStatus::AllSucceeded);
        assert_eq!(outcome(2, 1).status(), BatchStatus::Partial);
        assert_eq!(outcome(0, 3).status(), BatchStatus::AllFailed);
    }
}
