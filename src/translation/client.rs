//! Gemini `generateContent` client.
//!
//! Builds the translation prompt, posts it to the REST endpoint (API key as a
//! query parameter) and cleans markdown artifacts out of the model reply. The
//! same client also powers the settings template analysis.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use utoipa::ToSchema;

use super::language::LanguageCode;
use super::{Translate, TranslationError};

/// Default REST endpoint base; override with `GEMINI_API_URL` to route
/// through a proxy.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

lazy_static! {
    static ref API_KEY_FORMAT: Regex = Regex::new(r"^AIza[0-9A-Za-z_\-]{35}$").unwrap();
    static ref CODE_FENCE: Regex = Regex::new(r"(?s)```[a-zA-Z0-9_\-]*\n?(.*?)```").unwrap();
    static ref STRAY_FENCE: Regex = Regex::new(r"```[a-zA-Z0-9_\-]*").unwrap();
    static ref BOLD: Regex = Regex::new(r"\*\*([^*]*)\*\*").unwrap();
    static ref UNDERSCORE_BOLD: Regex = Regex::new(r"__([^_]*)__").unwrap();
    static ref HEADER: Regex = Regex::new(r"(?m)^#{1,6}\s+").unwrap();
    static ref PREAMBLE: Regex =
        Regex::new(r"(?i)^\s*(?:translated text|translation|번역된?\s*(?:텍스트|내용|결과)?)\s*[::]\s*")
            .unwrap();
}

/// Check the provider key format before any network call is attempted.
pub fn api_key_format_valid(key: &str) -> bool {
    API_KEY_FORMAT.is_match(key.trim())
}

/// Strip markdown emphasis, headers, code fences and any "Translated text:"
/// style preamble the model may have wrapped around the reply.
pub fn clean_model_reply(raw: &str) -> String {
    let out = CODE_FENCE.replace_all(raw, "$1");
    let out = STRAY_FENCE.replace_all(&out, "");
    let out = BOLD.replace_all(&out, "$1");
    let out = UNDERSCORE_BOLD.replace_all(&out, "$1");
    let out = HEADER.replace_all(&out, "");
    let out = PREAMBLE.replace(&out, "");
    out.trim().to_string()
}

/// School defaults extracted from a pasted sample notice.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct TemplateSuggestion {
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub manager: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a client; rejects keys that do not match the provider format
    /// so that obviously broken keys never reach the network.
    pub fn new(
        http: reqwest::Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, TranslationError> {
        let api_key = api_key.into();
        if !api_key_format_valid(&api_key) {
            return Err(TranslationError::InvalidApiKey);
        }
        Ok(Self {
            http,
            api_key,
            base_url: base_url.into(),
            model: model.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            self.model,
            self.api_key
        )
    }

    /// One round trip to the generative endpoint, returning the joined reply
    /// text.
    async fn generate(&self, prompt: &str) -> Result<String, TranslationError> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.2,
                max_output_tokens: 4096,
            },
        };

        let response = self
            .http
            .post(self.endpoint())
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;

        if let Some(feedback) = parsed.prompt_feedback {
            if let Some(reason) = feedback.block_reason {
                return Err(TranslationError::SafetyBlocked(reason));
            }
        }

        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or(TranslationError::EmptyResponse)?;

        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(TranslationError::SafetyBlocked("SAFETY".to_string()));
        }

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(TranslationError::EmptyResponse);
        }

        Ok(text)
    }

    /// Extract school defaults from a pasted sample notice. The model is
    /// asked for bare JSON; code fences around the reply are tolerated.
    pub async fn analyze_template(
        &self,
        sample: &str,
    ) -> Result<TemplateSuggestion, TranslationError> {
        if sample.trim().is_empty() {
            return Err(TranslationError::EmptyInput);
        }

        let prompt = format!(
            "다음은 한국 학교 가정통신문의 일부입니다. 여기에서 학교 기본 정보를 추출해 \
             아래 JSON 형식으로만 답하세요. 값을 찾을 수 없으면 빈 문자열을 넣으세요.\n\
             {{\"school\": \"\", \"year\": \"\", \"publisher\": \"\", \"manager\": \"\", \
             \"address\": \"\", \"phone\": \"\"}}\n\n통신문:\n{sample}"
        );

        let raw = self.generate(&prompt).await?;
        let cleaned = clean_model_reply(&raw);
        serde_json::from_str(&cleaned).map_err(|e| {
            log::warn!("template analysis reply was not valid JSON: {e}");
            TranslationError::EmptyResponse
        })
    }
}

fn build_prompt(text: &str, target: LanguageCode) -> String {
    format!(
        "Translate the following Korean school notice text into {}.\n\
         Rules:\n\
         - Preserve all HTML tags, attributes and line breaks exactly as given.\n\
         - Keep numbers, dates, times and proper nouns unchanged.\n\
         - Output ONLY the translated text, with no explanations, no markdown \
         formatting and no \"Translated text:\" preamble.\n\n{}",
        target.english_name(),
        text
    )
}

fn build_simple_prompt(text: &str, target: LanguageCode) -> String {
    format!("Translate into {}:\n\n{}", target.english_name(), text)
}

#[async_trait]
impl Translate for GeminiClient {
    async fn translate(
        &self,
        text: &str,
        target: LanguageCode,
    ) -> Result<String, TranslationError> {
        if text.trim().is_empty() {
            return Err(TranslationError::EmptyInput);
        }

        let raw = self.generate(&build_prompt(text, target)).await?;
        let cleaned = clean_model_reply(&raw);

        // Unchanged output is the heuristic for "translation did not happen";
        // retry once with a simplified prompt before giving up.
        if cleaned.trim() == text.trim() {
            log::debug!("reply unchanged for {target}, retrying with simplified prompt");
            let retry = self.generate(&build_simple_prompt(text, target)).await?;
            let retry_cleaned = clean_model_reply(&retry);
            if retry_cleaned.trim() == text.trim() {
                return Err(TranslationError::Unchanged);
            }
            return Ok(retry_cleaned);
        }

        Ok(cleaned)
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}
