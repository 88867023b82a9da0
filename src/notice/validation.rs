//! Input validation and sanitization for notice data.
//!
//! Provides clear, descriptive validation errors for the editor frontend and
//! regex-based stripping of dangerous HTML fragments. The sanitizer is not a
//! full HTML sanitizer; it removes the known-dangerous patterns the editor
//! must never emit and nothing more.

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

use crate::notice::models::NoticeData;

lazy_static! {
    static ref SCRIPT_BLOCK: Regex =
        Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap();
    static ref SCRIPT_TAG: Regex = Regex::new(r"(?i)</?script\b[^>]*>").unwrap();
    static ref IFRAME_BLOCK: Regex =
        Regex::new(r"(?is)<iframe\b[^>]*>.*?</iframe\s*>").unwrap();
    static ref IFRAME_TAG: Regex = Regex::new(r"(?i)</?iframe\b[^>]*>").unwrap();
    static ref JS_URL: Regex = Regex::new(r"(?i)javascript\s*:").unwrap();
    static ref EVENT_ATTR: Regex =
        Regex::new(r#"(?i)\son\w+\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#).unwrap();
    static ref DANGEROUS: Regex =
        Regex::new(r"(?i)<script\b|<iframe\b|javascript\s*:|\bon\w+\s*=").unwrap();
    static ref PHONE: Regex = Regex::new(r"^0\d{1,2}-?\d{3,4}-?\d{4}$").unwrap();
}

/// Validation error with detailed, user-friendly messages.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// Human-readable error message in Korean
    pub message: String,
    /// Suggestion for how to fix the error
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Create error for empty required field
    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{label}은(는) 비워 둘 수 없습니다"))
            .with_suggestion(format!("{label}을(를) 입력해 주세요"))
    }

    /// Create error for invalid phone number
    pub fn invalid_phone(field: &str) -> Self {
        Self::new(field, "전화번호 형식이 올바르지 않습니다")
            .with_suggestion("예: 02-1234-5678 또는 031-123-4567")
    }

    /// Create error for unsafe HTML content
    pub fn unsafe_html(field: &str) -> Self {
        Self::new(field, "허용되지 않는 HTML이 포함되어 있습니다")
            .with_suggestion("스크립트, iframe, 인라인 이벤트 속성을 제거해 주세요")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors with formatted output.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// One human-readable line per violation, each naming the failing field.
    pub fn into_messages(self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }
}

/// Validate that a string is not empty after trimming
pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    }
}

/// Validate Korean phone number format (e.g. 02-1234-5678, 031-123-4567)
pub fn validate_phone(value: &str, field: &str, errors: &mut ValidationErrors) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(ValidationError::empty_field(field, "전화번호"));
        return;
    }
    if !PHONE.is_match(trimmed) {
        errors.add(ValidationError::invalid_phone(field));
    }
}

/// Check the whole notice and return one message per violation.
///
/// Never fails hard; callers decide whether a non-empty result blocks the
/// operation or is only logged.
pub fn validate_notice_data(data: &NoticeData) -> Vec<String> {
    let mut errors = ValidationErrors::new();

    validate_required(&data.title, "title", "제목", &mut errors);
    validate_required(&data.school, "school", "학교명", &mut errors);
    validate_required(&data.year, "year", "학년도", &mut errors);
    validate_required(&data.content, "content", "본문 내용", &mut errors);
    validate_required(&data.date, "date", "발행일", &mut errors);
    validate_required(&data.signature, "signature", "서명", &mut errors);
    validate_phone(&data.phone, "phone", &mut errors);

    if !validate_html_content(&data.content) {
        errors.add(ValidationError::unsafe_html("content"));
    }

    errors.into_messages()
}

fn strip_dangerous_once(input: &str) -> String {
    let out = SCRIPT_BLOCK.replace_all(input, "");
    let out = SCRIPT_TAG.replace_all(&out, "");
    let out = IFRAME_BLOCK.replace_all(&out, "");
    let out = IFRAME_TAG.replace_all(&out, "");
    let out = EVENT_ATTR.replace_all(&out, "");
    let out = JS_URL.replace_all(&out, "");
    out.into_owned()
}

/// Strip dangerous fragments from user input.
///
/// Removes `<script>`/`<iframe>` blocks and stray tags, `javascript:` URL
/// schemes and inline `on*=` event-handler attributes. Stripping can splice
/// surviving text into a new dangerous fragment (`<scr<iframe>ipt>`), so the
/// pass repeats until a fixpoint that passes [`validate_html_content`];
/// leftover partial tokens the targeted patterns cannot remove (such as an
/// unterminated `<script`) are dropped outright. The result always passes
/// the gate, and sanitizing already-sanitized input is a no-op.
pub fn sanitize_text_input(input: &str) -> String {
    let mut current = input.to_string();
    loop {
        let next = strip_dangerous_once(&current);
        if next != current {
            current = next;
            continue;
        }
        if !DANGEROUS.is_match(&next) {
            return next;
        }
        current = DANGEROUS.replace_all(&next, "").into_owned();
    }
}

/// Boolean gate over the same dangerous patterns; used to reject rich-text
/// editor output before it is accepted into state.
pub fn validate_html_content(html: &str) -> bool {
    !DANGEROUS.is_match(html)
}
