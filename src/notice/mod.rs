//! Notice module - the document model, its validation and HTTP handlers.

pub mod handlers;
pub mod models;
pub mod validation;

pub use models::NoticeData;
pub use validation::{sanitize_text_input, validate_html_content, validate_notice_data};
