use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// School/contact defaults plus the optional Gemini API key.
///
/// Persisted verbatim as one JSON blob under
/// [`crate::settings::store::SETTINGS_KEY`]; no schema version, overwritten
/// wholesale on every save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Settings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub manager: String,
}
