use std::env;
use std::path::PathBuf;

use crate::translation::client::{DEFAULT_MODEL, GEMINI_API_BASE};

/// Runtime configuration, read once at startup from the environment
/// (`.env` supported via dotenvy).
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    /// Gemini endpoint base; point at a proxy to avoid exposing the key.
    pub gemini_api_url: String,
    pub gemini_model: String,
    /// Optional default key used when the saved settings carry none.
    pub gemini_api_key: Option<String>,
    pub settings_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            gemini_api_url: env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| GEMINI_API_BASE.to_string()),
            gemini_model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            settings_path: env::var("SETTINGS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data/school_notice_settings.json")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            gemini_api_url: GEMINI_API_BASE.to_string(),
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_api_key: None,
            settings_path: PathBuf::from("./data/school_notice_settings.json"),
        }
    }
}
