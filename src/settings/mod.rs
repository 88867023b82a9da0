//! Settings module - persisted school/contact defaults and the API key.

pub mod handlers;
pub mod model;
pub mod persistence;
pub mod store;

pub use model::Settings;
pub use store::{FileSettingsStore, MemorySettingsStore, SettingsStore, SETTINGS_KEY};
