//! Pluggable persistence for the settings blob.
//!
//! The browser original kept this in `localStorage`; here it is an injected
//! key-value store so the backing medium stays swappable (file on disk in
//! production, memory in tests).

use async_trait::async_trait;
use parking_lot::RwLock;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::model::Settings;

/// Storage key / file stem for the settings blob.
pub const SETTINGS_KEY: &str = "school_notice_settings";

#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load the persisted blob; `None` when nothing was saved yet.
    async fn load(&self) -> Result<Option<Settings>, String>;
    /// Overwrite the blob wholesale.
    async fn save(&self, settings: &Settings) -> Result<(), String>;
}

/// File-backed store. Writes go to a temp file in the same directory and are
/// renamed into place, so a crash mid-write never leaves a torn blob.
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parent_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn load(&self) -> Result<Option<Settings>, String> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(format!("failed to read settings file: {e}")),
        };
        let settings =
            serde_json::from_str(&raw).map_err(|e| format!("failed to parse settings: {e}"))?;
        Ok(Some(settings))
    }

    async fn save(&self, settings: &Settings) -> Result<(), String> {
        let json = serde_json::to_vec_pretty(settings)
            .map_err(|e| format!("failed to serialize settings: {e}"))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("failed to create settings directory: {e}"))?;
        }

        let mut tmp = tempfile::NamedTempFile::new_in(self.parent_dir())
            .map_err(|e| format!("failed to create temp settings file: {e}"))?;
        tmp.write_all(&json)
            .map_err(|e| format!("failed to write settings: {e}"))?;
        tmp.persist(&self.path)
            .map_err(|e| format!("failed to replace settings file: {e}"))?;
        Ok(())
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemorySettingsStore {
    inner: RwLock<Option<Settings>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn load(&self) -> Result<Option<Settings>, String> {
        Ok(self.inner.read().clone())
    }

    async fn save(&self, settings: &Settings) -> Result<(), String> {
        *self.inner.write() = Some(settings.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSettingsStore::new(dir.path().join(format!("{SETTINGS_KEY}.json")));

        assert!(store.load().await.unwrap().is_none());

        let settings = Settings {
            school: "사랑초등학교".to_string(),
            phone: "02-1234-5678".to_string(),
            ..Default::default()
        };
        store.save(&settings).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, settings);
    }

    #[tokio::test]
    async fn test_file_store_overwrites_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSettingsStore::new(dir.path().join("settings.json"));

        let first = Settings {
            school: "첫번째".to_string(),
            manager: "담당자".to_string(),
            ..Default::default()
        };
        store.save(&first).await.unwrap();

        let second = Settings {
            school: "두번째".to_string(),
            ..Default::default()
        };
        store.save(&second).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.school, "두번째");
        assert!(loaded.manager.is_empty(), "old blob must not bleed through");
    }
}
