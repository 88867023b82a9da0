//! Background persistence worker for the settings blob.
//!
//! Settings are saved wholesale on every edit, so the editor can emit a burst
//! of saves per keystroke-ish interaction. The worker debounces those bursts
//! and writes only the latest blob.

use std::sync::Arc;
use tokio::sync::mpsc;

use super::model::Settings;
use super::store::SettingsStore;

const DEBOUNCE_MS: u64 = 500;

/// Receives settings via channel and persists them to the store, collapsing
/// rapid successive saves into one write (last write wins).
pub async fn start_persistence_worker(
    mut receiver: mpsc::Receiver<Settings>,
    store: Arc<dyn SettingsStore>,
) {
    log::info!("Settings persistence worker started");

    while let Some(settings) = receiver.recv().await {
        // Drain any pending saves to get the latest blob
        let mut latest = settings;
        while let Ok(newer) = receiver.try_recv() {
            latest = newer;
        }

        tokio::time::sleep(tokio::time::Duration::from_millis(DEBOUNCE_MS)).await;

        // Drain again to capture saves that arrived during the wait
        while let Ok(newer) = receiver.try_recv() {
            latest = newer;
        }

        if let Err(e) = store.save(&latest).await {
            log::error!("Failed to persist settings: {e}");
        } else {
            log::debug!("Settings persisted");
        }
    }

    log::info!("Settings persistence worker stopped");
}
