//! Settings file watcher for hot reload.
//!
//! # Data Flow
//! ```text
//! notify event (modify / create)
//!     → reload(): load_settings + env overrides
//!     → skipped when identical to the last settings sent
//!     → mpsc channel
//!     → apply_updates(): merge into a DebugContext
//! ```
//!
//! Operators that were already constructed keep the configuration they
//! resolved; only operators built after a reload see it.

use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::global::DebugContext;
use crate::config::loader::{apply_settings, load_settings};
use crate::config::schema::DebugSettings;

/// Watches one settings file and forwards reloaded settings.
pub struct SettingsWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<DebugSettings>,
}

impl SettingsWatcher {
    /// Returns the watcher and a receiver for reloaded settings.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<DebugSettings>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Watch `path` and apply every distinct reload to `context`.
    ///
    /// Must be called inside a tokio runtime. Dropping the returned watcher
    /// stops the reloads and lets the apply task finish.
    pub fn spawn<C>(
        path: &Path,
        context: C,
    ) -> Result<(RecommendedWatcher, JoinHandle<()>), notify::Error>
    where
        C: Deref<Target = DebugContext> + Send + 'static,
    {
        let (watcher, updates) = Self::new(path);
        let watcher = watcher.run()?;
        Ok((watcher, apply_updates(updates, context)))
    }

    /// Start watching the file. Dropping the returned watcher stops it.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx;
        let path = self.path.clone();
        let mut last_sent: Option<DebugSettings> = None;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    if let Some(settings) = reload(&path, &mut last_sent) {
                        let _ = tx.send(settings);
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Debug settings watcher started");
        Ok(watcher)
    }
}

/// Load the file again, returning settings only when they differ from `last_sent`.
///
/// A single save usually produces several filesystem events; duplicates are
/// dropped here. A failed load keeps `last_sent` untouched.
pub(crate) fn reload(
    path: &Path,
    last_sent: &mut Option<DebugSettings>,
) -> Option<DebugSettings> {
    match load_settings(path) {
        Ok(settings) => {
            let settings = settings.with_env_overrides();
            if last_sent.as_ref() == Some(&settings) {
                tracing::debug!(path = ?path, "Debug settings unchanged, skipping reload");
                return None;
            }
            tracing::info!(path = ?path, "Debug settings change detected, reloading");
            *last_sent = Some(settings.clone());
            Some(settings)
        }
        Err(e) => {
            tracing::error!(
                "Failed to reload debug settings: {}. Keeping current configuration.",
                e
            );
            None
        }
    }
}

/// Apply every received settings value to `context` until the sender is dropped.
pub fn apply_updates<C>(
    mut updates: mpsc::UnboundedReceiver<DebugSettings>,
    context: C,
) -> JoinHandle<()>
where
    C: Deref<Target = DebugContext> + Send + 'static,
{
    tokio::spawn(async move {
        while let Some(settings) = updates.recv().await {
            apply_settings(&context, settings);
        }
        tracing::debug!("Debug settings channel closed");
    })
}
