//! Source manager
//!
//! The orchestrating facade over the registry, the live sources, the scan
//! pipeline, and the progress tracker. A UI drives these operations from a
//! background task and polls `scan_progress` to render state; nothing here
//! ever blocks on the scan from the polling side.

use crate::progress::{ScanProgress, ScanTracker};
use crate::scanner;
use crate::source::{MediaSource, SourceFactory, SourceRegistry};
use aria_core::{AriaError, MediaStore, Result, SourceConfig, SourceId, Track};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// A durable config together with the live source built from it
struct SourceEntry {
    config: SourceConfig,
    source: Arc<dyn MediaSource>,
}

/// Registers source types, adds and loads sources, and runs scans
pub struct SourceManager {
    store: Arc<dyn MediaStore>,
    registry: RwLock<SourceRegistry>,
    sources: RwLock<HashMap<SourceId, SourceEntry>>,
    tracker: Arc<ScanTracker>,
}

impl SourceManager {
    /// Create a manager over the given persistence collaborator
    pub fn new(store: Arc<dyn MediaStore>) -> Self {
        Self {
            store,
            registry: RwLock::new(SourceRegistry::new()),
            sources: RwLock::new(HashMap::new()),
            tracker: Arc::new(ScanTracker::new()),
        }
    }

    /// Register a factory for a source type; the last registration wins
    pub fn register_source_type(&self, type_tag: impl Into<String>, factory: SourceFactory) {
        self.registry
            .write()
            .expect("registry lock poisoned")
            .register(type_tag, factory);
    }

    /// Add a new source and run its initial full scan
    ///
    /// Fails fast, persisting nothing, if the type is unknown or the factory
    /// rejects the config. Once the config is persisted, a failing first scan
    /// is returned as an error but the source stays registered.
    pub async fn add_source(
        &self,
        name: &str,
        source_type: &str,
        config: HashMap<String, String>,
    ) -> Result<SourceId> {
        let source_config = SourceConfig::new(source_type, name, config);

        let source = {
            let registry = self.registry.read().expect("registry lock poisoned");
            registry.create(source_config.clone())?
        };

        self.store.save_source_config(&source_config).await?;

        let id = source_config.id.clone();
        {
            let mut sources = self.sources.write().expect("sources lock poisoned");
            sources.insert(
                id.clone(),
                SourceEntry {
                    config: source_config,
                    source,
                },
            );
        }

        tracing::info!("added source {} ({})", name, source_type);

        // Initial scan; the source exists even if this fails
        self.scan_source(CancellationToken::new(), &id).await?;
        Ok(id)
    }

    /// Reload every persisted source config and build its live source
    ///
    /// Configs with an unrecognized type, or whose factory rejects them, are
    /// skipped without aborting the rest of the load.
    pub async fn load_sources(&self) -> Result<()> {
        let configs = self.store.list_source_configs().await?;

        let registry = self.registry.read().expect("registry lock poisoned");
        let mut sources = self.sources.write().expect("sources lock poisoned");

        for config in configs {
            let source = match registry.create(config.clone()) {
                Ok(source) => source,
                Err(e) => {
                    tracing::warn!(
                        "skipping source {} ({}): {}",
                        config.name,
                        config.source_type,
                        e
                    );
                    continue;
                }
            };
            sources.insert(config.id.clone(), SourceEntry { config, source });
        }

        Ok(())
    }

    /// Scan a single source, persisting discovered tracks
    ///
    /// Rejects with `ScanInProgress` while another scan is active. On success
    /// the source's `last_scanned` is stamped and persisted before returning.
    pub async fn scan_source(
        &self,
        cancel: CancellationToken,
        source_id: &SourceId,
    ) -> Result<()> {
        let (source, mut config) = {
            let sources = self.sources.read().expect("sources lock poisoned");
            let entry = sources
                .get(source_id)
                .ok_or_else(|| AriaError::SourceNotFound(source_id.clone()))?;
            (entry.source.clone(), entry.config.clone())
        };

        self.tracker.begin(source_id.clone())?;
        let started = Instant::now();

        let outcome = scanner::run(
            self.store.clone(),
            self.tracker.clone(),
            source,
            cancel,
        )
        .await;

        if let Err(e) = outcome {
            self.tracker.fail(&e.to_string());
            return Err(e);
        }

        // Stamp the completed scan; the config map rides along unchanged
        config.last_scanned = Some(chrono::Utc::now());
        if let Err(e) = self.store.save_source_config(&config).await {
            self.tracker.fail(&e.to_string());
            return Err(e);
        }

        {
            let mut sources = self.sources.write().expect("sources lock poisoned");
            if let Some(entry) = sources.get_mut(source_id) {
                entry.config.last_scanned = config.last_scanned;
            }
        }

        let progress = self.tracker.snapshot();
        self.tracker.complete();

        tracing::info!(
            "scan completed for {} in {:?}: {} files seen, {} tracks saved",
            config.name,
            started.elapsed(),
            progress.as_ref().map_or(0, |p| p.total),
            progress.as_ref().map_or(0, |p| p.current),
        );

        Ok(())
    }

    /// Snapshot of the in-flight scan, or `None` when idle
    pub fn scan_progress(&self) -> Option<ScanProgress> {
        self.tracker.snapshot()
    }

    /// All persisted source configs, ordered by display name
    pub async fn sources(&self) -> Result<Vec<SourceConfig>> {
        self.store.list_source_configs().await
    }

    /// All tracks for a source, ordered by artist, album, title
    pub async fn tracks(&self, source_id: &SourceId) -> Result<Vec<Track>> {
        self.store.list_tracks(source_id).await
    }
}
