//! The source capability and its factory registry
//!
//! A `MediaSource` is a live, scannable provider of tracks constructed from a
//! durable `SourceConfig` by a factory registered under the config's type
//! tag. The registry keeps the set of known source kinds open-ended without
//! the manager knowing any concrete variant.

use aria_core::{AriaError, Result, SourceConfig, Track};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Callback invoked once per file a scan visits, audio or not.
///
/// This exists so progress totals reflect "files examined" rather than
/// "tracks found", which is what makes the counter meaningful on large trees
/// with mixed content.
pub type FileObserver = Box<dyn Fn(&Path) + Send + Sync>;

/// A pluggable provider of tracks from some origin
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Stable type tag, used for persistence and factory lookup
    fn source_type(&self) -> &str;

    /// Human-readable display name
    fn name(&self) -> &str;

    /// Scan the source, emitting discovered tracks through `tracks`.
    ///
    /// `on_file` must be invoked exactly once per file visited, before
    /// deciding whether the file yields a track. Taking the sender by value
    /// means the channel closes on every exit path, so the consumer side can
    /// terminate deterministically. When `cancel` fires, the scan stops
    /// between files and returns `AriaError::ScanCancelled`; tracks already
    /// emitted remain valid.
    async fn scan(
        &self,
        cancel: CancellationToken,
        tracks: mpsc::Sender<Track>,
        on_file: FileObserver,
    ) -> Result<()>;
}

/// Constructor turning a serialized config into a live source
pub type SourceFactory = Box<dyn Fn(SourceConfig) -> Result<Arc<dyn MediaSource>> + Send + Sync>;

/// Maps source-type tags to their factories
#[derive(Default)]
pub struct SourceRegistry {
    factories: HashMap<String, SourceFactory>,
}

impl SourceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for a type tag; the last registration wins
    pub fn register(&mut self, type_tag: impl Into<String>, factory: SourceFactory) {
        self.factories.insert(type_tag.into(), factory);
    }

    /// Whether a factory is registered for this tag
    pub fn contains(&self, type_tag: &str) -> bool {
        self.factories.contains_key(type_tag)
    }

    /// Construct a live source for the config's type tag
    ///
    /// # Errors
    /// `UnknownSourceType` if no factory is registered for the tag, or
    /// whatever the factory itself rejects the config with.
    pub fn create(&self, config: SourceConfig) -> Result<Arc<dyn MediaSource>> {
        let factory = self
            .factories
            .get(&config.source_type)
            .ok_or_else(|| AriaError::UnknownSourceType(config.source_type.clone()))?;
        factory(config)
    }
}
