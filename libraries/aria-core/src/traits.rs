//! Collaborator traits for the Aria indexer core

use crate::error::Result;
use crate::types::{SourceConfig, SourceId, Track, TrackMetadata};
use async_trait::async_trait;
use std::path::Path;

/// Persistence collaborator for source configs and tracks
///
/// Implementers provide durable storage so a browsing surface can query the
/// index without re-scanning. The scan pipeline writes through this trait
/// from a spawned task, so implementations must be usable behind an
/// `Arc<dyn MediaStore>`.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Upsert a source config, keyed by id
    async fn save_source_config(&self, config: &SourceConfig) -> Result<()>;

    /// Get all persisted source configs, ordered by display name
    async fn list_source_configs(&self) -> Result<Vec<SourceConfig>>;

    /// Upsert a track; re-scanning the same path overwrites the existing
    /// record (last-write-wins, keyed by `(source_id, path)`)
    async fn save_track(&self, track: &Track) -> Result<()>;

    /// Get all tracks for a source, ordered by artist, album, title
    async fn list_tracks(&self, source_id: &SourceId) -> Result<Vec<Track>>;
}

/// Tag metadata reader
///
/// Implementers extract embedded metadata from audio files. A failed read is
/// recoverable for callers: discovery falls back to filename-derived titles.
pub trait MetadataReader: Send + Sync {
    /// Read metadata from an audio file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    fn read(&self, path: &Path) -> Result<TrackMetadata>;
}
