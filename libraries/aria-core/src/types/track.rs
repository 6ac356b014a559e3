//! Track domain type

use crate::types::{SourceId, TrackId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// One discovered audio item with extracted metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Owning source
    pub source_id: SourceId,

    /// Denormalized copy of the owning source's type tag
    pub source_type: String,

    /// Resource locator within the source (a file path for filesystem sources)
    pub path: PathBuf,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: Option<String>,

    /// Album name
    pub album: Option<String>,

    /// Track duration in milliseconds
    pub duration_ms: Option<u64>,

    /// When this track was last seen by a scan
    pub last_scanned: DateTime<Utc>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(
        source_id: SourceId,
        source_type: impl Into<String>,
        path: PathBuf,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: TrackId::generate(),
            source_id,
            source_type: source_type.into(),
            path,
            title: title.into(),
            artist: None,
            album: None,
            duration_ms: None,
            last_scanned: Utc::now(),
        }
    }

    /// Get the track duration as a Duration
    pub fn duration(&self) -> Option<Duration> {
        self.duration_ms.map(Duration::from_millis)
    }

    /// Set the track duration from a Duration
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_ms = Some(duration.as_millis() as u64);
    }
}

/// Track metadata extracted from file tags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackMetadata {
    /// Track title
    pub title: Option<String>,

    /// Artist name
    pub artist: Option<String>,

    /// Album name
    pub album: Option<String>,

    /// Duration in milliseconds
    pub duration_ms: Option<u64>,
}

impl TrackMetadata {
    /// Create empty metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if metadata has any useful information
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.artist.is_none()
            && self.album.is_none()
            && self.duration_ms.is_none()
    }
}
