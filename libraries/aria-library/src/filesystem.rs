//! Filesystem source
//!
//! Walks one or more root directories, classifies audio files by extension,
//! and reads embedded tags through an injected `MetadataReader`. Tag failures
//! degrade to filename-derived titles; they never abort a scan.

use crate::source::{FileObserver, MediaSource, SourceFactory};
use aria_core::{
    AriaError, MetadataReader, Result, SourceConfig, SourceId, Track,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use walkdir::WalkDir;

/// Type tag of the filesystem source kind
pub const FILESYSTEM_SOURCE_TYPE: &str = "filesystem";

/// A media source backed by one or more directory trees
pub struct FilesystemSource {
    id: SourceId,
    name: String,
    root_paths: Vec<PathBuf>,
    reader: Arc<dyn MetadataReader>,
}

impl FilesystemSource {
    /// Create a filesystem source over the given roots
    pub fn new(
        id: SourceId,
        name: impl Into<String>,
        root_paths: Vec<PathBuf>,
        reader: Arc<dyn MetadataReader>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            root_paths,
            reader,
        }
    }

    /// Build a track for an audio file, falling back to the file stem as the
    /// title when tags are unreadable or carry no title
    fn read_track(&self, path: &Path) -> Track {
        let mut track = Track::new(
            self.id.clone(),
            FILESYSTEM_SOURCE_TYPE,
            path.to_path_buf(),
            file_stem_title(path),
        );

        match self.reader.read(path) {
            Ok(meta) => {
                if let Some(title) = meta.title.filter(|t| !t.is_empty()) {
                    track.title = title;
                }
                track.artist = meta.artist;
                track.album = meta.album;
                track.duration_ms = meta.duration_ms;
            }
            Err(e) => {
                tracing::debug!("no readable tags for {}: {}", path.display(), e);
            }
        }

        track
    }
}

#[async_trait]
impl MediaSource for FilesystemSource {
    fn source_type(&self) -> &str {
        FILESYSTEM_SOURCE_TYPE
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn scan(
        &self,
        cancel: CancellationToken,
        tracks: mpsc::Sender<Track>,
        on_file: FileObserver,
    ) -> Result<()> {
        for root in &self.root_paths {
            for entry in WalkDir::new(root).follow_links(false) {
                if cancel.is_cancelled() {
                    return Err(AriaError::ScanCancelled);
                }

                let entry = entry.map_err(|e| AriaError::scan(e.to_string()))?;
                if !entry.file_type().is_file() {
                    continue;
                }

                let path = entry.path();
                on_file(path);

                if !is_audio_file(path) {
                    continue;
                }

                let track = self.read_track(path);
                tracks
                    .send(track)
                    .await
                    .map_err(|_| AriaError::scan("track channel closed"))?;
            }
        }

        Ok(())
    }
}

/// Create a factory for filesystem sources
///
/// The factory reads the semicolon-separated `paths` key from the source
/// config; a missing or effectively empty value is a configuration error.
pub fn filesystem_source_factory(reader: Arc<dyn MetadataReader>) -> SourceFactory {
    Box::new(move |config: SourceConfig| {
        let paths = config
            .config
            .get("paths")
            .ok_or_else(|| AriaError::invalid_config("missing `paths` in source config"))?;

        let roots: Vec<PathBuf> = paths
            .split(';')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .collect();

        if roots.is_empty() {
            return Err(AriaError::invalid_config("`paths` contains no directories"));
        }

        Ok(Arc::new(FilesystemSource::new(
            config.id,
            config.name,
            roots,
            reader.clone(),
        )) as Arc<dyn MediaSource>)
    })
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false)
}

fn file_stem_title(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Unknown")
        .to_string()
}
