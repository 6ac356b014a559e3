//! Tag metadata reader implementation using lofty

use aria_core::{AriaError, MetadataReader, Result, TrackMetadata};
use lofty::{AudioFile, TaggedFileExt};
use std::path::Path;

/// Metadata reader using the lofty library
pub struct LoftyTagReader;

impl LoftyTagReader {
    /// Create a new tag reader
    pub fn new() -> Self {
        Self
    }

    /// Extract the fields we index from a lofty tag
    fn extract_from_tag(tag: &lofty::Tag) -> TrackMetadata {
        let mut metadata = TrackMetadata::new();

        for item in tag.items() {
            match item.key() {
                lofty::ItemKey::TrackTitle => {
                    metadata.title = item.value().text().map(|s| s.to_string());
                }
                lofty::ItemKey::TrackArtist => {
                    metadata.artist = item.value().text().map(|s| s.to_string());
                }
                lofty::ItemKey::AlbumTitle => {
                    metadata.album = item.value().text().map(|s| s.to_string());
                }
                _ => {}
            }
        }

        metadata
    }
}

impl Default for LoftyTagReader {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataReader for LoftyTagReader {
    fn read(&self, path: &Path) -> Result<TrackMetadata> {
        let tagged_file =
            lofty::read_from_path(path).map_err(|e| AriaError::metadata(e.to_string()))?;

        // Duration comes from stream properties, not the tag
        let duration_ms = Some(tagged_file.properties().duration().as_millis() as u64);

        let metadata = if let Some(primary) = tagged_file.primary_tag() {
            let mut meta = Self::extract_from_tag(primary);
            meta.duration_ms = duration_ms;
            meta
        } else if let Some(first) = tagged_file.tags().first() {
            let mut meta = Self::extract_from_tag(first);
            meta.duration_ms = duration_ms;
            meta
        } else {
            // No tags found - return empty metadata with just duration
            let mut meta = TrackMetadata::new();
            meta.duration_ms = duration_ms;
            meta
        };

        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_nonexistent_file_returns_error() {
        let reader = LoftyTagReader::new();
        let result = reader.read(Path::new("/nonexistent/file.mp3"));
        assert!(result.is_err());
    }

    #[test]
    fn read_garbage_file_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.mp3");
        std::fs::write(&path, b"this is not an mp3 stream").unwrap();

        let reader = LoftyTagReader::new();
        assert!(reader.read(&path).is_err());
    }
}
