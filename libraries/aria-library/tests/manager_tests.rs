//! Integration tests for `SourceManager` against a real SQLite store
//!
//! These run the full path: factory construction, the scan pipeline, and
//! persistence through `aria_storage::Database` on a real database file.

use aria_core::{AriaError, MetadataReader, Result, SourceConfig, SourceId, TrackMetadata};
use aria_library::{filesystem_source_factory, SourceManager, FILESYSTEM_SOURCE_TYPE};
use aria_storage::Database;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

/// Reader that recognizes tags only for files named "tagged"
struct StubReader;

impl MetadataReader for StubReader {
    fn read(&self, path: &Path) -> Result<TrackMetadata> {
        if path.file_stem().and_then(|s| s.to_str()) == Some("tagged") {
            Ok(TrackMetadata {
                title: Some("Tagged Song".to_string()),
                artist: Some("Some Artist".to_string()),
                album: Some("Some Album".to_string()),
                duration_ms: Some(180_000),
            })
        } else {
            Err(AriaError::metadata("unreadable tags"))
        }
    }
}

struct TestManager {
    manager: SourceManager,
    store: Arc<Database>,
    _temp_dir: TempDir,
}

async fn new_manager() -> TestManager {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
    let store = Arc::new(
        Database::new(&db_url)
            .await
            .expect("Failed to create database"),
    );

    let manager = SourceManager::new(store.clone());
    manager.register_source_type(
        FILESYSTEM_SOURCE_TYPE,
        filesystem_source_factory(Arc::new(StubReader)),
    );

    TestManager {
        manager,
        store,
        _temp_dir: temp_dir,
    }
}

fn write_music_tree(dir: &Path) {
    std::fs::write(dir.join("tagged.mp3"), b"fake audio").unwrap();
    std::fs::write(dir.join("untagged.mp3"), b"fake audio").unwrap();
    std::fs::write(dir.join("cover.jpg"), b"not audio").unwrap();
}

fn paths_config(dir: &Path) -> HashMap<String, String> {
    HashMap::from([("paths".to_string(), dir.display().to_string())])
}

#[tokio::test]
async fn add_source_scans_and_persists_tracks() {
    let music = tempfile::tempdir().unwrap();
    write_music_tree(music.path());

    let t = new_manager().await;
    let id = t
        .manager
        .add_source("My Music", FILESYSTEM_SOURCE_TYPE, paths_config(music.path()))
        .await
        .expect("add succeeds");

    let tracks = t.manager.tracks(&id).await.unwrap();
    assert_eq!(tracks.len(), 2, "audio files only");

    let tagged = tracks
        .iter()
        .find(|t| t.title == "Tagged Song")
        .expect("tagged track indexed");
    assert_eq!(tagged.artist.as_deref(), Some("Some Artist"));
    assert_eq!(tagged.album.as_deref(), Some("Some Album"));
    assert_eq!(tagged.duration_ms, Some(180_000));

    let fallback = tracks
        .iter()
        .find(|t| t.title == "untagged")
        .expect("fallback to file stem");
    assert!(fallback.artist.is_none());

    // Scan finished, so the slot is clear again
    assert!(t.manager.scan_progress().is_none());

    let sources = t.manager.sources().await.unwrap();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].name, "My Music");
    assert!(sources[0].last_scanned.is_some(), "completion is stamped");
    assert_eq!(
        sources[0].config.get("paths").map(String::as_str),
        Some(music.path().display().to_string().as_str()),
        "stamping keeps the config map intact"
    );
}

#[tokio::test]
async fn rescanning_does_not_duplicate_tracks() {
    let music = tempfile::tempdir().unwrap();
    write_music_tree(music.path());

    let t = new_manager().await;
    let id = t
        .manager
        .add_source("My Music", FILESYSTEM_SOURCE_TYPE, paths_config(music.path()))
        .await
        .unwrap();

    t.manager
        .scan_source(CancellationToken::new(), &id)
        .await
        .expect("rescan succeeds");

    let tracks = t.manager.tracks(&id).await.unwrap();
    assert_eq!(tracks.len(), 2, "same paths upsert instead of duplicating");
}

#[tokio::test]
async fn invalid_config_persists_nothing() {
    let t = new_manager().await;
    let err = t
        .manager
        .add_source(
            "Broken",
            FILESYSTEM_SOURCE_TYPE,
            HashMap::from([("paths".to_string(), " ; ".to_string())]),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AriaError::InvalidConfig(_)));
    assert!(t.manager.sources().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_source_type_persists_nothing() {
    let t = new_manager().await;
    let err = t
        .manager
        .add_source("Stream", "webdav", HashMap::new())
        .await
        .unwrap_err();

    assert!(matches!(err, AriaError::UnknownSourceType(_)));
    assert!(t.manager.sources().await.unwrap().is_empty());
}

#[tokio::test]
async fn load_sources_rebuilds_known_types_and_skips_the_rest() {
    use aria_core::MediaStore;

    let music = tempfile::tempdir().unwrap();
    write_music_tree(music.path());

    let t = new_manager().await;

    // Persist one config of each kind directly, as a previous run would have
    let known = SourceConfig::new(FILESYSTEM_SOURCE_TYPE, "Local", paths_config(music.path()));
    let unknown = SourceConfig::new("webdav", "Remote", HashMap::new());
    t.store.save_source_config(&known).await.unwrap();
    t.store.save_source_config(&unknown).await.unwrap();

    t.manager.load_sources().await.expect("load succeeds");

    t.manager
        .scan_source(CancellationToken::new(), &known.id)
        .await
        .expect("rebuilt source scans");
    assert_eq!(t.manager.tracks(&known.id).await.unwrap().len(), 2);

    // The unknown-typed config stays persisted but never became scannable
    let err = t
        .manager
        .scan_source(CancellationToken::new(), &unknown.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AriaError::SourceNotFound(_)));
    assert_eq!(t.manager.sources().await.unwrap().len(), 2);
}

#[tokio::test]
async fn cancelled_scan_reports_an_error_and_keeps_old_tracks() {
    let music = tempfile::tempdir().unwrap();
    write_music_tree(music.path());

    let t = new_manager().await;
    let id = t
        .manager
        .add_source("My Music", FILESYSTEM_SOURCE_TYPE, paths_config(music.path()))
        .await
        .unwrap();

    let cancel = CancellationToken::new();
    cancel.cancel();
    let err = t.manager.scan_source(cancel, &id).await.unwrap_err();
    assert!(matches!(err, AriaError::ScanCancelled));

    let progress = t.manager.scan_progress().expect("failure stays visible");
    assert!(progress.status.starts_with("Error:"), "{}", progress.status);

    // The library built by the first scan is untouched
    assert_eq!(t.manager.tracks(&id).await.unwrap().len(), 2);

    // And a failed scan does not wedge the manager
    t.manager
        .scan_source(CancellationToken::new(), &id)
        .await
        .expect("next scan runs");
}

#[tokio::test]
async fn scanning_an_unknown_id_is_an_error() {
    let t = new_manager().await;
    let err = t
        .manager
        .scan_source(CancellationToken::new(), &SourceId::generate())
        .await
        .unwrap_err();
    assert!(matches!(err, AriaError::SourceNotFound(_)));
}
