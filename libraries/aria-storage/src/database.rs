//! Database implementation

use crate::error::{Result, StorageError};
use crate::create_pool;
use aria_core::{AriaError, MediaStore, SourceConfig, SourceId, Track, TrackId};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use std::collections::HashMap;
use std::path::PathBuf;

/// SQLite-backed media store
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection
    ///
    /// # Errors
    /// Returns an error if the connection fails or migrations fail
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = create_pool(database_url).await?;

        // Run migrations manually for reliability across different execution contexts
        Self::run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    /// Create database from an existing pool; migrations must already have run
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run database migrations
    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        // Embedded migrations for reliability
        const MIGRATIONS: &[&str] = &[
            include_str!("../migrations/20250301000001_create_sources.sql"),
            include_str!("../migrations/20250301000002_create_tracks.sql"),
        ];

        for migration in MIGRATIONS {
            sqlx::raw_sql(migration)
                .execute(pool)
                .await
                .map_err(|e| StorageError::Migration(e.to_string()))?;
        }

        Ok(())
    }
}

fn source_config_from_row(row: &sqlx::sqlite::SqliteRow) -> aria_core::Result<SourceConfig> {
    let config: HashMap<String, String> =
        serde_json::from_str(&row.get::<String, _>("config"))
            .map_err(|e| AriaError::storage(e.to_string()))?;

    let last_scanned = row
        .get::<Option<i64>, _>("last_scanned")
        .map(|ts| {
            chrono::DateTime::from_timestamp(ts, 0)
                .ok_or_else(|| AriaError::storage("Invalid timestamp"))
        })
        .transpose()?;

    Ok(SourceConfig {
        id: SourceId::new(row.get::<String, _>("id")),
        source_type: row.get("source_type"),
        name: row.get("name"),
        config,
        last_scanned,
    })
}

fn track_from_row(row: &sqlx::sqlite::SqliteRow) -> aria_core::Result<Track> {
    Ok(Track {
        id: TrackId::new(row.get::<String, _>("id")),
        source_id: SourceId::new(row.get::<String, _>("source_id")),
        source_type: row.get("source_type"),
        path: PathBuf::from(row.get::<String, _>("path")),
        title: row.get("title"),
        artist: row.get("artist"),
        album: row.get("album"),
        duration_ms: row.get::<Option<i64>, _>("duration_ms").map(|d| d as u64),
        last_scanned: chrono::DateTime::from_timestamp(row.get::<i64, _>("last_scanned"), 0)
            .ok_or_else(|| AriaError::storage("Invalid timestamp"))?,
    })
}

#[async_trait]
impl MediaStore for Database {
    async fn save_source_config(&self, config: &SourceConfig) -> aria_core::Result<()> {
        let config_json = serde_json::to_string(&config.config)?;

        sqlx::query(
            "INSERT INTO sources (id, source_type, name, config, last_scanned)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                 name = excluded.name,
                 config = excluded.config,
                 last_scanned = excluded.last_scanned",
        )
        .bind(config.id.as_str())
        .bind(&config.source_type)
        .bind(&config.name)
        .bind(config_json)
        .bind(config.last_scanned.map(|t| t.timestamp()))
        .execute(&self.pool)
        .await
        .map_err(|e| AriaError::storage(e.to_string()))?;

        Ok(())
    }

    async fn list_source_configs(&self) -> aria_core::Result<Vec<SourceConfig>> {
        let rows = sqlx::query(
            "SELECT id, source_type, name, config, last_scanned
             FROM sources ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AriaError::storage(e.to_string()))?;

        rows.iter().map(source_config_from_row).collect()
    }

    async fn save_track(&self, track: &Track) -> aria_core::Result<()> {
        // Conflict target is (source_id, path): re-scanning an unchanged tree
        // overwrites rows in place instead of accumulating duplicates. The
        // existing row keeps its id.
        sqlx::query(
            "INSERT INTO tracks (id, source_id, source_type, path, title, artist, album, duration_ms, last_scanned)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(source_id, path) DO UPDATE SET
                 title = excluded.title,
                 artist = excluded.artist,
                 album = excluded.album,
                 duration_ms = excluded.duration_ms,
                 last_scanned = excluded.last_scanned",
        )
        .bind(track.id.as_str())
        .bind(track.source_id.as_str())
        .bind(&track.source_type)
        .bind(track.path.to_string_lossy().to_string())
        .bind(&track.title)
        .bind(&track.artist)
        .bind(&track.album)
        .bind(track.duration_ms.map(|d| d as i64))
        .bind(track.last_scanned.timestamp())
        .execute(&self.pool)
        .await
        .map_err(|e| AriaError::storage(e.to_string()))?;

        Ok(())
    }

    async fn list_tracks(&self, source_id: &SourceId) -> aria_core::Result<Vec<Track>> {
        let rows = sqlx::query(
            "SELECT id, source_id, source_type, path, title, artist, album, duration_ms, last_scanned
             FROM tracks
             WHERE source_id = ?
             ORDER BY artist, album, title",
        )
        .bind(source_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AriaError::storage(e.to_string()))?;

        rows.iter().map(track_from_row).collect()
    }
}
