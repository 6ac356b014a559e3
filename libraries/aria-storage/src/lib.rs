//! Aria Storage
//!
//! `SQLite` persistence layer for the Aria media-library index.
//!
//! This crate provides the durable side of the indexer: source configs and
//! discovered tracks, behind the `aria_core::MediaStore` trait so the scan
//! pipeline never sees SQL.
//!
//! # Example
//!
//! ```rust,no_run
//! use aria_storage::Database;
//! use aria_core::MediaStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new("sqlite://aria.db").await?;
//! let sources = db.list_source_configs().await?;
//! # Ok(())
//! # }
//! ```

mod database;
mod error;

pub use database::Database;
pub use error::StorageError;

use sqlx::sqlite::SqlitePool;

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://aria.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!("creating pool with URL: {}", database_url);

    // Parse the URL into options so we can configure SQLite behavior
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true) // Create database file if it doesn't exist
        .journal_mode(SqliteJournalMode::Wal) // Use WAL mode for better concurrency
        .foreign_keys(true) // tracks.source_id must reference a real source
        .busy_timeout(std::time::Duration::from_secs(30)); // Wait up to 30s for locks

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}
