//! Aria Library
//!
//! Source scanning and indexing pipeline for the Aria media library.
//!
//! This crate is the core of the indexer:
//! - **Sources**: the `MediaSource` capability and the filesystem variant
//! - **Registry**: type-tag to factory mapping for constructing live sources
//! - **Pipeline**: the concurrent scan/persist pipeline
//! - **Progress**: the single-flight scan progress tracker a UI polls
//! - **Manager**: the orchestrating facade over all of the above
//!
//! # Example
//!
//! ```rust,no_run
//! use aria_library::{filesystem_source_factory, LoftyTagReader, SourceManager};
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! # async fn example(store: Arc<dyn aria_core::MediaStore>) -> aria_core::Result<()> {
//! let manager = SourceManager::new(store);
//! manager.register_source_type(
//!     "filesystem",
//!     filesystem_source_factory(Arc::new(LoftyTagReader::new())),
//! );
//!
//! let id = manager
//!     .add_source(
//!         "My Music",
//!         "filesystem",
//!         HashMap::from([("paths".to_string(), "/music".to_string())]),
//!     )
//!     .await?;
//!
//! let tracks = manager.tracks(&id).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod filesystem;
mod manager;
mod metadata;
mod progress;
mod scanner;
mod source;

pub use filesystem::{filesystem_source_factory, FilesystemSource, FILESYSTEM_SOURCE_TYPE};
pub use manager::SourceManager;
pub use metadata::LoftyTagReader;
pub use progress::{ScanProgress, ScanTracker};
pub use source::{FileObserver, MediaSource, SourceFactory, SourceRegistry};
