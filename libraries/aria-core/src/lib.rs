//! Aria Core
//!
//! Domain types, traits, and error handling for the Aria media-library
//! indexer.
//!
//! This crate defines:
//! - **Domain Types**: `SourceConfig`, `Track`, `TrackMetadata` and their IDs
//! - **Collaborator Traits**: `MediaStore` (persistence), `MetadataReader`
//! - **Error Handling**: Unified `AriaError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use aria_core::types::{SourceConfig, SourceId, Track};
//! use std::collections::HashMap;
//! use std::path::PathBuf;
//!
//! let config = SourceConfig::new(
//!     "filesystem",
//!     "My Music",
//!     HashMap::from([("paths".to_string(), "/music".to_string())]),
//! );
//!
//! let track = Track::new(config.id.clone(), "filesystem", PathBuf::from("/music/song.mp3"), "Song");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{AriaError, Result};
pub use traits::{MediaStore, MetadataReader};
pub use types::{SourceConfig, SourceId, Track, TrackId, TrackMetadata};
