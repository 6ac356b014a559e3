//! Source configuration types
//!
//! A `SourceConfig` is the durable, serializable description of a media
//! source. The live, scannable object it describes is constructed from it by
//! a registered factory and lives only in memory.

use crate::types::SourceId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Durable description of a media source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Unique source identifier
    pub id: SourceId,

    /// Type tag selecting a registered factory (e.g. "filesystem").
    /// Immutable after creation.
    pub source_type: String,

    /// Human-readable display name
    pub name: String,

    /// Source-type-specific settings, opaque to the manager
    pub config: HashMap<String, String>,

    /// When this source last completed a full scan
    pub last_scanned: Option<DateTime<Utc>>,
}

impl SourceConfig {
    /// Create a new source config with a freshly generated id
    pub fn new(
        source_type: impl Into<String>,
        name: impl Into<String>,
        config: HashMap<String, String>,
    ) -> Self {
        Self {
            id: SourceId::generate(),
            source_type: source_type.into(),
            name: name.into(),
            config,
            last_scanned: None,
        }
    }
}
