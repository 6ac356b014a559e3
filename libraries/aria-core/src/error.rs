//! Core error types for Aria

use crate::types::SourceId;
use thiserror::Error;

/// Result type alias using `AriaError`
pub type Result<T> = std::result::Result<T, AriaError>;

/// Core error type for Aria
#[derive(Error, Debug)]
pub enum AriaError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Metadata parsing errors
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// Source scan failures (traversal, channel breakdown)
    #[error("Scan error: {0}")]
    Scan(String),

    /// Scan stopped by a cancellation signal
    #[error("Scan cancelled")]
    ScanCancelled,

    /// A scan is already running on this manager
    #[error("A scan is already in progress")]
    ScanInProgress,

    /// No registered factory for a source type tag
    #[error("Unknown source type: {0}")]
    UnknownSourceType(String),

    /// A source factory rejected its configuration
    #[error("Invalid source config: {0}")]
    InvalidConfig(String),

    /// No live source with this id
    #[error("Source not found: {0}")]
    SourceNotFound(SourceId),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl AriaError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a metadata error
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }

    /// Create a scan error
    pub fn scan(msg: impl Into<String>) -> Self {
        Self::Scan(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
