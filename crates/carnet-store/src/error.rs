//! Error types for carnet-store.

use std::path::PathBuf;

/// Result type for carnet-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in carnet-store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A CSV table exists but could not be read or written.
    #[error("Table error in {path}: {source}")]
    Table {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to create the data directory tree.
    #[error("Failed to create data directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The vehicle registry exists but is not valid JSON.
    #[error("Vehicle registry error: {0}")]
    Registry(#[from] serde_json::Error),

    /// An attachment source path without a usable file name or extension.
    #[error("Not a usable attachment path: {0}")]
    InvalidAttachment(PathBuf),

    /// Timestamp formatting failed.
    #[error("Timestamp error: {0}")]
    Timestamp(#[from] time::error::Format),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
