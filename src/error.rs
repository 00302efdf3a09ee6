//! Error types for world queries and configuration.

use thiserror::Error;

use crate::coords::ChunkCoord;

/// World error types.
#[derive(Debug, Error)]
pub enum WorldError {
    /// Query touched a chunk that has not been generated (or was evicted)
    #[error("chunk {chunk} is not resident; ensure the window around it first")]
    ChunkNotResident {
        /// The chunk that was queried
        chunk: ChunkCoord,
    },
    /// Configuration file could not be read
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        /// Path that was read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// Configuration JSON is malformed
    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Result type for world operations.
pub type Result<T> = std::result::Result<T, WorldError>;
