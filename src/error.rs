//! Error types for recall.

use std::io;
use thiserror::Error;

/// Result type alias for recall operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in recall operations.
///
/// Generation failures are not part of this enum: they are carried by
/// [`GenerationError`](crate::client::GenerationError) so a failed turn can
/// still be shown to the user as ordinary reply text.
#[derive(Debug, Error)]
pub enum Error {
    /// Storage I/O error.
    #[error("Storage error: {0}")]
    Storage(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session name is empty or contains characters not allowed in a record name.
    #[error("Invalid session name: {0:?}")]
    InvalidSessionName(String),

    /// A session with this name already exists.
    #[error("Session already exists: {0}")]
    SessionExists(String),
}
