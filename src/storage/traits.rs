//! Storage trait definitions.

use crate::core::Message;
use crate::error::Result;
use chrono::{DateTime, Utc};

/// Storage backend for session transcripts.
pub trait TranscriptStore: Send + Sync {
    /// Get the transcript for a session, or `None` if it has no record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be read or is not a message
    /// sequence.
    fn get_transcript(&self, session: &str) -> Result<Option<Vec<Message>>>;

    /// Overwrite the transcript for a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails. A failed write
    /// leaves the previous record untouched.
    fn put_transcript(&self, session: &str, transcript: &[Message]) -> Result<()>;

    /// List stored sessions, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn list_sessions(&self) -> Result<Vec<SessionSummary>>;

    /// Delete a session. Deleting a missing session is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn delete_session(&self, session: &str) -> Result<()>;

    /// Rename a session. Renaming a session with no record is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `SessionExists` if `to` already has a record, or an error if
    /// the storage operation fails.
    fn rename_session(&self, from: &str, to: &str) -> Result<()>;
}

/// Summary information for a session.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    /// Session name.
    pub name: String,

    /// Number of messages in the transcript.
    pub message_count: usize,

    /// When the transcript was last written.
    pub updated_at: DateTime<Utc>,
}
