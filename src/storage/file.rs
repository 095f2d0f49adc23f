//! File-based storage backend.

use crate::core::Message;
use crate::core::session::validate_name;
use crate::error::{Error, Result};
use crate::storage::traits::{SessionSummary, TranscriptStore};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::PathBuf;

/// One pretty-printed JSON file per session, written atomically.
#[derive(Debug)]
pub struct FileBackend {
    base_dir: PathBuf,
}

impl FileBackend {
    /// Create a new file backend.
    ///
    /// Creates the sessions directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the sessions directory cannot be created.
    pub fn new(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(base_dir.join("sessions"))?;
        Ok(Self { base_dir })
    }

    fn sessions_dir(&self) -> PathBuf {
        self.base_dir.join("sessions")
    }

    /// Get the path to a session file.
    fn session_path(&self, session: &str) -> Result<PathBuf> {
        validate_name(session)?;
        Ok(self.sessions_dir().join(format!("{session}.json")))
    }
}

impl TranscriptStore for FileBackend {
    fn get_transcript(&self, session: &str) -> Result<Option<Vec<Message>>> {
        let path = self.session_path(session)?;
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        let transcript: Vec<Message> = serde_json::from_str(&contents)?;
        Ok(Some(transcript))
    }

    fn put_transcript(&self, session: &str, transcript: &[Message]) -> Result<()> {
        let path = self.session_path(session)?;
        let temp = path.with_extension("tmp");

        let contents = serde_json::to_string_pretty(transcript)?;
        fs::write(&temp, &contents)?;

        // Rename is atomic, so readers never see a half-written record
        fs::rename(&temp, &path)?;

        Ok(())
    }

    fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        let sessions_dir = self.sessions_dir();
        let mut sessions = Vec::new();

        if !sessions_dir.exists() {
            return Ok(sessions);
        }

        for entry in fs::read_dir(&sessions_dir)? {
            let path = entry?.path();

            // Only .json files count; .tmp files are interrupted writes
            if !path.extension().is_some_and(|e| e == "json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Ok(contents) = fs::read_to_string(&path) else {
                continue;
            };
            let Ok(transcript) = serde_json::from_str::<Vec<Message>>(&contents) else {
                tracing::debug!(path = %path.display(), "skipping unreadable session record");
                continue;
            };
            let updated_at = fs::metadata(&path)
                .and_then(|m| m.modified())
                .map_or_else(|_| Utc::now(), DateTime::<Utc>::from);

            sessions.push(SessionSummary {
                name: name.to_string(),
                message_count: transcript.len(),
                updated_at,
            });
        }

        sessions.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(sessions)
    }

    fn delete_session(&self, session: &str) -> Result<()> {
        let path = self.session_path(session)?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn rename_session(&self, from: &str, to: &str) -> Result<()> {
        let old_path = self.session_path(from)?;
        let new_path = self.session_path(to)?;
        if from == to {
            return Ok(());
        }
        if new_path.exists() {
            return Err(Error::SessionExists(to.to_string()));
        }
        if old_path.exists() {
            fs::rename(&old_path, &new_path)?;
        }
        Ok(())
    }
}

/// Get the default recall home directory.
///
/// Uses `RECALL_HOME` environment variable if set, otherwise `~/.recall`.
#[must_use]
pub fn get_recall_home() -> PathBuf {
    if let Ok(home) = std::env::var("RECALL_HOME") {
        PathBuf::from(home)
    } else if let Some(home) = dirs::home_dir() {
        home.join(".recall")
    } else {
        PathBuf::from(".recall")
    }
}
