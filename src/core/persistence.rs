//! Transcript load/save with the non-fatal failure policy.
//!
//! Reads degrade to an empty transcript and writes are logged and
//! swallowed, so no storage problem ever aborts a turn.

use crate::core::Message;
use crate::storage::TranscriptStore;

/// Load a session's transcript, or an empty one if it has no usable record.
#[must_use]
pub fn load(store: &dyn TranscriptStore, session: &str) -> Vec<Message> {
    match store.get_transcript(session) {
        Ok(Some(transcript)) => transcript,
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::warn!(session, error = %e, "could not load memory, starting empty");
            Vec::new()
        }
    }
}

/// Save a session's transcript. Returns whether the write succeeded.
pub fn save(store: &dyn TranscriptStore, session: &str, transcript: &[Message]) -> bool {
    match store.put_transcript(session, transcript) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(session, error = %e, "error saving memory");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileBackend, MemoryBackend};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_missing_is_empty() {
        let store = MemoryBackend::new();
        assert!(load(&store, "new-session").is_empty());
    }

    #[test]
    fn load_after_save() {
        let store = MemoryBackend::new();
        let transcript = vec![Message::user("hello"), Message::assistant("hi there")];
        assert!(save(&store, "t1", &transcript));
        assert_eq!(load(&store, "t1"), transcript);
    }

    #[test]
    fn load_malformed_degrades_to_empty() {
        let temp = TempDir::new().unwrap();
        let store = FileBackend::new(temp.path().to_path_buf()).unwrap();
        let dir = temp.path().join("sessions");

        fs::write(dir.join("garbage.json"), "{{{").unwrap();
        fs::write(dir.join("object.json"), r#"{"messages": []}"#).unwrap();

        assert!(load(&store, "garbage").is_empty());
        assert!(load(&store, "object").is_empty());
    }

    #[test]
    fn save_failure_is_swallowed() {
        let temp = TempDir::new().unwrap();
        let store = FileBackend::new(temp.path().to_path_buf()).unwrap();
        assert!(!save(&store, "bad/name", &[Message::user("x")]));
    }

    #[test]
    fn failed_save_keeps_previous_record() {
        let temp = TempDir::new().unwrap();
        let store = FileBackend::new(temp.path().to_path_buf()).unwrap();
        let original = vec![Message::user("keep me")];
        assert!(save(&store, "t1", &original));

        // A directory squatting on the temp path makes the next write fail
        fs::create_dir(temp.path().join("sessions").join("t1.tmp")).unwrap();
        assert!(!save(&store, "t1", &[Message::user("lost")]));

        assert_eq!(load(&store, "t1"), original);
    }
}
