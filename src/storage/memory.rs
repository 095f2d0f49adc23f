//! In-memory storage backend for testing.

use crate::core::Message;
use crate::error::{Error, Result};
use crate::storage::traits::{SessionSummary, TranscriptStore};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage backend for testing.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    sessions: RwLock<HashMap<String, (Vec<Message>, DateTime<Utc>)>>,
}

impl MemoryBackend {
    /// Create a new in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TranscriptStore for MemoryBackend {
    fn get_transcript(&self, session: &str) -> Result<Option<Vec<Message>>> {
        let sessions = self.sessions.read().unwrap();
        Ok(sessions.get(session).map(|(transcript, _)| transcript.clone()))
    }

    fn put_transcript(&self, session: &str, transcript: &[Message]) -> Result<()> {
        let mut sessions = self.sessions.write().unwrap();
        sessions.insert(session.to_string(), (transcript.to_vec(), Utc::now()));
        Ok(())
    }

    fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        let sessions = self.sessions.read().unwrap();
        let mut summaries: Vec<SessionSummary> = sessions
            .iter()
            .map(|(name, (transcript, updated_at))| SessionSummary {
                name: name.clone(),
                message_count: transcript.len(),
                updated_at: *updated_at,
            })
            .collect();

        summaries.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(summaries)
    }

    fn delete_session(&self, session: &str) -> Result<()> {
        let mut sessions = self.sessions.write().unwrap();
        sessions.remove(session);
        Ok(())
    }

    fn rename_session(&self, from: &str, to: &str) -> Result<()> {
        if from == to {
            return Ok(());
        }
        let mut sessions = self.sessions.write().unwrap();
        if sessions.contains_key(to) {
            return Err(Error::SessionExists(to.to_string()));
        }
        if let Some(record) = sessions.remove(from) {
            sessions.insert(to.to_string(), record);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_session() {
        let store = MemoryBackend::new();
        assert!(store.get_transcript("nonexistent").unwrap().is_none());
    }

    #[test]
    fn put_and_get_transcript() {
        let store = MemoryBackend::new();
        let transcript = vec![Message::user("hello"), Message::assistant("hi")];

        store.put_transcript("t1", &transcript).unwrap();

        assert_eq!(store.get_transcript("t1").unwrap().unwrap(), transcript);
    }

    #[test]
    fn list_sessions_counts_messages() {
        let store = MemoryBackend::new();
        store.put_transcript("a", &[Message::user("x")]).unwrap();
        store.put_transcript("b", &[]).unwrap();

        let mut sessions = store.list_sessions().unwrap();
        sessions.sort_by(|x, y| x.name.cmp(&y.name));
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].message_count, 1);
        assert_eq!(sessions[1].message_count, 0);
    }

    #[test]
    fn delete_session_removes_session() {
        let store = MemoryBackend::new();
        store.put_transcript("t1", &[]).unwrap();
        assert!(store.get_transcript("t1").unwrap().is_some());

        store.delete_session("t1").unwrap();
        assert!(store.get_transcript("t1").unwrap().is_none());
    }

    #[test]
    fn rename_rules() {
        let store = MemoryBackend::new();
        store.put_transcript("a", &[Message::user("x")]).unwrap();
        store.put_transcript("b", &[]).unwrap();

        assert!(matches!(
            store.rename_session("a", "b"),
            Err(Error::SessionExists(_))
        ));

        store.rename_session("a", "c").unwrap();
        assert!(store.get_transcript("a").unwrap().is_none());
        assert_eq!(store.get_transcript("c").unwrap().unwrap().len(), 1);

        store.rename_session("ghost", "d").unwrap();
        assert!(store.get_transcript("d").unwrap().is_none());
    }

    #[test]
    fn concurrent_writes_last_writer_wins() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(MemoryBackend::new());
        let mut handles = vec![];

        for i in 0..10 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                store
                    .put_transcript("shared", &[Message::user(format!("writer-{i}"))])
                    .unwrap();
            }));
        }

        for handle in handles {
            handle.join().expect("Thread panicked");
        }

        let transcript = store.get_transcript("shared").unwrap().unwrap();
        assert_eq!(transcript.len(), 1);
        assert!(transcript[0].content.starts_with("writer-"));
    }
}
