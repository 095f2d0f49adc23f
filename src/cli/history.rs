//! `recall history` command implementation.

use crate::cli::open_store;
use crate::core::persistence;
use crate::core::session::sanitize_name;
use crate::error::Result;
use crate::storage::TranscriptStore;
use std::io::{self, Write};

/// Run the history command.
///
/// # Errors
///
/// Returns an error if setup fails or stdout cannot be written.
pub fn run(session: &str) -> Result<()> {
    let (_config, store) = open_store()?;
    let session = sanitize_name(session)?;
    print_history(&store, &session, &mut io::stdout().lock())
}

/// Write a session's transcript as `Role: content` lines.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn print_history(store: &dyn TranscriptStore, session: &str, out: &mut dyn Write) -> Result<()> {
    let transcript = persistence::load(store, session);

    if transcript.is_empty() {
        writeln!(out, "No messages in session '{session}'.")?;
        return Ok(());
    }

    for message in &transcript {
        writeln!(out, "{message}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Message;
    use crate::storage::MemoryBackend;

    fn render(store: &MemoryBackend, session: &str) -> String {
        let mut out = Vec::new();
        print_history(store, session, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn prints_each_message() {
        let store = MemoryBackend::new();
        store
            .put_transcript(
                "t1",
                &[
                    Message::system("Earlier they talked about Rust."),
                    Message::user("and now?"),
                    Message::assistant("Now we test."),
                ],
            )
            .unwrap();

        assert_eq!(
            render(&store, "t1"),
            "System: Earlier they talked about Rust.\nUser: and now?\nAssistant: Now we test.\n"
        );
    }

    #[test]
    fn empty_session_message() {
        let store = MemoryBackend::new();
        assert_eq!(render(&store, "fresh"), "No messages in session 'fresh'.\n");
    }
}
