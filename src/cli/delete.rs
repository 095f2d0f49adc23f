//! `recall delete` command implementation.

use crate::cli::open_store;
use crate::core::session::sanitize_name;
use crate::error::Result;
use crate::storage::TranscriptStore;
use std::io::{self, Write};

/// Run the delete command.
///
/// # Errors
///
/// Returns an error if the session name is invalid or the storage backend
/// fails.
pub fn run(session: &str) -> Result<()> {
    let (_config, store) = open_store()?;
    delete_session(&store, session, &mut io::stdout().lock())
}

/// Sanitize `session`, delete it from `store`, and report the deleted name.
///
/// # Errors
///
/// Returns an error if the name sanitizes to nothing, the store fails, or
/// writing fails.
pub fn delete_session(store: &dyn TranscriptStore, session: &str, out: &mut dyn Write) -> Result<()> {
    let session = sanitize_name(session)?;
    store.delete_session(&session)?;
    writeln!(out, "Deleted session '{session}'.")?;
    Ok(())
}
