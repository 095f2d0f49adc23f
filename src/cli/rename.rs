//! `recall rename` command implementation.

use crate::cli::open_store;
use crate::core::session::sanitize_name;
use crate::error::Result;
use crate::storage::TranscriptStore;
use std::io::{self, Write};

/// Run the rename command.
///
/// # Errors
///
/// Returns an error if either name is invalid, the new name is taken, or
/// the storage backend fails.
pub fn run(from: &str, to: &str) -> Result<()> {
    let (_config, store) = open_store()?;
    rename_session(&store, from, to, &mut io::stdout().lock())
}

/// Sanitize both names, rename `from` to `to` in `store`, and report it.
///
/// # Errors
///
/// Returns an error if either name sanitizes to nothing, `to` already
/// exists, the store fails, or writing fails.
pub fn rename_session(
    store: &dyn TranscriptStore,
    from: &str,
    to: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let from = sanitize_name(from)?;
    let to = sanitize_name(to)?;
    store.rename_session(&from, &to)?;
    writeln!(out, "Renamed session '{from}' to '{to}'.")?;
    Ok(())
}
