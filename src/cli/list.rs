//! `recall list` command implementation.

use crate::cli::open_store;
use crate::core::session::DEFAULT_SESSION;
use crate::error::Result;
use crate::storage::TranscriptStore;
use chrono::{DateTime, Local, Utc};
use std::io::{self, Write};

/// Run the list command.
///
/// Shows stored sessions, most recently updated first.
///
/// # Errors
///
/// Returns an error if the storage backend fails.
pub fn run() -> Result<()> {
    let (config, store) = open_store()?;
    print_sessions(&store, &mut io::stdout().lock())?;
    println!("\nSessions are stored in: {}", config.storage.path.display());
    Ok(())
}

/// Write the session table.
///
/// With no stored sessions the default session is listed, since it is the
/// one a new chat starts in.
///
/// # Errors
///
/// Returns an error if the storage backend fails or writing fails.
pub fn print_sessions(store: &dyn TranscriptStore, out: &mut dyn Write) -> Result<()> {
    let sessions = store.list_sessions()?;

    writeln!(out, "{:<30} {:>8}  Updated", "Session", "Messages")?;
    writeln!(out, "{}", "─".repeat(60))?;

    if sessions.is_empty() {
        writeln!(out, "{DEFAULT_SESSION:<30} {:>8}  -", 0)?;
        return Ok(());
    }

    for summary in &sessions {
        writeln!(
            out,
            "{:<30} {:>8}  {}",
            summary.name,
            summary.message_count,
            format_local_time(summary.updated_at)
        )?;
    }

    writeln!(out, "{}", "─".repeat(60))?;
    writeln!(out, "Showing {} session(s)", sessions.len())?;
    Ok(())
}

/// Format UTC time as local time for display.
fn format_local_time(utc: DateTime<Utc>) -> String {
    let local: DateTime<Local> = utc.into();
    local.format("%Y-%m-%d %H:%M").to_string()
}
