//! `recall prompts` command implementation.

use crate::config::load_config;
use crate::error::Result;
use crate::prompts::list_presets;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Maximum length for directive preview.
const PREVIEW_LEN: usize = 60;

/// Run the prompts command.
///
/// Lists agent presets and marks the configured one.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or stdout cannot be
/// written.
pub fn run() -> Result<()> {
    let config = load_config()?;
    let dir = config.prompts_dir();
    let presets = list_presets(&dir);
    print_presets(&presets, &config.agent.preset, &mut io::stdout().lock())?;
    println!("\nPresets are read from: {}", dir.display());
    Ok(())
}

/// Write one line per preset, `*` marking the active one.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn print_presets(
    presets: &BTreeMap<String, String>,
    active: &str,
    out: &mut dyn Write,
) -> Result<()> {
    for (name, text) in presets {
        let marker = if name == active { '*' } else { ' ' };
        writeln!(out, "{marker} {name:<20} {}", format_preview(text))?;
    }
    Ok(())
}

/// First line of a directive, truncated on a character boundary.
fn format_preview(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or("");
    if first_line.chars().count() > PREVIEW_LEN {
        let cut: String = first_line.chars().take(PREVIEW_LEN).collect();
        format!("{cut}...")
    } else {
        first_line.to_string()
    }
}
