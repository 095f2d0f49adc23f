//! Agent directive presets.
//!
//! A preset is a text file `{name}.txt` in the prompts directory. Its trimmed
//! contents are injected as the leading system message of every context.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Preset name meaning "no directive".
pub const NO_PRESET: &str = "none";

/// Load a preset by name from `dir`.
///
/// Returns an empty directive for [`NO_PRESET`], an empty name, or a preset
/// that cannot be read.
#[must_use]
pub fn load_preset(dir: &Path, name: &str) -> String {
    if name.is_empty() || name == NO_PRESET {
        return String::new();
    }

    let path = dir.join(format!("{name}.txt"));
    match fs::read_to_string(&path) {
        Ok(content) => content.trim().to_string(),
        Err(e) => {
            tracing::warn!(preset = name, path = %path.display(), error = %e, "agent preset not loaded");
            String::new()
        }
    }
}

/// All presets in `dir`, plus [`NO_PRESET`], sorted by name.
///
/// Creates `dir` if it does not exist. Files that cannot be read are
/// skipped.
#[must_use]
pub fn list_presets(dir: &Path) -> BTreeMap<String, String> {
    let mut presets = BTreeMap::new();

    if let Err(e) = fs::create_dir_all(dir) {
        tracing::warn!(path = %dir.display(), error = %e, "cannot create prompts directory");
    }

    match fs::read_dir(dir) {
        Ok(entries) => {
            for path in entries.filter_map(|e| e.ok().map(|e| e.path())) {
                if !path.extension().is_some_and(|e| e == "txt") {
                    continue;
                }
                let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                match fs::read_to_string(&path) {
                    Ok(content) => {
                        presets.insert(name.to_string(), content.trim().to_string());
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "error loading prompt");
                    }
                }
            }
        }
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "error reading prompts directory");
        }
    }

    presets.insert(NO_PRESET.to_string(), String::new());
    presets
}
