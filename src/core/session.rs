//! Session naming rules.

use crate::error::{Error, Result};
use regex::Regex;

/// Session used when none is given.
pub const DEFAULT_SESSION: &str = "default";

/// Characters that cannot appear in a session record name.
const FORBIDDEN: &str = r#"[<>:"/\\|?*]"#;

fn forbidden() -> Result<Regex> {
    Regex::new(FORBIDDEN).map_err(|e| Error::Config(format!("session name pattern: {e}")))
}

/// Replace forbidden characters with `_` and trim surrounding whitespace.
///
/// # Errors
///
/// Returns `InvalidSessionName` if nothing is left.
pub fn sanitize_name(name: &str) -> Result<String> {
    let cleaned = forbidden()?.replace_all(name, "_").into_owned();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(Error::InvalidSessionName(name.to_string()));
    }
    Ok(cleaned.to_string())
}

/// Check that `name` is already in sanitized form.
///
/// # Errors
///
/// Returns `InvalidSessionName` if the name is empty, padded with
/// whitespace, contains a forbidden character, or is a relative path
/// component.
pub fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.trim() == name
        && name != "."
        && name != ".."
        && !forbidden()?.is_match(name);
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidSessionName(name.to_string()))
    }
}
