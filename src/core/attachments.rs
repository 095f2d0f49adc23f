//! Folding attached text files into a user message.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// An attachment that could not be included.
#[derive(Debug, Error)]
pub enum AttachmentError {
    /// The file is not valid UTF-8 text.
    #[error("Cannot read binary file {0}")]
    Binary(String),

    /// The file could not be read.
    #[error("Error reading file {name}: {source}")]
    Unreadable {
        name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}

/// Append the contents of each readable text file to `text`.
///
/// Each file becomes a `--- File: name ---` section. Files that cannot be
/// read as UTF-8 are left out and returned alongside the composed input.
#[must_use]
pub fn compose_input(text: &str, paths: &[PathBuf]) -> (String, Vec<AttachmentError>) {
    let mut input = text.to_string();
    let mut skipped = Vec::new();

    for path in paths {
        let name = display_name(path);
        match fs::read_to_string(path) {
            Ok(contents) => {
                input.push_str(&format!("\n\n--- File: {name} ---\n{contents}"));
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                tracing::warn!(file = %path.display(), "skipping binary attachment");
                skipped.push(AttachmentError::Binary(name));
            }
            Err(source) => {
                tracing::warn!(file = %path.display(), error = %source, "skipping unreadable attachment");
                skipped.push(AttachmentError::Unreadable {
                    name,
                    path: path.clone(),
                    source,
                });
            }
        }
    }

    (input, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn no_attachments_is_identity() {
        let (input, skipped) = compose_input("hello", &[]);
        assert_eq!(input, "hello");
        assert!(skipped.is_empty());
    }

    #[test]
    fn appends_file_sections() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("notes.txt");
        let b = temp.path().join("main.rs");
        fs::write(&a, "remember the milk").unwrap();
        fs::write(&b, "fn main() {}").unwrap();

        let (input, skipped) = compose_input("look at these", &[a, b]);

        assert!(skipped.is_empty());
        assert_eq!(
            input,
            "look at these\n\n--- File: notes.txt ---\nremember the milk\n\n--- File: main.rs ---\nfn main() {}"
        );
    }

    #[test]
    fn binary_file_is_skipped() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("image.png");
        fs::write(&bin, [0x89, 0x50, 0xff, 0xfe, 0x00]).unwrap();

        let (input, skipped) = compose_input("see", &[bin]);

        assert_eq!(input, "see");
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].to_string(), "Cannot read binary file image.png");
    }

    #[test]
    fn missing_file_is_skipped() {
        let temp = TempDir::new().unwrap();
        let (input, skipped) = compose_input("see", &[temp.path().join("gone.txt")]);

        assert_eq!(input, "see");
        assert!(matches!(skipped[0], AttachmentError::Unreadable { .. }));
    }
}
