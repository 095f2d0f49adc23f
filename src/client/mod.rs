//! Text generation clients.

pub mod ollama;
pub mod scripted;

pub use ollama::{OllamaClient, SamplingOptions};
pub use scripted::ScriptedGenerator;

use thiserror::Error;

/// Prefixes of the display text of every [`GenerationError`].
pub const ERROR_PREFIXES: [&str; 3] = ["HTTP Error:", "Request Error:", "Unexpected Error:"];

/// A failed generation call.
///
/// The `Display` form is what the user sees in place of a reply.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// The endpoint answered with a non-2xx status.
    #[error("HTTP Error: {status}, {body}")]
    Http {
        /// Status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The request never got a response (connection refused, DNS, I/O).
    #[error("Request Error: {0}")]
    Request(String),

    /// Anything else, e.g. a reply body that is not the expected JSON.
    #[error("Unexpected Error: {0}")]
    Unexpected(String),
}

/// Something that turns a prompt into generated text.
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt` with `model`.
    ///
    /// # Errors
    ///
    /// Returns a classified [`GenerationError`] if the call fails.
    fn generate(&self, prompt: &str, model: &str) -> Result<String, GenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_strings_carry_prefixes() {
        let errors = [
            GenerationError::Http {
                status: 500,
                body: "oops".to_string(),
            },
            GenerationError::Request("connection refused".to_string()),
            GenerationError::Unexpected("bad json".to_string()),
        ];
        for (error, prefix) in errors.iter().zip(ERROR_PREFIXES) {
            assert!(error.to_string().starts_with(prefix), "{error}");
        }
    }

    #[test]
    fn http_error_display() {
        let error = GenerationError::Http {
            status: 500,
            body: "oops".to_string(),
        };
        assert_eq!(error.to_string(), "HTTP Error: 500, oops");
    }
}
