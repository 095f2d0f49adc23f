//! Scripted generator for testing.

use crate::client::{GenerationError, TextGenerator};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A [`TextGenerator`] that replays canned replies and records every prompt.
///
/// Once the queue is empty it keeps answering with the fallback reply, or
/// with an `Unexpected` error if there is none.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, GenerationError>>>,
    fallback: Option<Result<String, GenerationError>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedGenerator {
    /// Replay `replies` in order.
    #[must_use]
    pub fn new(replies: impl IntoIterator<Item = Result<String, GenerationError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Answer every call with the same successful reply.
    #[must_use]
    pub fn always(reply: impl Into<String>) -> Self {
        Self {
            fallback: Some(Ok(reply.into())),
            ..Self::default()
        }
    }

    /// Answer every call with the same failure.
    #[must_use]
    pub fn failing(error: GenerationError) -> Self {
        Self {
            fallback: Some(Err(error)),
            ..Self::default()
        }
    }

    /// Prompts received so far, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the call log lock is poisoned.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(prompt, _)| prompt.clone())
            .collect()
    }

    /// Models requested so far, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the call log lock is poisoned.
    #[must_use]
    pub fn models(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, model)| model.clone())
            .collect()
    }
}

impl TextGenerator for ScriptedGenerator {
    fn generate(&self, prompt: &str, model: &str) -> Result<String, GenerationError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), model.to_string()));

        let next = self.replies.lock().unwrap().pop_front();
        next.or_else(|| self.fallback.clone()).unwrap_or_else(|| {
            Err(GenerationError::Unexpected(
                "no scripted reply left".to_string(),
            ))
        })
    }
}
