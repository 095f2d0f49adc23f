//! Turn orchestration: memory, summarization, context, generation, save.

use crate::client::{ERROR_PREFIXES, GenerationError, TextGenerator};
use crate::core::message::Message;
use crate::core::{context, persistence, summarizer};
use crate::storage::TranscriptStore;
use std::fmt;

/// Per-call generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Model name passed to the generator.
    pub model: String,

    /// Number of most recent messages sent as context, and kept verbatim
    /// when summarizing. Must be at least 1.
    pub max_history: usize,

    /// Summarize once the transcript grows beyond this many messages.
    pub summary_threshold: usize,

    /// Agent directive prepended to the context; empty for none.
    pub agent_prompt: String,

    /// Whether the summarization step runs at all.
    pub enable_summarization: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "llama3".to_string(),
            max_history: 5,
            summary_threshold: 20,
            agent_prompt: String::new(),
            enable_summarization: true,
        }
    }
}

/// Result of one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The model replied; the turn was recorded.
    Replied(String),

    /// The model replied with nothing; nothing was recorded.
    Empty,

    /// Generation failed; nothing was recorded.
    Failed(GenerationError),

    /// The reply text is itself an error report; shown but not recorded.
    Rejected(String),
}

impl TurnOutcome {
    /// Whether the turn was appended to the session's memory.
    #[must_use]
    pub fn is_recorded(&self) -> bool {
        matches!(self, Self::Replied(_))
    }

    /// Text to show the user: the reply, an empty string, or the error text.
    #[must_use]
    pub fn into_reply(self) -> String {
        match self {
            Self::Replied(reply) | Self::Rejected(reply) => reply,
            Self::Empty => String::new(),
            Self::Failed(e) => e.to_string(),
        }
    }
}

impl fmt::Display for TurnOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replied(reply) | Self::Rejected(reply) => f.write_str(reply),
            Self::Empty => Ok(()),
            Self::Failed(e) => write!(f, "{e}"),
        }
    }
}

/// Runs turns for any session against a store and a generator.
///
/// No locking: two turns on the same session at once both load, mutate and
/// save independently, and the last save wins.
pub struct Conversation<'a> {
    store: &'a dyn TranscriptStore,
    generator: &'a dyn TextGenerator,
}

impl<'a> Conversation<'a> {
    /// Create an orchestrator over `store` and `generator`.
    #[must_use]
    pub fn new(store: &'a dyn TranscriptStore, generator: &'a dyn TextGenerator) -> Self {
        Self { store, generator }
    }

    /// Transcript of `session` for display; empty if there is none.
    #[must_use]
    pub fn history(&self, session: &str) -> Vec<Message> {
        persistence::load(self.store, session)
    }

    /// Run one turn: record `user_input`, generate a reply, save.
    ///
    /// On an empty reply, a reply carrying an error prefix, or a generation
    /// failure the turn returns early and nothing is written, including any
    /// summarization done this turn. A `max_history` of 0 is treated as 1.
    pub fn turn(&self, user_input: &str, session: &str, config: &GenerationConfig) -> TurnOutcome {
        let max_history = config.max_history.max(1);
        let mut transcript = persistence::load(self.store, session);
        transcript.push(Message::user(user_input));

        if config.enable_summarization && transcript.len() > config.summary_threshold {
            transcript = self.collapse(transcript, max_history, &config.model);
        }

        let context = context::assemble(&transcript, max_history, &config.agent_prompt);
        let prompt = context::render_prompt(&context);

        let reply = match self.generator.generate(&prompt, &config.model) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(session, error = %e, "generation failed, turn not recorded");
                return TurnOutcome::Failed(e);
            }
        };

        if reply.is_empty() {
            tracing::warn!(session, "empty reply, turn not recorded");
            return TurnOutcome::Empty;
        }

        if ERROR_PREFIXES.iter().any(|prefix| reply.starts_with(prefix)) {
            tracing::warn!(session, reply = %reply, "reply looks like an error report, turn not recorded");
            return TurnOutcome::Rejected(reply);
        }

        transcript.push(Message::assistant(reply.as_str()));
        persistence::save(self.store, session, &transcript);
        TurnOutcome::Replied(reply)
    }

    /// Replace everything but the last `max_history` messages with a summary.
    ///
    /// If summarizing fails the transcript is returned as it was.
    fn collapse(&self, transcript: Vec<Message>, max_history: usize, model: &str) -> Vec<Message> {
        let split = transcript.len().saturating_sub(max_history);
        let (old, recent) = transcript.split_at(split);

        match summarizer::summarize(self.generator, old, model) {
            Ok(summary) => {
                tracing::info!(
                    summarized = old.len(),
                    kept = recent.len(),
                    "summarized older messages"
                );
                let mut collapsed = Vec::with_capacity(recent.len() + 1);
                collapsed.push(summary);
                collapsed.extend_from_slice(recent);
                collapsed
            }
            Err(e) => {
                tracing::warn!(error = %e, "summarization failed, keeping full transcript");
                transcript
            }
        }
    }
}
