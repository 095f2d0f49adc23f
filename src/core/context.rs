//! Prompt rendering and context window assembly.

use crate::core::message::Message;

/// Marker appended to every generation prompt to cue the model's turn.
pub const ASSISTANT_CUE: &str = "\nAssistant:";

/// Render messages as `Role: content` lines joined by newlines.
#[must_use]
pub fn render(messages: &[Message]) -> String {
    messages
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// The last `max_history` messages of `transcript` (all of them if shorter).
#[must_use]
pub fn recent(transcript: &[Message], max_history: usize) -> &[Message] {
    &transcript[transcript.len().saturating_sub(max_history)..]
}

/// Build the bounded context window for a generation call.
///
/// The agent directive, if non-empty, leads as a system message. It is only
/// part of the context and never enters the transcript.
#[must_use]
pub fn assemble(transcript: &[Message], max_history: usize, agent_prompt: &str) -> Vec<Message> {
    let window = recent(transcript, max_history);
    let mut context = Vec::with_capacity(window.len() + 1);
    if !agent_prompt.is_empty() {
        context.push(Message::system(agent_prompt));
    }
    context.extend_from_slice(window);
    context
}

/// Render an assembled context as the final prompt string.
#[must_use]
pub fn render_prompt(context: &[Message]) -> String {
    let mut prompt = render(context);
    prompt.push_str(ASSISTANT_CUE);
    prompt
}
