//! Condensing an old transcript prefix into one system message.

use crate::client::{GenerationError, TextGenerator};
use crate::core::context::render;
use crate::core::message::Message;

/// Build the summarization prompt for `old_messages`.
#[must_use]
pub fn summary_prompt(old_messages: &[Message]) -> String {
    format!(
        "Summarize the following conversation in a few sentences to preserve context:\n{}\nSummary:",
        render(old_messages)
    )
}

/// Summarize `old_messages` into a single system message.
///
/// One call, one prefix: an existing summary inside `old_messages` is simply
/// summarized again along with everything else.
///
/// # Errors
///
/// Returns the generation failure unchanged.
pub fn summarize(
    generator: &dyn TextGenerator,
    old_messages: &[Message],
    model: &str,
) -> Result<Message, GenerationError> {
    let summary = generator.generate(&summary_prompt(old_messages), model)?;
    Ok(Message::system(summary))
}
