//! `recall chat` command implementation.

use crate::cli::{TurnOverrides, open_store};
use crate::client::OllamaClient;
use crate::core::session::sanitize_name;
use crate::core::{Conversation, GenerationConfig};
use crate::error::Result;
use std::io::{self, BufRead, Write};

/// Commands that end the chat.
const QUIT_COMMANDS: [&str; 2] = ["/quit", "/exit"];

/// Run the chat command.
///
/// Shows the session's transcript, then reads one message per line from
/// stdin until `/quit` or end of input.
///
/// # Errors
///
/// Returns an error if setup fails or the terminal cannot be read or
/// written.
pub fn run(session: &str, overrides: &TurnOverrides) -> Result<()> {
    let (config, store) = open_store()?;
    let session = sanitize_name(session)?;
    let client = OllamaClient::new(config.model.api_url.clone(), config.generation.options())?;
    let generation = overrides.generation_config(&config);
    let conversation = Conversation::new(&store, &client);

    chat_loop(
        &conversation,
        &session,
        &generation,
        io::stdin().lock(),
        io::stdout().lock(),
    )
}

/// Drive a chat over arbitrary input and output streams.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub fn chat_loop<R: BufRead, W: Write>(
    conversation: &Conversation<'_>,
    session: &str,
    generation: &GenerationConfig,
    input: R,
    mut out: W,
) -> Result<()> {
    writeln!(out, "Session: {session} (type /quit to leave)")?;
    for message in conversation.history(session) {
        writeln!(out, "{message}")?;
    }

    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        let text = line.trim();

        if QUIT_COMMANDS.contains(&text) {
            break;
        }
        if !text.is_empty() {
            let outcome = conversation.turn(text, session, generation);
            writeln!(out, "Assistant: {outcome}")?;
        }

        write!(out, "> ")?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(())
}
