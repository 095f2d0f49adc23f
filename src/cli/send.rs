//! `recall send` command implementation.

use crate::cli::{TurnOverrides, open_store};
use crate::client::OllamaClient;
use crate::core::Conversation;
use crate::core::attachments::compose_input;
use crate::core::session::sanitize_name;
use crate::error::Result;
use std::path::PathBuf;

/// Run the send command.
///
/// Runs one turn against `session` and prints the reply. Generation
/// failures are printed in place of the reply.
///
/// # Errors
///
/// Returns an error if configuration, the session name, or the store is
/// invalid.
pub fn run(
    message: &str,
    session: &str,
    attachments: &[PathBuf],
    overrides: &TurnOverrides,
) -> Result<()> {
    let (config, store) = open_store()?;
    let session = sanitize_name(session)?;
    let client = OllamaClient::new(config.model.api_url.clone(), config.generation.options())?;
    let generation = overrides.generation_config(&config);

    let (input, skipped) = compose_input(message, attachments);
    for error in &skipped {
        eprintln!("recall: warning: {error}");
    }

    let outcome = Conversation::new(&store, &client).turn(&input, &session, &generation);
    println!("{outcome}");

    Ok(())
}
