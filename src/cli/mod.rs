//! CLI command implementations.

pub mod chat;
pub mod delete;
pub mod history;
pub mod list;
pub mod prompts;
pub mod rename;
pub mod send;

use crate::config::{Config, load_config};
use crate::core::GenerationConfig;
use crate::error::Result;
use crate::prompts::load_preset;
use crate::storage::FileBackend;

/// Per-invocation overrides for a turn.
#[derive(Debug, Clone, Default)]
pub struct TurnOverrides {
    /// Model to use instead of the configured one.
    pub model: Option<String>,

    /// Agent preset to use instead of the configured one.
    pub agent: Option<String>,
}

impl TurnOverrides {
    /// Resolve the generation settings for this invocation.
    #[must_use]
    pub fn generation_config(&self, config: &Config) -> GenerationConfig {
        let preset = self.agent.as_deref().unwrap_or(&config.agent.preset);
        let mut generation = config.generation_config(load_preset(&config.prompts_dir(), preset));
        if let Some(model) = &self.model {
            generation.model.clone_from(model);
        }
        generation
    }
}

/// Load configuration and open the session store.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the store cannot be
/// created.
pub fn open_store() -> Result<(Config, FileBackend)> {
    let config = load_config()?;
    let store = FileBackend::new(config.storage.path.clone())?;
    Ok((config, store))
}
