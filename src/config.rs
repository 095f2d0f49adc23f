//! Configuration loading and management.
//!
//! Configuration is loaded with the following precedence:
//! 1. Environment variables (`RECALL_*`)
//! 2. Config file (`~/.recall/config.toml`)
//! 3. Defaults

use crate::client::SamplingOptions;
use crate::client::ollama::DEFAULT_API_URL;
use crate::core::GenerationConfig;
use crate::error::{Error, Result};
use crate::prompts::NO_PRESET;
use crate::storage::file::get_recall_home;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,

    /// Model endpoint configuration.
    pub model: ModelConfig,

    /// Memory configuration.
    pub memory: MemoryConfig,

    /// Sampling configuration.
    pub generation: SamplingConfig,

    /// Agent directive configuration.
    pub agent: AgentConfig,
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the recall home directory.
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: get_recall_home(),
        }
    }
}

/// Model endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model name, e.g. "llama3" or "mistral".
    pub name: String,

    /// Base URL of the generation server.
    pub api_url: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "llama3".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// Memory configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Recent messages sent as context.
    pub max_history: usize,

    /// Transcript length beyond which older messages are summarized.
    pub summary_threshold: usize,

    /// Turn automatic summarization on or off.
    pub enable_summarization: bool,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_history: 5,
            summary_threshold: 20,
            enable_summarization: true,
        }
    }
}

/// Sampling configuration. Unset values are left to the model.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SamplingConfig {
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    /// 0 means unlimited.
    pub max_tokens: Option<u32>,
}

impl SamplingConfig {
    /// Options for the generation client.
    #[must_use]
    pub fn options(&self) -> SamplingOptions {
        SamplingOptions {
            temperature: self.temperature,
            top_p: self.top_p,
            max_tokens: self.max_tokens,
        }
    }
}

/// Agent directive configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Preset name, or "none".
    pub preset: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            preset: NO_PRESET.to_string(),
        }
    }
}

impl Config {
    /// Check values that would break turn orchestration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `max_history` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.memory.max_history == 0 {
            return Err(Error::Config("memory.max_history must be at least 1".to_string()));
        }
        if self.memory.summary_threshold < self.memory.max_history {
            tracing::warn!(
                max_history = self.memory.max_history,
                summary_threshold = self.memory.summary_threshold,
                "summary_threshold below max_history, every turn will summarize"
            );
        }
        Ok(())
    }

    /// Per-call generation settings with the given agent directive.
    #[must_use]
    pub fn generation_config(&self, agent_prompt: impl Into<String>) -> GenerationConfig {
        GenerationConfig {
            model: self.model.name.clone(),
            max_history: self.memory.max_history,
            summary_threshold: self.memory.summary_threshold,
            agent_prompt: agent_prompt.into(),
            enable_summarization: self.memory.enable_summarization,
        }
    }

    /// Directory holding agent presets.
    #[must_use]
    pub fn prompts_dir(&self) -> PathBuf {
        self.storage.path.join("prompts")
    }
}

/// Load configuration with precedence: env vars → file → defaults.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if
/// the resulting configuration is invalid.
pub fn load_config() -> Result<Config> {
    let mut config = load_config_file(&get_config_path())?;
    apply_env_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

/// Load a config file, falling back to defaults if it does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(path).map_err(Error::Storage)?;
    toml::from_str(&contents).map_err(|e| Error::Config(e.to_string()))
}

/// Get the path to the config file.
fn get_config_path() -> PathBuf {
    if let Ok(path) = env::var("RECALL_CONFIG") {
        return PathBuf::from(path);
    }

    get_recall_home().join("config.toml")
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Apply environment variable overrides to config.
fn apply_env_overrides(config: &mut Config) {
    // Storage path
    if let Ok(path) = env::var("RECALL_STORAGE_PATH") {
        config.storage.path = PathBuf::from(path);
    } else if let Ok(home) = env::var("RECALL_HOME") {
        config.storage.path = PathBuf::from(home);
    }

    // Model
    if let Ok(name) = env::var("RECALL_MODEL") {
        config.model.name = name;
    }

    if let Ok(url) = env::var("RECALL_API_URL") {
        config.model.api_url = url;
    }

    // Memory
    if let Ok(val) = env::var("RECALL_MAX_HISTORY") {
        if let Ok(n) = val.parse() {
            config.memory.max_history = n;
        }
    }

    if let Ok(val) = env::var("RECALL_SUMMARY_THRESHOLD") {
        if let Ok(n) = val.parse() {
            config.memory.summary_threshold = n;
        }
    }

    if let Ok(val) = env::var("RECALL_ENABLE_SUMMARIZATION") {
        if let Some(enabled) = parse_bool(&val) {
            config.memory.enable_summarization = enabled;
        }
    }

    // Agent
    if let Ok(preset) = env::var("RECALL_AGENT") {
        config.agent.preset = preset;
    }
}
