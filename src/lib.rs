//! recall - chat with a local model, with memory.
//!
//! Each named session keeps its transcript on disk. Older turns are
//! periodically condensed into a single summary message so the context sent
//! to the model stays bounded.

pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod error;
pub mod prompts;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
