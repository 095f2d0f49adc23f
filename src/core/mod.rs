//! Conversation memory: messages, context assembly, summarization, turns.

pub mod attachments;
pub mod context;
pub mod conversation;
pub mod message;
pub mod persistence;
pub mod session;
pub mod summarizer;

pub use conversation::{Conversation, GenerationConfig, TurnOutcome};
pub use message::{Message, Role};
