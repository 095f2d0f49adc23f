//! Storage backends for session transcripts.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use traits::{SessionSummary, TranscriptStore};
