//! Content memory: the per-topic history novelty detection runs against
//!
//! Architecture follows the project pattern (trait + impl):
//! - `MemoryStore` trait: async interface to the persistence collaborator
//! - `InMemoryMemoryStore`: in-process implementation for tests and replay

pub mod in_memory;
pub mod models;
pub mod traits;

pub use in_memory::InMemoryMemoryStore;
pub use models::{ContentMemoryRecord, NewContentMemory, NoveltyVerdict, ProcessOutcome};
pub use traits::MemoryStore;
