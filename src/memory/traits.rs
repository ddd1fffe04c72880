//! Trait abstraction for content memory persistence

use super::models::{ContentMemoryRecord, NewContentMemory};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;

/// Read/write contract for a topic's content history.
///
/// Implementations are shared across tasks via `Arc<dyn MemoryStore>`.
/// A record returned by `save_content_memory` must be visible to subsequent
/// reads for the same topic. No cross-topic isolation is required.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Whether a record with this exact content hash exists for the topic
    async fn has_content_hash(&self, topic: &str, content_hash: &str) -> Result<bool>;

    /// Union of source URLs recorded for the topic within the last `days_back` days
    async fn get_recent_source_urls(&self, topic: &str, days_back: u32) -> Result<HashSet<String>>;

    /// Most recent records for the topic, newest first, at most `limit`
    async fn get_content_memory(&self, topic: &str, limit: usize)
        -> Result<Vec<ContentMemoryRecord>>;

    /// Persist a new record, assigning its id and creation time
    async fn save_content_memory(&self, memory: NewContentMemory) -> Result<ContentMemoryRecord>;
}
