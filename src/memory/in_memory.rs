//! In-memory implementation of MemoryStore for tests and local replay.

use super::models::{ContentMemoryRecord, NewContentMemory};
use super::traits::MemoryStore;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory MemoryStore.
///
/// Records live in a single `Vec` kept in `created_at` order behind an async
/// `RwLock`, which gives read-your-writes for every topic.
#[derive(Default)]
pub struct InMemoryMemoryStore {
    records: RwLock<Vec<ContentMemoryRecord>>,
}

impl InMemoryMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an already materialized record, e.g. a backdated one.
    pub async fn insert_record(&self, record: ContentMemoryRecord) {
        let mut records = self.records.write().await;
        let pos = records.partition_point(|r| r.created_at <= record.created_at);
        records.insert(pos, record);
    }

    /// Delete every record owned by a report (report deletion cascade).
    /// Returns the number of records removed.
    pub async fn delete_for_report(&self, report_id: &str) -> usize {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.report_id != report_id);
        before - records.len()
    }

    /// All records for a topic, oldest first.
    pub async fn records_for_topic(&self, topic: &str) -> Vec<ContentMemoryRecord> {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.topic == topic)
            .cloned()
            .collect()
    }

    /// Total number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl MemoryStore for InMemoryMemoryStore {
    async fn has_content_hash(&self, topic: &str, content_hash: &str) -> Result<bool> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .any(|r| r.topic == topic && r.content_hash == content_hash))
    }

    async fn get_recent_source_urls(&self, topic: &str, days_back: u32) -> Result<HashSet<String>> {
        // A window reaching past the earliest representable time has no cutoff
        let cutoff = Utc::now()
            .checked_sub_signed(Duration::days(i64::from(days_back)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.topic == topic && r.created_at >= cutoff)
            .flat_map(|r| r.source_urls.iter().cloned())
            .collect())
    }

    async fn get_content_memory(
        &self,
        topic: &str,
        limit: usize,
    ) -> Result<Vec<ContentMemoryRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .rev()
            .filter(|r| r.topic == topic)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn save_content_memory(&self, memory: NewContentMemory) -> Result<ContentMemoryRecord> {
        let record = memory.into_record(Uuid::new_v4(), Utc::now());
        self.insert_record(record.clone()).await;
        Ok(record)
    }
}
