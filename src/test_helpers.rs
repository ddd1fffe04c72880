//! Test helper factories and failing collaborator doubles
//!
//! Provides report builders and store/sink implementations that fail on
//! demand, for exercising error paths of the detector and processor.
#![allow(dead_code)]

use crate::memory::{ContentMemoryRecord, InMemoryMemoryStore, MemoryStore, NewContentMemory};
use crate::notifications::{NewNotification, NotificationRecord, NotificationSink};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashSet;

// ============================================================================
// Report builders
// ============================================================================

/// Render findings as paragraphs and URLs as a link list, the way the report
/// generator does.
pub fn report(findings: &[&str], urls: &[&str]) -> String {
    let mut html = String::new();
    for finding in findings {
        html.push_str(&format!("<p>{finding}.</p>\n"));
    }
    if !urls.is_empty() {
        html.push_str("<ul>\n");
        for (i, url) in urls.iter().enumerate() {
            html.push_str(&format!("<li><a href=\"{url}\">[{}]</a></li>\n", i + 1));
        }
        html.push_str("</ul>\n");
    }
    html
}

// ============================================================================
// Failing doubles
// ============================================================================

/// Store operation that a [`FailingMemoryStore`] should fail on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    HasContentHash,
    RecentUrls,
    ContentMemory,
    Save,
}

impl StoreOp {
    pub fn name(self) -> &'static str {
        match self {
            StoreOp::HasContentHash => "has_content_hash",
            StoreOp::RecentUrls => "get_recent_source_urls",
            StoreOp::ContentMemory => "get_content_memory",
            StoreOp::Save => "save_content_memory",
        }
    }
}

/// In-memory store that fails one chosen operation.
pub struct FailingMemoryStore {
    inner: InMemoryMemoryStore,
    fail_on: StoreOp,
}

impl FailingMemoryStore {
    pub fn failing(fail_on: StoreOp) -> Self {
        Self {
            inner: InMemoryMemoryStore::new(),
            fail_on,
        }
    }

    pub fn inner(&self) -> &InMemoryMemoryStore {
        &self.inner
    }

    fn check(&self, op: StoreOp) -> Result<()> {
        if self.fail_on == op {
            Err(anyhow!("store unavailable during {}", op.name()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MemoryStore for FailingMemoryStore {
    async fn has_content_hash(&self, topic: &str, content_hash: &str) -> Result<bool> {
        self.check(StoreOp::HasContentHash)?;
        self.inner.has_content_hash(topic, content_hash).await
    }

    async fn get_recent_source_urls(&self, topic: &str, days_back: u32) -> Result<HashSet<String>> {
        self.check(StoreOp::RecentUrls)?;
        self.inner.get_recent_source_urls(topic, days_back).await
    }

    async fn get_content_memory(
        &self,
        topic: &str,
        limit: usize,
    ) -> Result<Vec<ContentMemoryRecord>> {
        self.check(StoreOp::ContentMemory)?;
        self.inner.get_content_memory(topic, limit).await
    }

    async fn save_content_memory(&self, memory: NewContentMemory) -> Result<ContentMemoryRecord> {
        self.check(StoreOp::Save)?;
        self.inner.save_content_memory(memory).await
    }
}

/// Notification sink that always fails.
pub struct FailingNotificationSink;

#[async_trait]
impl NotificationSink for FailingNotificationSink {
    async fn create_notification(
        &self,
        _notification: NewNotification,
    ) -> Result<NotificationRecord> {
        Err(anyhow!("notification service unavailable"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{extract_key_findings, extract_source_urls};

    #[test]
    fn test_report_round_trips_through_extraction() {
        let findings = [
            "The first generated finding is long enough to keep",
            "The second generated finding is also long enough",
        ];
        let raw = report(&findings, &["https://a.example", "https://b.example"]);
        assert_eq!(extract_key_findings(&raw), findings);
        assert_eq!(
            extract_source_urls(&raw),
            vec!["https://a.example", "https://b.example"]
        );
    }
}
