//! Content memory data models

use crate::content::generate_content_hash;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One report's contribution to a topic's history.
///
/// Records are created once by the memory processor and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMemoryRecord {
    pub id: Uuid,
    /// Case-sensitive topic key
    pub topic: String,
    /// Hex SHA-256 over the normalized `key_findings`
    pub content_hash: String,
    pub key_findings: Vec<String>,
    pub source_urls: Vec<String>,
    /// Report that produced this record; deleting the report deletes the record
    pub report_id: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for saving a new content memory record.
///
/// The hash is always derived from the findings, so a record can never carry
/// a hash that disagrees with its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewContentMemory {
    topic: String,
    content_hash: String,
    key_findings: Vec<String>,
    source_urls: Vec<String>,
    report_id: String,
}

impl NewContentMemory {
    pub fn from_findings(
        topic: impl Into<String>,
        report_id: impl Into<String>,
        key_findings: Vec<String>,
        source_urls: Vec<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            content_hash: generate_content_hash(&key_findings),
            key_findings,
            source_urls,
            report_id: report_id.into(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    pub fn key_findings(&self) -> &[String] {
        &self.key_findings
    }

    pub fn source_urls(&self) -> &[String] {
        &self.source_urls
    }

    pub fn report_id(&self) -> &str {
        &self.report_id
    }

    /// Materialize the record with a store-assigned id and timestamp.
    pub fn into_record(self, id: Uuid, created_at: DateTime<Utc>) -> ContentMemoryRecord {
        ContentMemoryRecord {
            id,
            topic: self.topic,
            content_hash: self.content_hash,
            key_findings: self.key_findings,
            source_urls: self.source_urls,
            report_id: self.report_id,
            created_at,
        }
    }
}

/// Result of comparing one report against its topic's recent history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoveltyVerdict {
    /// True iff at least one finding or source URL is new
    pub is_novel: bool,
    pub novel_findings: Vec<String>,
    pub known_findings: Vec<String>,
    pub novel_urls: Vec<String>,
    pub content_hash: String,
    /// Every finding extracted from the report, in report order
    pub key_findings: Vec<String>,
    /// Every source URL extracted from the report, in first-seen order
    pub source_urls: Vec<String>,
    /// Set when the report matched a previously stored content hash exactly
    pub exact_duplicate: bool,
}

impl NoveltyVerdict {
    /// Verdict for a report whose content hash is already in history.
    pub(crate) fn duplicate(
        content_hash: String,
        key_findings: Vec<String>,
        source_urls: Vec<String>,
    ) -> Self {
        Self {
            is_novel: false,
            novel_findings: Vec::new(),
            known_findings: key_findings.clone(),
            novel_urls: Vec::new(),
            content_hash,
            key_findings,
            source_urls,
            exact_duplicate: true,
        }
    }
}

/// Outcome of processing one report's memory.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutcome {
    pub is_novel: bool,
    pub novel_findings: Vec<String>,
    pub notification_created: bool,
    /// The record persisted for this report
    pub record: ContentMemoryRecord,
    /// Set when the report was novel but the notification could not be created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_error: Option<String>,
}
