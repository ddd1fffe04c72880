//! Novelty detection against a topic's recent history
//!
//! Two tiers: an exact content-hash match short-circuits to "already seen";
//! otherwise findings and source URLs are diffed against a bounded window of
//! history so that a rephrased report with one new fact is still caught.

use super::config::NoveltyConfig;
use crate::content::{
    extract_key_findings_with, extract_source_urls, generate_content_hash, normalize_finding,
};
use crate::error::{NoveltyError, Result};
use crate::memory::{MemoryStore, NoveltyVerdict};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Classifies reports as novel or already seen for their topic.
#[derive(Clone)]
pub struct NoveltyDetector {
    store: Arc<dyn MemoryStore>,
    config: NoveltyConfig,
}

impl NoveltyDetector {
    /// Create a detector with default configuration
    pub fn new(store: Arc<dyn MemoryStore>) -> Self {
        Self::with_config(store, NoveltyConfig::default())
    }

    pub fn with_config(store: Arc<dyn MemoryStore>, config: NoveltyConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &NoveltyConfig {
        &self.config
    }

    /// Compare a raw report against the topic's history.
    ///
    /// # Errors
    ///
    /// Returns [`NoveltyError::StoreRead`] if any history lookup fails.
    pub async fn detect(&self, topic: &str, raw_content: &str) -> Result<NoveltyVerdict> {
        let key_findings = extract_key_findings_with(raw_content, &self.config.finding_bounds());
        let source_urls = extract_source_urls(raw_content);
        let content_hash = generate_content_hash(&key_findings);

        let seen = self
            .store
            .has_content_hash(topic, &content_hash)
            .await
            .map_err(|e| NoveltyError::read("has_content_hash", topic, e))?;
        if seen {
            debug!(topic, content_hash = %content_hash, "Exact duplicate content");
            return Ok(NoveltyVerdict::duplicate(content_hash, key_findings, source_urls));
        }

        let recent_urls = self
            .store
            .get_recent_source_urls(topic, self.config.recent_url_days)
            .await
            .map_err(|e| NoveltyError::read("get_recent_source_urls", topic, e))?;
        let novel_urls: Vec<String> = source_urls
            .iter()
            .filter(|url| !recent_urls.contains(url.as_str()))
            .cloned()
            .collect();

        let recent_records = self
            .store
            .get_content_memory(topic, self.config.recent_records_limit)
            .await
            .map_err(|e| NoveltyError::read("get_content_memory", topic, e))?;
        let known: HashSet<String> = recent_records
            .iter()
            .flat_map(|r| r.key_findings.iter())
            .map(|f| normalize_finding(f))
            .collect();

        let (known_findings, novel_findings): (Vec<String>, Vec<String>) = key_findings
            .iter()
            .cloned()
            .partition(|f| known.contains(&normalize_finding(f)));

        let is_novel = !novel_findings.is_empty() || !novel_urls.is_empty();
        info!(
            topic,
            content_hash = %content_hash,
            is_novel,
            novel_findings = novel_findings.len(),
            known_findings = known_findings.len(),
            novel_urls = novel_urls.len(),
            "Novelty detection complete"
        );

        Ok(NoveltyVerdict {
            is_novel,
            novel_findings,
            known_findings,
            novel_urls,
            content_hash,
            key_findings,
            source_urls,
            exact_duplicate: false,
        })
    }
}

/// Detect novel content with the default configuration.
pub async fn detect_novel_content(
    store: Arc<dyn MemoryStore>,
    topic: &str,
    raw_content: &str,
) -> Result<NoveltyVerdict> {
    NoveltyDetector::new(store).detect(topic, raw_content).await
}
