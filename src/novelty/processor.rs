//! Memory Processor - per-report unit of work
//!
//! Runs novelty detection, records the report in topic history, and raises a
//! notification when the report is novel. The memory record is always written
//! before any notification is attempted, so a delivery failure never loses
//! history.

use super::config::NoveltyConfig;
use super::detector::NoveltyDetector;
use crate::error::{NoveltyError, Result};
use crate::memory::{MemoryStore, NewContentMemory, NoveltyVerdict, ProcessOutcome};
use crate::notifications::{NewNotification, NotificationSink};
use std::sync::Arc;
use tracing::{info, warn};

/// Processes generated reports into topic memory.
pub struct MemoryProcessor {
    detector: NoveltyDetector,
    store: Arc<dyn MemoryStore>,
    notifications: Arc<dyn NotificationSink>,
}

impl MemoryProcessor {
    /// Create a processor with default configuration
    pub fn new(store: Arc<dyn MemoryStore>, notifications: Arc<dyn NotificationSink>) -> Self {
        Self::with_config(store, notifications, NoveltyConfig::default())
    }

    pub fn with_config(
        store: Arc<dyn MemoryStore>,
        notifications: Arc<dyn NotificationSink>,
        config: NoveltyConfig,
    ) -> Self {
        Self {
            detector: NoveltyDetector::with_config(store.clone(), config),
            store,
            notifications,
        }
    }

    pub fn detector(&self) -> &NoveltyDetector {
        &self.detector
    }

    /// Process one generated report.
    ///
    /// `user_id` falls back to the configured anonymous user.
    ///
    /// # Errors
    ///
    /// - [`NoveltyError::StoreRead`] if history could not be read (nothing is written)
    /// - [`NoveltyError::StoreWrite`] if the memory record could not be saved
    ///
    /// A failed notification is not an error: the outcome carries
    /// `notification_created = false` and `notification_error`.
    pub async fn process(
        &self,
        topic: &str,
        report_id: &str,
        raw_content: &str,
        user_id: Option<&str>,
    ) -> Result<ProcessOutcome> {
        let verdict = self.detector.detect(topic, raw_content).await?;

        let memory = NewContentMemory::from_findings(
            topic,
            report_id,
            verdict.key_findings.clone(),
            verdict.source_urls.clone(),
        );
        let record = self
            .store
            .save_content_memory(memory)
            .await
            .map_err(|source| NoveltyError::StoreWrite {
                topic: topic.to_string(),
                report_id: report_id.to_string(),
                source,
            })?;
        info!(
            topic,
            report_id,
            record_id = %record.id,
            content_hash = %record.content_hash,
            "Saved content memory"
        );

        let mut outcome = ProcessOutcome {
            is_novel: verdict.is_novel,
            novel_findings: verdict.novel_findings.clone(),
            notification_created: false,
            record,
            notification_error: None,
        };
        if !verdict.is_novel {
            return Ok(outcome);
        }

        let user_id = user_id.unwrap_or(&self.detector.config().anonymous_user_id);
        match self.notify(topic, report_id, user_id, &verdict).await {
            Ok(()) => outcome.notification_created = true,
            Err(e) => {
                warn!(topic, report_id, user_id, error = ?e, "Failed to create notification");
                outcome.notification_error = Some(format!("{:#}", anyhow::Error::new(e)));
            }
        }
        Ok(outcome)
    }

    async fn notify(
        &self,
        topic: &str,
        report_id: &str,
        user_id: &str,
        verdict: &NoveltyVerdict,
    ) -> Result<()> {
        let (title, message) = build_notification_text(
            topic,
            verdict.novel_findings.len(),
            verdict.novel_urls.len(),
        );
        let request = NewNotification::new_content(user_id, title, message).with_report_id(report_id);
        let notification = self
            .notifications
            .create_notification(request)
            .await
            .map_err(|source| NoveltyError::Notification {
                report_id: report_id.to_string(),
                source,
            })?;
        info!(
            topic,
            report_id,
            notification_id = %notification.id,
            "Created new-content notification"
        );
        Ok(())
    }
}

/// Process a report's memory with the default configuration.
pub async fn process_report_memory(
    store: Arc<dyn MemoryStore>,
    notifications: Arc<dyn NotificationSink>,
    topic: &str,
    report_id: &str,
    raw_content: &str,
    user_id: Option<&str>,
) -> Result<ProcessOutcome> {
    MemoryProcessor::new(store, notifications)
        .process(topic, report_id, raw_content, user_id)
        .await
}

/// Title and message for a new-content notification.
pub fn build_notification_text(
    topic: &str,
    novel_findings: usize,
    novel_urls: usize,
) -> (String, String) {
    let title = format!("New findings on \"{topic}\"");

    let mut parts = Vec::new();
    if novel_findings > 0 {
        parts.push(pluralize(novel_findings, "new finding", "new findings"));
    }
    if novel_urls > 0 {
        parts.push(pluralize(novel_urls, "new source", "new sources"));
    }
    let message = if parts.is_empty() {
        "No new content".to_string()
    } else {
        format!("Found {}", parts.join(" and "))
    };

    (title, message)
}

fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}
