//! Error taxonomy for novelty detection and memory processing
//!
//! Store and sink traits return `anyhow::Result`; the detector and processor
//! classify those failures here so callers can tell a history read failure
//! (retry later) from a write failure (history integrity at stake).

use thiserror::Error;

/// Errors surfaced by [`NoveltyDetector`](crate::novelty::NoveltyDetector)
/// and [`MemoryProcessor`](crate::novelty::MemoryProcessor).
#[derive(Debug, Error)]
pub enum NoveltyError {
    /// Querying topic history failed; detection cannot proceed.
    #[error("failed to read memory for topic '{topic}' ({operation})")]
    StoreRead {
        operation: &'static str,
        topic: String,
        #[source]
        source: anyhow::Error,
    },

    /// Persisting the content memory record failed.
    #[error("failed to save memory for topic '{topic}' (report {report_id})")]
    StoreWrite {
        topic: String,
        report_id: String,
        #[source]
        source: anyhow::Error,
    },

    /// Creating the notification failed after the memory record was saved.
    ///
    /// `MemoryProcessor::process` never returns this variant; it is logged and
    /// reported through `ProcessOutcome::notification_error`.
    #[error("failed to create notification for report {report_id}")]
    Notification {
        report_id: String,
        #[source]
        source: anyhow::Error,
    },
}

impl NoveltyError {
    pub(crate) fn read(operation: &'static str, topic: &str, source: anyhow::Error) -> Self {
        Self::StoreRead {
            operation,
            topic: topic.to_string(),
            source,
        }
    }

    /// True for failures that leave history untouched and can be retried as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreRead { .. } | Self::StoreWrite { .. })
    }
}

pub type Result<T, E = NoveltyError> = std::result::Result<T, E>;
