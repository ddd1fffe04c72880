//! Notification types and the sink abstraction

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of notification being raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A report contained findings or sources not seen before for its topic
    NewContent,
}

/// A notification request sent to the sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_id: Option<String>,
    pub user_id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl NewNotification {
    /// Create a new-content notification for a user
    pub fn new_content(
        user_id: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            report_id: None,
            user_id: user_id.into(),
            kind: NotificationKind::NewContent,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Associate the notification with a report
    pub fn with_report_id(mut self, report_id: impl Into<String>) -> Self {
        self.report_id = Some(report_id.into());
        self
    }

    /// Materialize the stored record
    pub fn into_record(self, id: Uuid, created_at: DateTime<Utc>) -> NotificationRecord {
        NotificationRecord {
            id,
            report_id: self.report_id,
            user_id: self.user_id,
            kind: self.kind,
            title: self.title,
            message: self.message,
            read: false,
            created_at,
        }
    }
}

/// A notification as stored by the sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_id: Option<String>,
    pub user_id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Receiver of notification requests (persistence + delivery live behind it).
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn create_notification(&self, notification: NewNotification)
        -> Result<NotificationRecord>;
}
