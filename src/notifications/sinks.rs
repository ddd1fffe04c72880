//! Built-in notification sinks

use super::types::{NewNotification, NotificationRecord, NotificationSink};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// Sink that keeps every notification in memory.
#[derive(Default)]
pub struct InMemoryNotificationSink {
    notifications: RwLock<Vec<NotificationRecord>>,
}

impl InMemoryNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the notifications created so far, oldest first
    pub async fn notifications(&self) -> Vec<NotificationRecord> {
        self.notifications.read().await.clone()
    }

    /// Notifications addressed to one user
    pub async fn for_user(&self, user_id: &str) -> Vec<NotificationRecord> {
        self.notifications
            .read()
            .await
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl NotificationSink for InMemoryNotificationSink {
    async fn create_notification(
        &self,
        notification: NewNotification,
    ) -> Result<NotificationRecord> {
        let record = notification.into_record(Uuid::new_v4(), Utc::now());
        self.notifications.write().await.push(record.clone());
        Ok(record)
    }
}

/// Sink that only logs notifications. Used by the replay CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotificationSink;

#[async_trait]
impl NotificationSink for LoggingNotificationSink {
    async fn create_notification(
        &self,
        notification: NewNotification,
    ) -> Result<NotificationRecord> {
        let record = notification.into_record(Uuid::new_v4(), Utc::now());
        info!(
            notification_id = %record.id,
            user_id = %record.user_id,
            report_id = record.report_id.as_deref().unwrap_or("-"),
            title = %record.title,
            "{}",
            record.message
        );
        Ok(record)
    }
}
