//! Notification requests raised for novel reports
//!
//! This module provides:
//! - `NotificationSink` — the collaborator that stores and delivers notifications
//! - `InMemoryNotificationSink` — records notifications in process
//! - `LoggingNotificationSink` — writes notifications to the log

mod sinks;
mod types;

pub use sinks::{InMemoryNotificationSink, LoggingNotificationSink};
pub use types::{NewNotification, NotificationKind, NotificationRecord, NotificationSink};
