//! Novelty detection and memory processing
//!
//! - `NoveltyDetector`: decides whether a report adds anything to its topic's history
//! - `MemoryProcessor`: records every report and notifies on novel ones

pub mod config;
pub mod detector;
pub mod processor;

pub use config::NoveltyConfig;
pub use detector::{detect_novel_content, NoveltyDetector};
pub use processor::{build_notification_text, process_report_memory, MemoryProcessor};
