//! Configuration for novelty detection.
//!
//! All parameters have defaults and can be overridden from `config.yaml` or
//! the environment (see [`Config`](crate::Config)).

use crate::content::FindingBounds;
use serde::{Deserialize, Serialize};

/// Tuning values for the detector and processor.
///
/// The history windows trade recall against store query cost: a finding that
/// last appeared more than `recent_records_limit` reports ago, or a URL last
/// cited more than `recent_url_days` days ago, is treated as new again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoveltyConfig {
    /// Findings must be strictly longer than this many characters.
    pub min_finding_chars: usize,

    /// Findings must be strictly shorter than this many characters.
    pub max_finding_chars: usize,

    /// Maximum number of findings extracted per report.
    pub max_findings: usize,

    /// How many recent records of a topic are compared at finding level.
    pub recent_records_limit: usize,

    /// Trailing window, in days, for source URL novelty.
    pub recent_url_days: u32,

    /// User that notifications are addressed to when the caller has no
    /// authenticated user.
    pub anonymous_user_id: String,
}

impl Default for NoveltyConfig {
    fn default() -> Self {
        let bounds = FindingBounds::default();
        Self {
            min_finding_chars: bounds.min_chars,
            max_finding_chars: bounds.max_chars,
            max_findings: bounds.max_findings,
            recent_records_limit: 50,
            recent_url_days: 7,
            anonymous_user_id: "anonymous".to_string(),
        }
    }
}

impl NoveltyConfig {
    pub fn finding_bounds(&self) -> FindingBounds {
        FindingBounds {
            min_chars: self.min_finding_chars,
            max_chars: self.max_finding_chars,
            max_findings: self.max_findings,
        }
    }
}
