//! Text normalization and finding extraction
//!
//! Turns a raw (possibly HTML) report body into an ordered list of findings:
//! short, informative sentences that serve as the unit of novelty comparison.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
/// Block-level tags end a line of text, so they become a space instead of
/// gluing the words on either side together.
static BLOCK_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)</?(?:p|br|div|li|ul|ol|dl|dt|dd|h[1-6]|tr|td|th|table|thead|tbody|section|article|header|footer|blockquote|pre|hr)\b[^>]*>",
    )
    .unwrap()
});
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static SENTENCE_END_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

/// Entities decoded after tag removal. `&amp;` comes last so that an escaped
/// entity such as `&amp;lt;` decodes to the literal text `&lt;`.
const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#039;", "'"),
    ("&amp;", "&"),
];

/// Length and count bounds applied to candidate findings.
///
/// The hasher and detector operate on whatever these bounds let through, so
/// changing them changes content hashes for the same report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingBounds {
    /// Sentences must be strictly longer than this (in characters).
    pub min_chars: usize,
    /// Sentences must be strictly shorter than this (in characters).
    pub max_chars: usize,
    /// Only the first `max_findings` qualifying sentences are kept.
    pub max_findings: usize,
}

impl Default for FindingBounds {
    fn default() -> Self {
        Self {
            min_chars: 30,
            max_chars: 500,
            max_findings: 10,
        }
    }
}

impl FindingBounds {
    fn accepts(&self, sentence: &str) -> bool {
        let len = sentence.chars().count();
        len > self.min_chars && len < self.max_chars
    }
}

/// Strip markup tags, decode the common HTML entities and collapse whitespace.
///
/// Inline tags are removed outright; block-level tags are replaced by a space.
pub fn strip_markup(raw: &str) -> String {
    let text = BLOCK_TAG_RE.replace_all(raw, " ");
    let mut text = TAG_RE.replace_all(&text, "").into_owned();
    for (entity, replacement) in ENTITIES {
        text = text.replace(entity, replacement);
    }
    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}

/// Extract findings using the default [`FindingBounds`].
pub fn extract_key_findings(raw: &str) -> Vec<String> {
    extract_key_findings_with(raw, &FindingBounds::default())
}

/// Extract findings from a raw report body.
///
/// Never fails: text without any qualifying sentence yields an empty list.
pub fn extract_key_findings_with(raw: &str, bounds: &FindingBounds) -> Vec<String> {
    let text = strip_markup(raw);
    if text.is_empty() {
        return Vec::new();
    }

    let findings: Vec<String> = SENTENCE_END_RE
        .split(&text)
        .map(str::trim)
        .filter(|s| bounds.accepts(s))
        .take(bounds.max_findings)
        .map(str::to_string)
        .collect();

    tracing::debug!(count = findings.len(), "Extracted key findings");
    findings
}
