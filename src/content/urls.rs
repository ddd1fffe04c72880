//! Source URL extraction from report markup

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)href\s*=\s*(?:"(https?://[^"\s]+)"|'(https?://[^'\s]+)')"#).unwrap()
});

/// Extract the distinct absolute HTTP(S) link targets of a report.
///
/// URLs are returned in first-seen order. Malformed or unterminated
/// attributes are simply skipped.
pub fn extract_source_urls(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut urls = Vec::new();

    for caps in HREF_RE.captures_iter(raw) {
        let Some(url) = caps.get(1).or_else(|| caps.get(2)) else {
            continue;
        };
        let url = url.as_str();
        if seen.insert(url) {
            urls.push(url.to_string());
        }
    }

    urls
}
