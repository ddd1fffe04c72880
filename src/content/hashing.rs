//! Content hashing for finding sets
//!
//! Generates stable hashes that identify a report's set of findings while
//! being tolerant to ordering, casing and whitespace changes.

use sha2::{Digest, Sha256};

/// Normalize a finding for comparison and hashing
///
/// Lowercases, collapses whitespace runs to a single space, and trims.
pub fn normalize_finding(finding: &str) -> String {
    let mut result = String::with_capacity(finding.len());
    let mut last_was_space = false;

    for c in finding.chars() {
        if c.is_whitespace() {
            if !last_was_space && !result.is_empty() {
                result.push(' ');
                last_was_space = true;
            }
        } else {
            result.extend(c.to_lowercase());
            last_was_space = false;
        }
    }

    result.trim_end().to_string()
}

/// Hash a set of findings
///
/// Ignores: order, case, whitespace runs
/// Includes: the normalized text of every finding
///
/// Each finding is fed to the hasher as its byte length (u64, little endian)
/// followed by its bytes, so no two distinct finding sets share an input.
pub fn generate_content_hash<S: AsRef<str>>(findings: &[S]) -> String {
    let mut normalized: Vec<String> = findings
        .iter()
        .map(|f| normalize_finding(f.as_ref()))
        .collect();
    normalized.sort();

    let mut hasher = Sha256::new();
    for finding in &normalized {
        hasher.update((finding.len() as u64).to_le_bytes());
        hasher.update(finding.as_bytes());
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_hex_sha256() {
        let hash = generate_content_hash(&["A finding about compilers"]);
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_empty_set_hashes_empty_string() {
        let empty: [&str; 0] = [];
        assert_eq!(
            generate_content_hash(&empty),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hash_order_independent() {
        let a = "Rust 1.80 stabilized LazyLock in the standard library";
        let b = "The borrow checker now accepts more programs than before";
        let c = "Async closures landed on the nightly channel last week";

        let permutations = [[a, b, c], [a, c, b], [b, a, c], [b, c, a], [c, a, b], [c, b, a]];
        let expected = generate_content_hash(&permutations[0]);
        for p in &permutations {
            assert_eq!(generate_content_hash(p), expected);
        }
    }

    #[test]
    fn test_hash_whitespace_independent() {
        assert_eq!(
            generate_content_hash(&["Finding   with   spaces"]),
            generate_content_hash(&["Finding with spaces"])
        );
        assert_eq!(
            generate_content_hash(&["  Finding\twith\nspaces  "]),
            generate_content_hash(&["Finding with spaces"])
        );
    }

    #[test]
    fn test_hash_case_independent() {
        assert_eq!(
            generate_content_hash(&["NEW Release Of Tokio"]),
            generate_content_hash(&["new release of tokio"])
        );
    }

    #[test]
    fn test_hash_different_content() {
        let inputs: [&[&str]; 5] = [
            &["alpha finding"],
            &["beta finding"],
            &["alpha finding", "beta finding"],
            &["alpha finding beta finding"],
            &[],
        ];
        let hashes: std::collections::HashSet<String> =
            inputs.iter().map(|i| generate_content_hash(*i)).collect();
        assert_eq!(hashes.len(), inputs.len());
    }

    #[test]
    fn test_hash_pipe_inside_finding_is_unambiguous() {
        assert_ne!(
            generate_content_hash(&["aaa|bbb"]),
            generate_content_hash(&["aaa", "bbb"])
        );
        assert_ne!(
            generate_content_hash(&["a|", "b"]),
            generate_content_hash(&["a", "|b"])
        );
    }

    #[test]
    fn test_hash_length_prefix_is_unambiguous() {
        // Lengths and bytes must not realign across finding boundaries
        assert_ne!(
            generate_content_hash(&["ab", "c"]),
            generate_content_hash(&["a", "bc"])
        );
        assert_ne!(generate_content_hash(&[""]), generate_content_hash(&["", ""]));
    }

    #[test]
    fn test_normalize_finding() {
        assert_eq!(normalize_finding("  Hello   World  "), "hello world");
        assert_eq!(normalize_finding("ÉTÉ\u{00a0}Chaud"), "été chaud");
        assert_eq!(normalize_finding(""), "");
    }
}
