//! Report content processing
//!
//! Pure, infallible transformations of raw report text:
//! - `normalizer`: markup stripping and finding extraction
//! - `urls`: source link extraction
//! - `hashing`: order-independent fingerprint of a finding set

pub mod hashing;
pub mod normalizer;
pub mod urls;

pub use hashing::{generate_content_hash, normalize_finding};
pub use normalizer::{extract_key_findings, extract_key_findings_with, strip_markup, FindingBounds};
pub use urls::extract_source_urls;
