//! Research Memory
//!
//! Novelty detection for periodically generated research reports:
//! - Finding extraction and order-independent content hashing
//! - Per-topic content memory behind a pluggable store
//! - Two-tier novelty detection (exact hash, then finding/URL diff)
//! - Memory processing that records every report and notifies on novel ones

pub mod content;
pub mod error;
pub mod memory;
pub mod notifications;
pub mod novelty;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use content::{extract_key_findings, extract_source_urls, generate_content_hash};
pub use error::NoveltyError;
pub use novelty::{
    detect_novel_content, process_report_memory, MemoryProcessor, NoveltyConfig, NoveltyDetector,
};

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub novelty: NoveltyYamlConfig,
    pub notifications: NotificationsYamlConfig,
}

/// Novelty detection section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NoveltyYamlConfig {
    pub min_finding_chars: usize,
    pub max_finding_chars: usize,
    pub max_findings: usize,
    pub recent_records_limit: usize,
    pub recent_url_days: u32,
}

impl Default for NoveltyYamlConfig {
    fn default() -> Self {
        let defaults = NoveltyConfig::default();
        Self {
            min_finding_chars: defaults.min_finding_chars,
            max_finding_chars: defaults.max_finding_chars,
            max_findings: defaults.max_findings,
            recent_records_limit: defaults.recent_records_limit,
            recent_url_days: defaults.recent_url_days,
        }
    }
}

/// Notifications section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationsYamlConfig {
    /// Recipient used when no authenticated user is attached to a report
    pub anonymous_user_id: String,
}

impl Default for NotificationsYamlConfig {
    fn default() -> Self {
        Self {
            anonymous_user_id: NoveltyConfig::default().anonymous_user_id,
        }
    }
}

// ============================================================================
// Runtime config (what the application actually uses)
// ============================================================================

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub novelty: NoveltyConfig,
}

impl Config {
    /// Load configuration from env vars over an optional `config.yaml` in CWD.
    /// Equivalent to from_yaml_and_env(None).
    pub fn from_env() -> Result<Self> {
        Self::from_yaml_and_env(None)
    }

    /// Load configuration from an optional YAML file, then override with env vars.
    ///
    /// Priority: env var > YAML > default
    ///
    /// If `yaml_path` is None, tries "config.yaml" in CWD. If the file doesn't
    /// exist, falls back to pure env var / defaults.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        let yaml = Self::load_yaml(yaml_path);

        Ok(Self {
            novelty: NoveltyConfig {
                min_finding_chars: env_or(
                    "NOVELTY_MIN_FINDING_CHARS",
                    yaml.novelty.min_finding_chars,
                )?,
                max_finding_chars: env_or(
                    "NOVELTY_MAX_FINDING_CHARS",
                    yaml.novelty.max_finding_chars,
                )?,
                max_findings: env_or("NOVELTY_MAX_FINDINGS", yaml.novelty.max_findings)?,
                recent_records_limit: env_or(
                    "NOVELTY_RECENT_RECORDS_LIMIT",
                    yaml.novelty.recent_records_limit,
                )?,
                recent_url_days: env_or("NOVELTY_RECENT_URL_DAYS", yaml.novelty.recent_url_days)?,
                anonymous_user_id: std::env::var("NOVELTY_ANONYMOUS_USER_ID")
                    .unwrap_or(yaml.notifications.anonymous_user_id),
            },
        })
    }

    /// Try to load and parse a YAML config file. Returns defaults on any failure.
    fn load_yaml(yaml_path: Option<&Path>) -> YamlConfig {
        let default_path = Path::new("config.yaml");
        let path = yaml_path.unwrap_or(default_path);

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    YamlConfig::default()
                }
            },
            Err(_) => {
                tracing::debug!(
                    "No config file at {}, using env vars / defaults",
                    path.display()
                );
                YamlConfig::default()
            }
        }
    }
}

/// Read a numeric env override, falling back when unset.
fn env_or<T>(key: &str, fallback: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid value for {key}: {value:?} ({e})")),
        Err(_) => Ok(fallback),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod config_tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_yaml_config_loading() {
        let yaml = r#"
novelty:
  min_finding_chars: 20
  max_finding_chars: 400
  max_findings: 5
  recent_records_limit: 100
  recent_url_days: 14

notifications:
  anonymous_user_id: guest
"#;

        let config: YamlConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.novelty.min_finding_chars, 20);
        assert_eq!(config.novelty.max_finding_chars, 400);
        assert_eq!(config.novelty.max_findings, 5);
        assert_eq!(config.novelty.recent_records_limit, 100);
        assert_eq!(config.novelty.recent_url_days, 14);
        assert_eq!(config.notifications.anonymous_user_id, "guest");
    }

    #[test]
    fn test_yaml_defaults() {
        let config = YamlConfig::default();
        assert_eq!(config.novelty.min_finding_chars, 30);
        assert_eq!(config.novelty.max_finding_chars, 500);
        assert_eq!(config.novelty.max_findings, 10);
        assert_eq!(config.novelty.recent_records_limit, 50);
        assert_eq!(config.novelty.recent_url_days, 7);
        assert_eq!(config.notifications.anonymous_user_id, "anonymous");
    }

    #[test]
    fn test_partial_section() {
        let yaml = r#"
novelty:
  recent_url_days: 3
"#;
        let config: YamlConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.novelty.recent_url_days, 3);
        assert_eq!(config.novelty.recent_records_limit, 50);
        assert_eq!(config.notifications.anonymous_user_id, "anonymous");
    }

    /// Combined test for YAML file loading, env var overrides, and fallbacks.
    /// Runs as a single test to avoid parallel env var race conditions.
    #[test]
    fn test_yaml_and_env_lifecycle() {
        fn clear_env() {
            for var in &[
                "NOVELTY_MIN_FINDING_CHARS",
                "NOVELTY_MAX_FINDING_CHARS",
                "NOVELTY_MAX_FINDINGS",
                "NOVELTY_RECENT_RECORDS_LIMIT",
                "NOVELTY_RECENT_URL_DAYS",
                "NOVELTY_ANONYMOUS_USER_ID",
            ] {
                std::env::remove_var(var);
            }
        }

        // --- Phase 1: YAML values loaded correctly ---
        let yaml = r#"
novelty:
  recent_records_limit: 25
  recent_url_days: 10
notifications:
  anonymous_user_id: yaml-user
"#;
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("config.yaml");
        let mut file = std::fs::File::create(&file_path).unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        clear_env();

        let config = Config::from_yaml_and_env(Some(&file_path)).unwrap();
        assert_eq!(config.novelty.recent_records_limit, 25);
        assert_eq!(config.novelty.recent_url_days, 10);
        assert_eq!(config.novelty.min_finding_chars, 30);
        assert_eq!(config.novelty.anonymous_user_id, "yaml-user");

        // --- Phase 2: Env vars override YAML ---
        std::env::set_var("NOVELTY_RECENT_URL_DAYS", "2");
        std::env::set_var("NOVELTY_ANONYMOUS_USER_ID", "env-user");

        let config = Config::from_yaml_and_env(Some(&file_path)).unwrap();
        assert_eq!(config.novelty.recent_url_days, 2);
        assert_eq!(config.novelty.anonymous_user_id, "env-user");
        // YAML value still used where no env override
        assert_eq!(config.novelty.recent_records_limit, 25);

        // --- Phase 3: Invalid numeric override is an error ---
        std::env::set_var("NOVELTY_MAX_FINDINGS", "many");
        let err = Config::from_yaml_and_env(Some(&file_path)).unwrap_err();
        assert!(err.to_string().contains("NOVELTY_MAX_FINDINGS"));

        clear_env();

        // --- Phase 4: Malformed YAML → defaults ---
        let bad_path = dir.path().join("bad.yaml");
        std::fs::write(&bad_path, "novelty: [not, a, map").unwrap();
        let config = Config::from_yaml_and_env(Some(&bad_path)).unwrap();
        assert_eq!(config.novelty, NoveltyConfig::default());

        // --- Phase 5: No YAML file → defaults ---
        let nonexistent = Path::new("/tmp/nonexistent-novelty-config-12345.yaml");
        let config = Config::from_yaml_and_env(Some(nonexistent)).unwrap();
        assert_eq!(config.novelty, NoveltyConfig::default());

        // --- Phase 6: Env only (no config.yaml in the crate root) ---
        std::env::set_var("NOVELTY_RECENT_URL_DAYS", "4000000000");
        let config = Config::from_env().unwrap();
        assert_eq!(config.novelty.recent_url_days, 4_000_000_000);
        assert_eq!(config.novelty.max_findings, 10);

        clear_env();
    }
}
