//! Gate configuration.
//!
//! Loaded from a TOML file (`.jag/gate.toml` by convention). Every
//! section is optional; an empty file yields a gate that logs and admits
//! everything.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

/// Configuration load failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// `[hooks].enabled` names a hook this gate does not provide.
    #[error("unknown hook in [hooks].enabled: {0}")]
    UnknownHook(String),
}

/// Default values applied to unset job fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Partition assigned when the submission names none.
    #[serde(default)]
    pub partition: Option<String>,
    /// Account assigned when the submission names none.
    #[serde(default)]
    pub account: Option<String>,
    /// Wall-clock limit in minutes assigned when the submission sets none.
    #[serde(default)]
    pub time_limit: Option<u32>,
    /// Minimum node count assigned when the submission sets none.
    #[serde(default)]
    pub min_nodes: Option<u32>,
}

/// Admission policy constraints. Empty collections impose no constraint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Partitions jobs may target. Empty means any.
    #[serde(default)]
    pub allowed_partitions: BTreeSet<String>,
    /// Accounts that may not submit at all.
    #[serde(default)]
    pub denied_accounts: BTreeSet<String>,
    /// Hard cap on the wall-clock limit, in minutes.
    #[serde(default)]
    pub max_time_limit: Option<u32>,
    /// Reject submissions without a batch script.
    #[serde(default)]
    pub require_script: bool,
    /// Warn (without rejecting) when no account is given.
    #[serde(default)]
    pub warn_missing_account: bool,
}

/// Which hooks run, in chain order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HooksConfig {
    /// Hook names; the first non-admit outcome short-circuits the chain.
    #[serde(default = "default_enabled")]
    pub enabled: Vec<String>,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
        }
    }
}

fn default_enabled() -> Vec<String> {
    vec![
        "logging".to_string(),
        "defaults".to_string(),
        "policy".to_string(),
    ]
}

/// Top-level gate configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateConfig {
    /// Defaults hook settings.
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Policy hook settings.
    #[serde(default)]
    pub policy: PolicyConfig,
    /// Chain composition.
    #[serde(default)]
    pub hooks: HooksConfig,
}

impl GateConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&contents)?)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_defaults() {
        let config = GateConfig::from_toml_str("").unwrap();
        assert!(config.defaults.partition.is_none());
        assert!(config.policy.allowed_partitions.is_empty());
        assert_eq!(config.hooks.enabled, vec!["logging", "defaults", "policy"]);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [defaults]
            partition = "batch"
            time_limit = 60

            [policy]
            allowed_partitions = ["batch", "debug"]
            denied_accounts = ["blocked"]
            max_time_limit = 1440
            require_script = true

            [hooks]
            enabled = ["defaults", "policy"]
        "#;
        let config = GateConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.defaults.partition.as_deref(), Some("batch"));
        assert_eq!(config.defaults.time_limit, Some(60));
        assert!(config.policy.allowed_partitions.contains("debug"));
        assert!(config.policy.denied_accounts.contains("blocked"));
        assert_eq!(config.policy.max_time_limit, Some(1440));
        assert!(config.policy.require_script);
        assert_eq!(config.hooks.enabled, vec!["defaults", "policy"]);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[defaults]\npartition = \"batch\"").unwrap();

        let config = GateConfig::from_file(file.path()).unwrap();
        assert_eq!(config.defaults.partition.as_deref(), Some("batch"));
    }

    #[test]
    fn test_from_file_missing() {
        let result = GateConfig::from_file(Path::new("/nonexistent/gate.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_parse_error() {
        let result = GateConfig::from_toml_str("[policy\nbroken");
        assert!(result.is_err());
    }
}
