//! Oracle configuration with TOML file support.

use augury_types::{AccAddress, Params};
use augury_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::OracleError;

/// Configuration for the oracle module.
///
/// Can be loaded from a TOML file via [`OracleConfig::from_toml_file`] or built
/// programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleConfig {
    // ── Module accounts ──────────────────────────────────────────────────
    /// Account holding funded reward pools.
    #[serde(default = "default_oracle_module")]
    pub oracle_module: String,

    /// Account that receives distributed rewards.
    #[serde(default = "default_distribution_module")]
    pub distribution_module: String,

    /// Accounts allowed to edit parameters.
    #[serde(default)]
    pub admins: Vec<AccAddress>,

    // ── Logging ──────────────────────────────────────────────────────────
    #[serde(default)]
    pub log_format: LogFormat,

    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    // ── Genesis parameters ───────────────────────────────────────────────
    #[serde(default)]
    pub params: Params,
}

fn default_oracle_module() -> String {
    "oracle".to_string()
}

fn default_distribution_module() -> String {
    "distribution".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl OracleConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, OracleError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| OracleError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string. The embedded params are validated.
    pub fn from_toml_str(s: &str) -> Result<Self, OracleError> {
        let config: Self = toml::from_str(s).map_err(|e| OracleError::Config(e.to_string()))?;
        config
            .params
            .validate()
            .map_err(|e| OracleError::InvalidParams(e.to_string()))?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, OracleError> {
        toml::to_string_pretty(self).map_err(|e| OracleError::Config(e.to_string()))
    }

    /// Install the global tracing subscriber described by this config.
    pub fn init_logging(&self) -> Result<(), OracleError> {
        augury_utils::init_logging(self.log_format, &self.log_level)
            .map_err(|e| OracleError::Config(e.to_string()))
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            oracle_module: default_oracle_module(),
            distribution_module: default_distribution_module(),
            admins: Vec::new(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            params: Params::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use augury_types::Dec;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = OracleConfig {
            admins: vec![AccAddress::new([5; 20])],
            ..OracleConfig::default()
        };
        let toml_str = config.to_toml_string().unwrap();
        let parsed = OracleConfig::from_toml_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config = OracleConfig::from_toml_str("").unwrap();
        assert_eq!(config, OracleConfig::default());
    }

    #[test]
    fn partial_params_keep_other_defaults() {
        let config = OracleConfig::from_toml_str(
            r#"
            log_format = "json"

            [params]
            vote_period = 5
            reward_band = "0.05"
            whitelist = ["BTC:USD"]
            "#,
        )
        .unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.params.vote_period, 5);
        assert_eq!(config.params.reward_band, "0.05".parse::<Dec>().unwrap());
        assert_eq!(config.params.whitelist.len(), 1);
        assert_eq!(config.params.min_voters, Params::default().min_voters);
    }

    #[test]
    fn invalid_params_rejected() {
        let err = OracleConfig::from_toml_str("[params]\nvote_period = 0\n").unwrap_err();
        assert!(matches!(err, OracleError::InvalidParams(_)));
    }
}
