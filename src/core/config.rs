use crate::providers::eos_rpc::DEFAULT_ENDPOINT;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_ACCOUNT: &str = "eosnationftw";

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_account() -> String {
    DEFAULT_ACCOUNT.to_string()
}

fn default_user_agent() -> String {
    format!("eos-market-info/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Chain API base URL, without the `/v1/chain` suffix
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Account priced by `cpu`, `net` and `all` when none is given
    #[serde(default = "default_account")]
    pub account: String,
    /// Deadline for a single command, unbounded when absent
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            endpoint: default_endpoint(),
            account: default_account(),
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "eosnation", "eos-market-info")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
endpoint: "http://localhost:8888"
account: "someaccount1"
timeout_secs: 5
user_agent: "custom/1.0"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.endpoint, "http://localhost:8888");
        assert_eq!(config.account, "someaccount1");
        assert_eq!(config.timeout_secs, Some(5));
        assert_eq!(config.user_agent, "custom/1.0");
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_yaml::from_str("account: someaccount1").unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.account, "someaccount1");
        assert!(config.timeout_secs.is_none());
        assert!(config.user_agent.starts_with("eos-market-info/"));

        let empty: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(empty, AppConfig::default());
    }

    #[test]
    fn test_load_from_missing_path() {
        let result = AppConfig::load_from_path("/nonexistent/eos-market-info/config.yaml");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
