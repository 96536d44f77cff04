use crate::core::rate::BaseCurrency;
use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_NBP_URL: &str = "https://api.nbp.pl";
pub const DEFAULT_CACHE_FILE: &str = "nbp_rates.json";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NbpProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_NBP_URL.to_string()
}

fn default_table() -> String {
    "A".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

impl Default for NbpProviderConfig {
    fn default() -> Self {
        NbpProviderConfig {
            base_url: default_base_url(),
            table: default_table(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl NbpProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: NbpProviderConfig,
    /// Snapshot file, relative paths resolve against the working directory.
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,
    #[serde(default)]
    pub base_currency: BaseCurrency,
}

fn default_cache_path() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_FILE)
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            provider: NbpProviderConfig::default(),
            cache_path: default_cache_path(),
            base_currency: BaseCurrency::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config at the default location, or the built-in defaults if
    /// no file has been created there.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("pl", "nbpx", "nbpx")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        if config.provider.timeout_secs == 0 {
            bail!(
                "Invalid config file {}: provider.timeout_secs must be at least 1",
                path.as_ref().display()
            );
        }
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
provider:
  base_url: "http://localhost:8080"
  table: "B"
  timeout_secs: 2
cache_path: "/tmp/rates.json"
base_currency:
  code: "PLN"
  name: "złoty"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.provider.base_url, "http://localhost:8080");
        assert_eq!(config.provider.table, "B");
        assert_eq!(config.provider.timeout(), Duration::from_secs(2));
        assert_eq!(config.cache_path, PathBuf::from("/tmp/rates.json"));
        assert_eq!(config.base_currency.name, "złoty");
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let yaml_str = r#"
provider:
  base_url: "http://example.com/nbp"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        assert_eq!(config.provider.base_url, "http://example.com/nbp");
        assert_eq!(config.provider.table, "A");
        assert_eq!(config.provider.timeout_secs, 5);
        assert_eq!(config.cache_path, PathBuf::from("nbp_rates.json"));
        assert_eq!(config.base_currency, BaseCurrency::default());

        let empty: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(empty, AppConfig::default());
    }

    #[test]
    fn test_load_from_path_reports_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");
        let err = AppConfig::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));

        std::fs::write(&path, "provider: [not, a, map]").unwrap();
        let err = AppConfig::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "provider:\n  timeout_secs: 0\n").unwrap();

        let err = AppConfig::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("timeout_secs must be at least 1"));
    }
}
