use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

use super::currency::Currency;

pub const API_KEY_ENV: &str = "EXCHANGERATE_API_KEY";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub retries: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: "https://v6.exchangerate-api.com".to_string(),
            api_key: None,
            timeout_secs: 10,
            retries: 1,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub decimal_places: usize,
    pub default_from: Currency,
    pub default_to: Currency,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            decimal_places: 2,
            default_from: Currency::Usd,
            default_to: Currency::Npr,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub display: DisplayConfig,
}

impl AppConfig {
    /// Loads the config from `path`, or from the default location when none is given.
    /// A missing default config file yields the built-in defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_path(path)?,
            None => {
                let default_path = Self::default_config_path()?;
                if default_path.exists() {
                    Self::load_from_path(&default_path)?
                } else {
                    debug!("No config at {}, using defaults", default_path.display());
                    Self::default()
                }
            }
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                debug!("Using API key from {API_KEY_ENV}");
                config.provider.api_key = Some(key);
            }
        }
        Ok(config)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "fxconv", "fxconv")
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
provider:
  base_url: "http://localhost:8080"
  api_key: "secret"
  timeout_secs: 3
  retries: 0
display:
  decimal_places: 4
  default_from: "EUR"
  default_to: "JPY"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.provider.base_url, "http://localhost:8080");
        assert_eq!(config.provider.api_key.as_deref(), Some("secret"));
        assert_eq!(config.provider.timeout_secs, 3);
        assert_eq!(config.provider.retries, 0);
        assert_eq!(config.display.decimal_places, 4);
        assert_eq!(config.display.default_from, Currency::Eur);
        assert_eq!(config.display.default_to, Currency::Jpy);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml_str = r#"
provider:
  api_key: "secret"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.provider.base_url, "https://v6.exchangerate-api.com");
        assert_eq!(config.provider.timeout_secs, 10);
        assert_eq!(config.provider.retries, 1);
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn test_unknown_currency_is_rejected() {
        let yaml_str = r#"
display:
  default_from: "CHF"
"#;
        assert!(serde_yaml::from_str::<AppConfig>(yaml_str).is_err());
    }

    #[test]
    fn test_load_from_missing_explicit_path_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing.yaml");
        let err = AppConfig::load(path.to_str()).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
