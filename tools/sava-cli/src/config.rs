//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// File names searched for, nearest directory first.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["sava.toml", ".sava.toml", "sava.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Store configuration.
    #[serde(default)]
    pub store: StoreConfig,

    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Look up a value by dotted key.
    pub fn get(&self, key: &str) -> Result<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["store", "path"] => Ok(self.store.path.display().to_string()),
            ["session", "path"] => Ok(self.session.path.display().to_string()),
            ["session", "lang"] => Ok(self.session.lang.clone()),
            _ => bail!("Unknown config key: {}", key),
        }
    }

    /// Set a value by dotted key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["store", "path"] => self.store.path = PathBuf::from(value),
            ["session", "path"] => self.session.path = PathBuf::from(value),
            ["session", "lang"] => self.session.lang = value.to_uppercase(),
            _ => bail!("Unknown config key: {}", key),
        }

        Ok(())
    }

    /// Problems that would stop the CLI from working.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.store.path.as_os_str().is_empty() {
            errors.push("store.path is required".to_string());
        }
        if self.session.path.as_os_str().is_empty() {
            errors.push("session.path is required".to_string());
        }
        if sava_storefront::Lang::parse(&self.session.lang).is_none() {
            errors.push(format!("session.lang must be ES or EN, got '{}'", self.session.lang));
        }
        errors
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Store snapshot location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON snapshot file, created with the sample catalog when missing.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".sava/store.json")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Shopper session settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session state file.
    #[serde(default = "default_session_path")]
    pub path: PathBuf,

    /// Interface language for new sessions.
    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_session_path() -> PathBuf {
    PathBuf::from(".sava/session.json")
}

fn default_lang() -> String {
    "ES".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
            lang: default_lang(),
        }
    }
}

/// Generate a default sava.toml config file.
pub fn generate_default_config() -> String {
    r#"# SAVA storefront CLI configuration
# Pricing, logging and secrets come from the environment (.env).

[store]
path = ".sava/store.json"

[session]
path = ".sava/session.json"
# ES or EN
lang = "ES"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: CliConfig = toml::from_str("[session]\nlang = \"EN\"\n").unwrap();
        assert_eq!(config.session.lang, "EN");
        assert_eq!(config.store.path, PathBuf::from(".sava/store.json"));
    }

    #[test]
    fn test_get_set() {
        let mut config = CliConfig::default();
        config.set("session.lang", "en").unwrap();
        assert_eq!(config.get("session.lang").unwrap(), "EN");
        assert!(config.set("deploy.canary", "true").is_err());
        assert!(config.get("store").is_err());
    }

    #[test]
    fn test_validate_lang() {
        let mut config = CliConfig::default();
        config.session.lang = "FR".into();
        assert_eq!(config.validate().len(), 1);
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sava.json");
        let mut config = CliConfig::default();
        config.store.path = PathBuf::from("/tmp/shop.json");
        config.save(&path).unwrap();
        assert_eq!(CliConfig::load(&path).unwrap(), config);
    }
}
