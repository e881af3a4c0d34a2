//! CLI configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::CliError;

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Default log filter
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON without passing --json
    #[serde(default)]
    pub json: bool,
    /// Prefix printed hex with 0x
    #[serde(default = "default_hex_prefix")]
    pub hex_prefix: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_hex_prefix() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
            hex_prefix: default_hex_prefix(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".abicoder"))
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Load config from `path`, or from the default location when `None`
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        match path {
            Some(path) => Self::load_from(path),
            None => match Self::config_path() {
                Some(path) => Self::load_from(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Load config from a file; a missing file gives the defaults
    pub fn load_from(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.log_level, "warn");
        assert!(!config.json);
        assert!(config.hex_prefix);
    }

    #[test]
    fn test_config_serialize() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("log_level"));
        assert!(toml.contains("hex_prefix"));
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml = r#"
            json = true
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.json);
        assert_eq!(config.log_level, "warn");
        assert!(config.hex_prefix);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "log_level = \"debug\"\nhex_prefix = false\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(!config.hex_prefix);
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "json = \"maybe\"").unwrap();

        match Config::load_from(&path) {
            Err(CliError::Config(msg)) => assert!(msg.contains("config.toml")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }
}
