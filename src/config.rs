//! Configuration management for resume-match
//!
//! Config file location:
//! - Linux: ~/.config/resume-match/config.toml
//! - macOS: ~/Library/Application Support/resume-match/config.toml
//! - Windows: %APPDATA%/resume-match/config.toml
//!
//! You can override the config location by setting `RESUME_MATCH_CONFIG_PATH`.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Matching service endpoint configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Surface preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Load configuration from file or create default
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

            let config: Config = toml::from_str(&content).with_context(|| {
                format!("Failed to parse config from {}", config_path.display())
            })?;

            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&config_path, toml)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("RESUME_MATCH_CONFIG_PATH") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }

        let proj_dirs = project_dirs()?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Log file used while the terminal UI owns the screen
    pub fn log_path() -> Result<PathBuf> {
        let proj_dirs = project_dirs()?;
        Ok(proj_dirs.data_local_dir().join("resume-match.log"))
    }

    /// Create default config file if it doesn't exist
    pub fn init() -> Result<Self> {
        let config = Self::load()?;

        let config_path = Self::config_path()?;
        if !config_path.exists() {
            config.save()?;
        }

        Ok(config)
    }

    /// Whether failures should be logged as diagnostics.
    /// `RESUME_MATCH_DIAGNOSTICS` overrides the file.
    pub fn diagnostics_enabled(&self) -> bool {
        parse_bool_env("RESUME_MATCH_DIAGNOSTICS").unwrap_or(self.ui.diagnostics)
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "resumematch", "resume-match")
        .context("Could not determine project directories")
}

/// Matching service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Service base URL; submissions go to `{base_url}/match`
    #[serde(default = "default_api_url")]
    pub base_url: String,

    /// Request timeout in seconds. Unset waits for the response indefinitely.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    /// Whether to verify SSL certificates
    #[serde(default = "default_true")]
    pub verify_ssl: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            timeout_seconds: None,
            verify_ssl: default_true(),
        }
    }
}

pub(crate) fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_true() -> bool {
    true
}

/// Surface preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Log request failures at error level and raise this crate's log level to debug
    #[serde(default)]
    pub diagnostics: bool,
}

pub(crate) fn parse_bool_env(key: &str) -> Option<bool> {
    let value = std::env::var(key).ok()?;
    parse_bool_value(&value)
}

pub(crate) fn parse_bool_value(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Get configuration file path for display purposes
pub fn get_config_path() -> Result<String> {
    let path = Config::config_path()?;
    Ok(path.display().to_string())
}
