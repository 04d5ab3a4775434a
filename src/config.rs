use std::path::{Path, PathBuf};
use std::time::Duration;

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::tool::types::{ToolSpec, default_tools};
use crate::version::registries::{github, pypi};

// =============================================================================
// Time-related constants
// =============================================================================

/// Timeout for a tool's version command in milliseconds (10 seconds)
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 10_000;

/// Timeout for registry requests in milliseconds (30 seconds)
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 30_000;

/// Timeout for install commands in milliseconds (10 minutes)
pub const DEFAULT_INSTALL_TIMEOUT_MS: u64 = 10 * 60 * 1000;

/// Delay between starting each tool check to avoid rate limiting (10ms)
pub const FETCH_STAGGER_DELAY_MS: u64 = 10;

/// Default interval between refreshes in watch mode (1 hour)
pub const DEFAULT_WATCH_INTERVAL_SECS: u64 = 60 * 60;

const APP_NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub timeouts: TimeoutConfig,
    /// Directory tools are installed into; probed before PATH
    pub install_dir: Option<PathBuf>,
    pub registries: RegistriesConfig,
    /// Managed tools, in display order. Replaces the defaults when present.
    pub tools: IndexMap<String, ToolSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeouts: TimeoutConfig::default(),
            install_dir: None,
            registries: RegistriesConfig::default(),
            tools: default_tools(),
        }
    }
}

/// Timeout configuration, all values in milliseconds
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TimeoutConfig {
    pub probe_ms: u64,
    pub fetch_ms: u64,
    pub install_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            probe_ms: DEFAULT_PROBE_TIMEOUT_MS,
            fetch_ms: DEFAULT_FETCH_TIMEOUT_MS,
            install_ms: DEFAULT_INSTALL_TIMEOUT_MS,
        }
    }
}

impl TimeoutConfig {
    pub fn probe(&self) -> Duration {
        Duration::from_millis(self.probe_ms)
    }

    pub fn fetch(&self) -> Duration {
        Duration::from_millis(self.fetch_ms)
    }

    pub fn install(&self) -> Duration {
        Duration::from_millis(self.install_ms)
    }
}

/// Registry-specific configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RegistriesConfig {
    pub github: GitHubConfig,
    pub pypi: PypiConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GitHubConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            base_url: github::DEFAULT_BASE_URL.to_string(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PypiConfig {
    pub base_url: String,
}

impl Default for PypiConfig {
    fn default() -> Self {
        Self {
            base_url: pypi::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from JSON text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = serde_json::from_str(content)?;
        for (name, tool) in config.tools.iter_mut() {
            tool.name = name.clone();
        }
        Ok(config)
    }

    /// Tools selected by name, in config order; all tools when `names` is empty
    pub fn select_tools(&self, names: &[String]) -> Result<Vec<ToolSpec>, ConfigError> {
        if let Some(unknown) = names.iter().find(|n| !self.tools.contains_key(n.as_str())) {
            return Err(ConfigError::UnknownTool(unknown.clone()));
        }

        Ok(self
            .tools
            .values()
            .filter(|tool| names.is_empty() || names.contains(&tool.name))
            .cloned()
            .collect())
    }
}

/// Returns the path to the config directory for toolsentry.
/// Uses $XDG_CONFIG_HOME/toolsentry if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/toolsentry,
/// or ./toolsentry if neither is available.
pub fn config_dir() -> PathBuf {
    dir_with_env(
        std::env::var("XDG_CONFIG_HOME").ok(),
        dirs::home_dir(),
        ".config",
    )
}

/// Returns the path to the config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Returns the path to the data directory for toolsentry.
/// Uses $XDG_DATA_HOME/toolsentry if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/toolsentry,
/// or ./toolsentry if neither is available.
pub fn data_dir() -> PathBuf {
    dir_with_env(
        std::env::var("XDG_DATA_HOME").ok(),
        dirs::home_dir(),
        ".local/share",
    )
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join(format!("{}.log", APP_NAME))
}

fn dir_with_env(xdg_dir: Option<String>, home_dir: Option<PathBuf>, home_relative: &str) -> PathBuf {
    let base = xdg_dir
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(home_relative)))
        .unwrap_or_else(|| PathBuf::from("."));

    base.join(APP_NAME)
}
