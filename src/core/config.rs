//! Configuration management for the BrowserAct client
//!
//! Supports environment variables, config files, and runtime overrides.
//!
//! Config file location: ~/.config/browseract/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::core::error::{BrowserActError, Result};

/// Production API endpoint, versioned path included.
pub const DEFAULT_BASE_URL: &str = "https://api.browseract.com/v2";

/// Main configuration for the BrowserAct client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API endpoint configuration
    #[serde(default)]
    pub api: ApiConfig,
    /// Credential configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Polling configuration for watch loops
    #[serde(default)]
    pub polling: PollingConfig,
}

/// API endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL including the version path (default: https://api.browseract.com/v2)
    pub base_url: String,
    /// Request timeout in seconds; unset means no client-side timeout
    pub timeout_secs: Option<u64>,
    /// Whether to print request/response debug output to stderr
    pub debug: bool,
}

/// Credential configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// API key from the integrations page
    pub api_key: Option<String>,
}

/// Polling configuration for watch loops
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Seconds to sleep between status polls
    /// Default: 5
    pub interval_secs: u64,
    /// Seconds after which a watch loop gives up
    /// Default: 600
    pub max_wait_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            auth: AuthConfig::default(),
            polling: PollingConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: env::var("BROWSERACT_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout_secs: env::var("BROWSERACT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok()),
            debug: env::var("BROWSERACT_DEBUG")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key: env::var("BROWSERACT_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: 5,
            max_wait_secs: 600,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("browseract")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load() -> Self {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        let mut config = Self::load_from_file().unwrap_or_default();

        // A key from the environment fills in for a config file without one
        if config.auth.api_key.is_none() {
            config.auth.api_key = env::var("BROWSERACT_API_KEY")
                .ok()
                .filter(|k| !k.is_empty());
        }

        config
    }

    /// Load configuration from file only
    pub fn load_from_file() -> Result<Self> {
        let config_path = Self::config_file();

        if !config_path.exists() {
            return Err(BrowserActError::config("Config file not found"));
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| BrowserActError::config(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| BrowserActError::config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir();
        let config_path = Self::config_file();

        // Create config directory if it doesn't exist
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).map_err(|e| {
                BrowserActError::config(format!("Failed to create config dir: {}", e))
            })?;
        }

        // Serialize to TOML
        let content = toml::to_string_pretty(self)
            .map_err(|e| BrowserActError::config(format!("Failed to serialize config: {}", e)))?;

        // Write to file
        fs::write(&config_path, content)
            .map_err(|e| BrowserActError::config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Check if a config file exists
    pub fn config_exists() -> bool {
        Self::config_file().exists()
    }

    /// Generate a default config file content for display
    pub fn default_config_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config)
            .unwrap_or_else(|_| String::from("# Error generating config"))
    }
}
