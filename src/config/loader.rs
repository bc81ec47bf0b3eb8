//! Configuration Loader
//!
//! Loads and validates configuration from an optional TOML file. Every section
//! has defaults, so the service runs with no file at all; secrets come from the
//! environment (`.env` is loaded by the binary).

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::adapters::birdeye::{BirdeyeConfig, DEFAULT_BIRDEYE_BASE};
use crate::adapters::market_data::{JupiterPriceConfig, JUPITER_PRICE_API};
use crate::adapters::token_metadata::{TokenListConfig, SOLANA_TOKEN_LIST_URL};

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerSection,
    pub birdeye: BirdeyeSection,
    pub jupiter: JupiterSection,
    pub token_list: TokenListSection,
    pub timeouts: TimeoutSection,
    pub logging: LoggingSection,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ServerSection {
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::ValidationError(format!("invalid bind address: {}", e)))
    }
}

/// Birdeye API configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BirdeyeSection {
    /// Birdeye public API base URL
    pub base_url: String,
    /// API key; prefer BIRDEYE_API_KEY in .env over committing it here
    pub api_key: Option<String>,
}

impl Default for BirdeyeSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BIRDEYE_BASE.to_string(),
            api_key: None,
        }
    }
}

impl BirdeyeSection {
    /// Configured API key, treating an empty string as absent
    pub fn api_key(&self) -> Option<String> {
        self.api_key.clone().filter(|k| !k.is_empty())
    }
}

/// Jupiter price API configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JupiterSection {
    pub price_url: String,
}

impl Default for JupiterSection {
    fn default() -> Self {
        Self {
            price_url: JUPITER_PRICE_API.to_string(),
        }
    }
}

/// Token list configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TokenListSection {
    pub url: String,
}

impl Default for TokenListSection {
    fn default() -> Self {
        Self {
            url: SOLANA_TOKEN_LIST_URL.to_string(),
        }
    }
}

/// Per-provider request timeouts, in seconds
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimeoutSection {
    /// Birdeye overview/price in strict mode
    pub strict_secs: u64,
    /// Birdeye price and Jupiter in lenient mode
    pub lenient_price_secs: u64,
    /// Token list download
    pub token_list_secs: u64,
}

impl Default for TimeoutSection {
    fn default() -> Self {
        Self {
            strict_secs: 12,
            lenient_price_secs: 8,
            token_list_secs: 12,
        }
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Apply `BIRDEYE_API_KEY`, `BIRDEYE_BASE` and `PORT` from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from `lookup`. Empty values are ignored.
    ///
    /// `PORT` and `BIRDEYE_BASE` replace the file values; `BIRDEYE_API_KEY` only
    /// fills in a key the file leaves unset.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(port) = get("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::ValidationError(format!("PORT must be a port number, got {}", port)))?;
        }
        if let Some(base) = get("BIRDEYE_BASE") {
            self.birdeye.base_url = base;
        }
        if self.birdeye.api_key().is_none() {
            self.birdeye.api_key = get("BIRDEYE_API_KEY");
        }
        Ok(())
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, url) in [
            ("birdeye.base_url", &self.birdeye.base_url),
            ("jupiter.price_url", &self.jupiter.price_url),
            ("token_list.url", &self.token_list.url),
        ] {
            if url.is_empty() {
                return Err(ConfigError::ValidationError(format!("{} cannot be empty", name)));
            }
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be an http(s) URL, got {}",
                    name, url
                )));
            }
        }

        for (name, secs) in [
            ("timeouts.strict_secs", self.timeouts.strict_secs),
            ("timeouts.lenient_price_secs", self.timeouts.lenient_price_secs),
            ("timeouts.token_list_secs", self.timeouts.token_list_secs),
        ] {
            if secs == 0 || secs > 60 {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be 1-60, got {}",
                    name, secs
                )));
            }
        }

        if self.server.host.is_empty() {
            return Err(ConfigError::ValidationError("server.host cannot be empty".to_string()));
        }

        Ok(())
    }

    /// Birdeye client config for the given timeout
    pub fn birdeye_config(&self, timeout: Duration) -> BirdeyeConfig {
        BirdeyeConfig {
            base_url: self.birdeye.base_url.trim_end_matches('/').to_string(),
            api_key: self.birdeye.api_key(),
            timeout,
        }
    }

    pub fn jupiter_config(&self) -> JupiterPriceConfig {
        JupiterPriceConfig {
            price_url: self.jupiter.price_url.clone(),
            timeout: Duration::from_secs(self.timeouts.lenient_price_secs),
        }
    }

    pub fn token_list_config(&self) -> TokenListConfig {
        TokenListConfig {
            list_url: self.token_list.url.clone(),
            timeout: Duration::from_secs(self.timeouts.token_list_secs),
        }
    }

    pub fn strict_timeout(&self) -> Duration {
        Duration::from_secs(self.timeouts.strict_secs)
    }

    pub fn lenient_price_timeout(&self) -> Duration {
        Duration::from_secs(self.timeouts.lenient_price_secs)
    }
}
