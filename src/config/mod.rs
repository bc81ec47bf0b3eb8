//! Configuration Module
//!
//! Loads and validates configuration from TOML files, with environment
//! overrides for secrets and deployment settings.

pub mod loader;

pub use loader::{
    Config, ConfigError, load_config,
};
