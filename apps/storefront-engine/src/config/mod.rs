//! Configuration module for the storefront engine.
//!
//! Loads an optional `config.yaml`, falls back to defaults, and validates
//! the policy values. Environment-variable overrides (ports, processor
//! success rate) are applied in `main`.

mod checkout;
mod payments;
mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use checkout::CheckoutConfig;
pub use payments::PaymentsConfig;
pub use server::ServerConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Checkout policy.
    #[serde(default)]
    pub checkout: CheckoutConfig,
    /// Payment processor settings.
    #[serde(default)]
    pub payments: PaymentsConfig,
}

impl Config {
    /// Validate all sections.
    ///
    /// # Errors
    ///
    /// Returns error describing the first invalid value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.checkout.validate().map_err(ConfigError::ValidationError)?;
        self.payments.validate().map_err(ConfigError::ValidationError)?;
        Ok(())
    }
}

/// Load configuration from a YAML file.
///
/// A missing file is not an error: defaults apply. `path` defaults to
/// `config.yaml` in the working directory.
///
/// # Errors
///
/// Returns error if the file exists but cannot be read, parsed, or
/// validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let config = if std::path::Path::new(path).exists() {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_string(),
            source,
        })?;
        serde_yaml_bw::from_str(&text)?
    } else {
        Config::default()
    };

    config.validate()?;
    Ok(config)
}
