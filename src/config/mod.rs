//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is
//! loaded with the `HIVEBRIDGE` prefix and nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use hivebridge::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Web bridge on {}{}", config.web.address, config.web.path);
//! ```

mod error;
mod transit;
mod web;

pub use error::{ConfigError, ValidationError};
pub use transit::TransitConfig;
pub use web::WebConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Contains one section per bridge plus the shared event channel settings.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP trigger bridge (listen address, route path)
    #[serde(default)]
    pub web: WebConfig,

    /// Transit-departure bridge (data source endpoint)
    #[serde(default)]
    pub transit: TransitConfig,

    /// Bounded capacity of the shared event channel
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `HIVEBRIDGE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `HIVEBRIDGE__WEB__ADDRESS=0.0.0.0:9000` -> `web.address`
    /// - `HIVEBRIDGE__TRANSIT__BASE_URL=...` -> `transit.base_url`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into the expected
    /// types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("HIVEBRIDGE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.web.validate()?;
        self.transit.validate()?;
        if self.channel_capacity == 0 {
            return Err(ValidationError::InvalidChannelCapacity);
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            web: WebConfig::default(),
            transit: TransitConfig::default(),
            channel_capacity: default_channel_capacity(),
            log_level: default_log_level(),
        }
    }
}

fn default_channel_capacity() -> usize {
    64
}

fn default_log_level() -> String {
    "info,hivebridge=debug".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("HIVEBRIDGE__WEB__ADDRESS");
        env::remove_var("HIVEBRIDGE__WEB__PATH");
        env::remove_var("HIVEBRIDGE__TRANSIT__BASE_URL");
        env::remove_var("HIVEBRIDGE__CHANNEL_CAPACITY");
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().expect("load should succeed");

        assert_eq!(config.web.address, "0.0.0.0:8080");
        assert_eq!(config.web.path, "/event");
        assert_eq!(config.channel_capacity, 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_overrides_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("HIVEBRIDGE__WEB__ADDRESS", "127.0.0.1:9000");
        env::set_var("HIVEBRIDGE__TRANSIT__BASE_URL", "https://efa.example.com");
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("load should succeed");
        assert_eq!(config.web.address, "127.0.0.1:9000");
        assert_eq!(config.transit.base_url, "https://efa.example.com");
    }

    #[test]
    fn test_zero_channel_capacity_fails_validation() {
        let config = AppConfig {
            channel_capacity: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidChannelCapacity)
        );
    }
}
