//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Listen address '{0}' is not a valid socket address")]
    InvalidAddress(String),

    #[error("Route path '{0}' must start with '/'")]
    InvalidPath(String),

    #[error("Transit base URL '{0}' must start with http:// or https://")]
    InvalidBaseUrl(String),

    #[error("Event channel capacity must be at least 1")]
    InvalidChannelCapacity,
}
