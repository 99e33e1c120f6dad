//! Web bridge configuration

use serde::Deserialize;
use std::net::SocketAddr;

use super::error::ValidationError;

/// Configuration for the HTTP trigger bridge
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Listen address, host:port
    #[serde(default = "default_address")]
    pub address: String,

    /// Route path served for GET and POST triggers
    #[serde(default = "default_path")]
    pub path: String,
}

impl WebConfig {
    /// Get the parsed socket address to bind to
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        self.address
            .parse()
            .map_err(|_| ValidationError::InvalidAddress(self.address.clone()))
    }

    /// Validate web bridge configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.socket_addr()?;
        if !self.path.starts_with('/') {
            return Err(ValidationError::InvalidPath(self.path.clone()));
        }
        Ok(())
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            path: default_path(),
        }
    }
}

fn default_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_path() -> String {
    "/event".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_config_defaults() {
        let config = WebConfig::default();
        assert_eq!(config.address, "0.0.0.0:8080");
        assert_eq!(config.path, "/event");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let config = WebConfig {
            address: "127.0.0.1:3000".to_string(),
            ..Default::default()
        };
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn test_validation_rejects_bad_address() {
        let config = WebConfig {
            address: "not-an-address".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidAddress("not-an-address".to_string()))
        );
    }

    #[test]
    fn test_validation_rejects_relative_path() {
        let config = WebConfig {
            path: "event".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidPath("event".to_string()))
        );
    }
}
