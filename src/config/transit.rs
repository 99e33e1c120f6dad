//! Transit bridge configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Configuration for the transit-departure bridge
#[derive(Debug, Clone, Deserialize)]
pub struct TransitConfig {
    /// Base URL of the EFA data source endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl TransitConfig {
    /// Validate transit bridge configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
        }
        Ok(())
    }
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "https://efa.mvv-muenchen.de/mobile".to_string()
}
