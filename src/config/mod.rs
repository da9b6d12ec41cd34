//! Configuration management for the monitor
//!
//! Configuration is layered: built-in defaults, then an optional YAML file,
//! then command-line flags and environment variables (see [`crate::cli`]).
//! It is read once at startup.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{MonitorError, Result};
use std::path::Path;
use tracing::debug;

/// Main configuration struct for the monitor
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Monitor configuration
    pub monitor: MonitorConfig,
}

impl Config {
    /// Load configuration from a YAML file.
    ///
    /// The result is not validated; flags may still complete it.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| MonitorError::Config(format!("Failed to read config file: {}", e)))?;

        let monitor: MonitorConfig = serde_yaml::from_str(&content)
            .map_err(|e| MonitorError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(Self { monitor })
    }

    /// Get monitor configuration
    pub fn monitor(&self) -> &MonitorConfig {
        &self.monitor
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.monitor
            .validate()
            .map_err(|e| MonitorError::Config(format!("Monitor config error: {}", e)))?;

        Ok(())
    }

    /// Log warnings for settings that weaken TLS. Call once logging is up.
    pub fn warn_insecure(&self) {
        validation::warn_insecure_config(&self.monitor);
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.monitor)
            .map_err(|e| MonitorError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
