//! Monitor configuration validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::{debug, warn};

impl Validate for MonitorConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating monitor configuration");

        if self.namespace.trim().is_empty() {
            return Err("Namespace cannot be empty".to_string());
        }

        if self.refresh_interval_secs == 0 {
            return Err("Refresh interval must be greater than 0".to_string());
        }

        if self.check_interval_secs == 0 {
            return Err("Check interval must be greater than 0".to_string());
        }

        if self.result_buffer == 0 {
            return Err("Result buffer must hold at least one result".to_string());
        }

        if let Some(hint) = &self.discovery_hint {
            if hint.trim().is_empty() {
                return Err("Discovery hint cannot be blank when set".to_string());
            }
        }

        self.probe.validate()?;
        self.source.validate()?;
        self.logging.validate()?;

        Ok(())
    }
}

impl Validate for ProbeConfig {
    fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("Probe timeout must be greater than 0".to_string());
        }

        if self.scheme != "https" && self.scheme != "http" {
            return Err(format!(
                "Probe scheme must be 'http' or 'https', got '{}'",
                self.scheme
            ));
        }

        Ok(())
    }
}

impl Validate for SourceConfig {
    fn validate(&self) -> Result<(), String> {
        match self.kind {
            SourceKind::File if self.path.is_none() => {
                Err("File source requires a registry file path".to_string())
            }
            SourceKind::File => Ok(()),
            SourceKind::Kubernetes => self.cluster.validate(),
        }
    }
}

impl Validate for ClusterConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(api_server) = &self.api_server {
            let parsed = url::Url::parse(api_server)
                .map_err(|e| format!("Invalid API server URL '{}': {}", api_server, e))?;
            if parsed.scheme() != "https" && parsed.scheme() != "http" {
                return Err(format!("Unsupported API server scheme '{}'", parsed.scheme()));
            }
        }

        if self.token_path.is_empty() {
            return Err("Token path cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Warn about settings that weaken TLS
pub fn warn_insecure_config(config: &MonitorConfig) {
    if config.probe.insecure_skip_verify {
        warn!("Registry certificate verification is disabled (probe.insecure_skip_verify)");
    }
    if config.source.cluster.insecure_skip_verify {
        warn!("API server certificate verification is disabled (source.cluster.insecure_skip_verify)");
    }
}
