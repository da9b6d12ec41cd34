//! Main monitor configuration

use super::*;
use crate::monitoring::CredentialRotation;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Namespace queried for registry secrets (and candidate pods)
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Desired-set re-poll period in seconds
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    /// Per-registry probe period in seconds
    #[serde(default = "default_check_interval_secs")]
    pub check_interval_secs: u64,
    /// Pod label selector; enables source identity tagging when set
    #[serde(default)]
    pub discovery_hint: Option<String>,
    /// Output stream capacity
    #[serde(default = "default_result_buffer")]
    pub result_buffer: usize,
    /// Credential rotation policy
    #[serde(default)]
    pub credential_rotation: CredentialRotation,
    /// Probe settings
    #[serde(default)]
    pub probe: ProbeConfig,
    /// Desired-set source settings
    #[serde(default)]
    pub source: SourceConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            refresh_interval_secs: default_refresh_interval_secs(),
            check_interval_secs: default_check_interval_secs(),
            discovery_hint: None,
            result_buffer: default_result_buffer(),
            credential_rotation: CredentialRotation::default(),
            probe: ProbeConfig::default(),
            source: SourceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl MonitorConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }

    /// Whether results are tagged with this instance's identity
    pub fn source_tagging(&self) -> bool {
        self.discovery_hint.is_some()
    }
}
