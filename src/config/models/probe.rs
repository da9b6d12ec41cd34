//! Registry probe configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Registry probe configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Timeout for one probe in seconds
    #[serde(default = "default_probe_timeout_secs")]
    pub timeout_secs: u64,
    /// Skip TLS certificate verification (self-signed registries)
    #[serde(default)]
    pub insecure_skip_verify: bool,
    /// Scheme used for registry entries that carry none
    #[serde(default = "default_scheme")]
    pub scheme: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_probe_timeout_secs(),
            insecure_skip_verify: false,
            scheme: default_scheme(),
        }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
