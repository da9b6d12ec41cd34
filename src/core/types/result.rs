//! Probe outcome records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::identity::Identity;

/// One probe outcome, created fresh per cycle and consumed once by the sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Instance that ran the probe, when source tagging is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Registry the result is for
    pub url: String,
    /// Whether the probe succeeded
    pub success: bool,
    /// Response body on success, error description on failure
    pub message: String,
    /// When the probe finished
    pub checked_at: DateTime<Utc>,
    /// Probe duration
    #[serde(default)]
    pub response_time_ms: u64,
}

impl CheckResult {
    /// A successful probe
    pub fn success(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(url, true, message)
    }

    /// A failed probe
    pub fn failure(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(url, false, message)
    }

    fn new(url: impl Into<String>, success: bool, message: impl Into<String>) -> Self {
        Self {
            source: None,
            url: url.into(),
            success,
            message: message.into(),
            checked_at: Utc::now(),
            response_time_ms: 0,
        }
    }

    pub fn with_response_time(mut self, response_time_ms: u64) -> Self {
        self.response_time_ms = response_time_ms;
        self
    }

    /// Tag the result with the identity of the instance that produced it
    pub fn tagged(mut self, identity: Option<&Identity>) -> Self {
        self.source = identity.map(|id| id.to_string());
        self
    }
}
