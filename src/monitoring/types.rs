//! Reconciler settings and reporting types

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::MonitorConfig;

/// How a credential change under an unchanged URL is handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CredentialRotation {
    /// Keep probing with the credentials seen when the checker started
    #[default]
    Ignore,
    /// Hand the new credentials to the running checker for its next cycle
    Apply,
}

/// Scalar settings the reconciler is started with
#[derive(Debug, Clone)]
pub struct ReconcilerSettings {
    /// Namespace queried for registry records
    pub namespace: String,
    /// Desired-set re-poll period
    pub refresh_interval: Duration,
    /// Per-registry probe period
    pub check_interval: Duration,
    /// Discovery hint handed to the identity resolver
    pub discovery_hint: Option<String>,
    pub credential_rotation: CredentialRotation,
}

impl From<&MonitorConfig> for ReconcilerSettings {
    fn from(config: &MonitorConfig) -> Self {
        Self {
            namespace: config.namespace.clone(),
            refresh_interval: config.refresh_interval(),
            check_interval: config.check_interval(),
            discovery_hint: config.discovery_hint.clone(),
            credential_rotation: config.credential_rotation,
        }
    }
}

/// What one reconciliation pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// URLs a checker was started for
    pub started: Vec<String>,
    /// URLs whose checker was stopped
    pub stopped: Vec<String>,
    /// URLs whose running checker received rotated credentials
    pub rotated: Vec<String>,
    /// Desired URLs not started yet because their previous checker is still stopping
    pub deferred: Vec<String>,
}

impl ReconcileReport {
    pub fn is_empty(&self) -> bool {
        self.started.is_empty()
            && self.stopped.is_empty()
            && self.rotated.is_empty()
            && self.deferred.is_empty()
    }
}
