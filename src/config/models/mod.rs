//! Configuration data models
//!
//! This module defines all configuration structures used by the monitor.

#![allow(missing_docs)]

pub mod logging;
pub mod monitor;
pub mod probe;
pub mod source;

// Re-export all configuration types
pub use logging::*;
pub use monitor::*;
pub use probe::*;
pub use source::*;

/// Namespace searched for registry secrets
pub fn default_namespace() -> String {
    "monitoring".to_string()
}

/// Seconds between desired-set refreshes
pub fn default_refresh_interval_secs() -> u64 {
    30
}

/// Seconds between probes of one registry
pub fn default_check_interval_secs() -> u64 {
    3
}

/// Pending results the output stream holds before checkers wait
pub fn default_result_buffer() -> usize {
    16
}

/// Probe timeout in seconds
pub fn default_probe_timeout_secs() -> u64 {
    10
}

pub fn default_scheme() -> String {
    "https".to_string()
}

pub fn default_token_path() -> String {
    "/var/run/secrets/kubernetes.io/serviceaccount/token".to_string()
}

pub fn default_ca_path() -> String {
    "/var/run/secrets/kubernetes.io/serviceaccount/ca.crt".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}
