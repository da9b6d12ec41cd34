//! Core error type definitions

use thiserror::Error;

/// Result type alias for the monitor
pub type Result<T> = std::result::Result<T, MonitorError>;

/// Main error type for the monitor
#[derive(Error, Debug)]
pub enum MonitorError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Kubernetes API errors
    #[error("Cluster API error: {0}")]
    Cluster(String),

    /// Self identity resolution errors
    #[error("Identity resolution error: {0}")]
    Identity(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Base64 decoding errors
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// URL parsing errors
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Errors reported by a registry in its response body
    #[error("Registry error: {0}")]
    Registry(String),

    /// Network errors
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing errors
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Result sink errors
    #[error("Sink error: {0}")]
    Sink(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
