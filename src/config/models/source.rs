//! Desired-set source configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the desired registry set comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Docker config secrets in the cluster
    #[default]
    Kubernetes,
    /// A YAML file re-read every refresh
    File,
}

/// Desired-set source configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,
    /// Registry file for the `file` source
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Cluster API access
    #[serde(default)]
    pub cluster: ClusterConfig,
}

/// Kubernetes API access configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// API server base URL; derived from the in-cluster environment when unset
    #[serde(default)]
    pub api_server: Option<String>,
    /// Service account token file
    #[serde(default = "default_token_path")]
    pub token_path: String,
    /// Cluster CA bundle
    #[serde(default = "default_ca_path")]
    pub ca_path: String,
    /// Skip API server certificate verification
    #[serde(default)]
    pub insecure_skip_verify: bool,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            api_server: None,
            token_path: default_token_path(),
            ca_path: default_ca_path(),
            insecure_skip_verify: false,
        }
    }
}
