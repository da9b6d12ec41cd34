//! Command-line interface
//!
//! Every flag can also be supplied through the environment, which is how
//! the sidecar is usually configured inside a pod spec.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, LogFormat, MonitorConfig, SourceKind};
use crate::monitoring::CredentialRotation;
use crate::utils::error::Result;

/// Continuously health-check the container registries configured in cluster secrets
#[derive(Debug, Parser)]
#[command(name = "registry-monitor", version, about)]
pub struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "REGISTRY_MONITOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Namespace searched for registry secrets
    #[arg(long, env = "REGISTRY_MONITOR_NAMESPACE")]
    pub namespace: Option<String>,

    /// Seconds between asking the cluster for the registry configuration
    #[arg(long, env = "REGISTRY_MONITOR_UPDATE_CONFIG_INTERVAL_SEC")]
    pub update_config_interval_sec: Option<u64>,

    /// Seconds between checks of one registry
    #[arg(long, env = "REGISTRY_MONITOR_CHECK_INTERVAL_SEC")]
    pub check_interval_sec: Option<u64>,

    /// Pod label selector used to find this instance; enables source tagging
    #[arg(long, env = "REGISTRY_MONITOR_DISCOVERY_HINT")]
    pub discovery_hint: Option<String>,

    /// Skip registry TLS certificate verification
    #[arg(long, env = "REGISTRY_MONITOR_INSECURE")]
    pub insecure: bool,

    /// Read registries from this YAML file instead of cluster secrets
    #[arg(long, env = "REGISTRY_MONITOR_SOURCE_FILE")]
    pub source_file: Option<PathBuf>,

    /// How rotated credentials under an unchanged URL are handled
    #[arg(long, value_enum, env = "REGISTRY_MONITOR_CREDENTIAL_ROTATION")]
    pub credential_rotation: Option<CredentialRotation>,

    /// Log filter directive (RUST_LOG takes precedence)
    #[arg(long, env = "REGISTRY_MONITOR_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log line format
    #[arg(long, value_enum, env = "REGISTRY_MONITOR_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Build the effective configuration: defaults, then the file, then flags
    pub async fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path).await?,
            None => Config::default(),
        };

        self.apply(&mut config.monitor);
        config.validate()?;
        Ok(config)
    }

    /// Overlay explicitly given flags onto `monitor`
    pub fn apply(&self, monitor: &mut MonitorConfig) {
        if let Some(namespace) = &self.namespace {
            monitor.namespace = namespace.clone();
        }
        if let Some(secs) = self.update_config_interval_sec {
            monitor.refresh_interval_secs = secs;
        }
        if let Some(secs) = self.check_interval_sec {
            monitor.check_interval_secs = secs;
        }
        if let Some(hint) = &self.discovery_hint {
            monitor.discovery_hint = Some(hint.clone());
        }
        if self.insecure {
            monitor.probe.insecure_skip_verify = true;
        }
        if let Some(path) = &self.source_file {
            monitor.source.kind = SourceKind::File;
            monitor.source.path = Some(path.clone());
        }
        if let Some(rotation) = self.credential_rotation {
            monitor.credential_rotation = rotation;
        }
        if let Some(level) = &self.log_level {
            monitor.logging.level = level.clone();
        }
        if let Some(format) = self.log_format {
            monitor.logging.format = format;
        }
    }
}
