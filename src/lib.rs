//! # registry-monitor
//!
//! A sidecar that keeps exactly one health checker running per container
//! registry found in the cluster's docker config secrets, and streams every
//! check outcome as one JSON line on standard output.
//!
//! ## Features
//!
//! - **Self-reconciling**: the registry set is re-read periodically and
//!   checkers are started and stopped to match it
//! - **Fail-soft**: an unreachable cluster API keeps the running checkers
//!   alive, and a failed probe is a result rather than an error
//! - **Source tagging**: with a discovery hint, results name the pod that
//!   produced them
//!
//! ## Usage
//!
//! ```rust,no_run
//! use registry_monitor::{Config, Monitor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/registry-monitor.yaml").await?;
//!     let monitor = Monitor::from_config(config).await?;
//!     monitor.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod cli;
pub mod cluster;
pub mod config;
pub mod core;
pub mod monitoring;
pub mod probe;
pub mod source;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::traits::{IdentityResolver, Prober, RegistrySource, ResultSink};
pub use core::types::{CheckResult, DesiredSet, Identity, Registry};
pub use monitoring::{CheckerHandle, CredentialRotation, JsonLinesSink, Reconciler};
pub use utils::error::{MonitorError, Result};

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use cluster::{ClusterClient, PodIdentityResolver};
use config::SourceKind;
use monitoring::{ReconcilerSettings, drain, result_stream};
use probe::RegistryProber;
use source::{FileSource, KubeSecretSource};

/// The assembled monitor: a reconciler and the collaborators it drives
pub struct Monitor {
    config: Config,
    source: Arc<dyn RegistrySource>,
    prober: Arc<dyn Prober>,
    identity_resolver: Option<Arc<dyn IdentityResolver>>,
}

impl Monitor {
    /// Build the monitor from configuration
    pub async fn from_config(config: Config) -> Result<Self> {
        info!("Creating new monitor instance");
        let monitor = config.monitor();

        let needs_cluster =
            monitor.source.kind == SourceKind::Kubernetes || monitor.source_tagging();
        let cluster = if needs_cluster {
            Some(ClusterClient::from_config(&monitor.source.cluster).await?)
        } else {
            None
        };

        let source: Arc<dyn RegistrySource> = match monitor.source.kind {
            SourceKind::Kubernetes => {
                let Some(client) = cluster.clone() else {
                    return Err(MonitorError::config("cluster client is required"));
                };
                Arc::new(KubeSecretSource::new(client))
            }
            SourceKind::File => {
                let Some(path) = &monitor.source.path else {
                    return Err(MonitorError::config("source.path is required for the file source"));
                };
                Arc::new(FileSource::new(path))
            }
        };

        let identity_resolver: Option<Arc<dyn IdentityResolver>> = match cluster {
            Some(client) if monitor.source_tagging() => {
                Some(Arc::new(PodIdentityResolver::new(client)))
            }
            _ => None,
        };

        let prober = Arc::new(RegistryProber::new(&monitor.probe)?);

        Ok(Self::with_parts(config, source, prober, identity_resolver))
    }

    /// Assemble a monitor from explicit collaborators
    pub fn with_parts(
        config: Config,
        source: Arc<dyn RegistrySource>,
        prober: Arc<dyn Prober>,
        identity_resolver: Option<Arc<dyn IdentityResolver>>,
    ) -> Self {
        Self {
            config,
            source,
            prober,
            identity_resolver,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Spawn the reconciler and hand back its task and the result stream
    pub fn start(self) -> (JoinHandle<Result<()>>, mpsc::Receiver<CheckResult>) {
        let monitor = self.config.monitor();
        let (tx, rx) = result_stream(monitor.result_buffer);

        let mut reconciler = Reconciler::new(
            self.source,
            self.prober,
            tx,
            ReconcilerSettings::from(monitor),
        );
        if let Some(resolver) = self.identity_resolver {
            reconciler = reconciler.with_identity_resolver(resolver);
        }

        (tokio::spawn(reconciler.run()), rx)
    }

    /// Run until Ctrl-C, writing results to standard output.
    ///
    /// Returns an error only when the reconciler cannot start.
    pub async fn run(self) -> Result<()> {
        info!("Starting registry monitor");
        let (reconciler, results) = self.start();
        let mut sink = JsonLinesSink::stdout();

        tokio::select! {
            outcome = reconciler => match outcome {
                Ok(result) => result,
                Err(e) => Err(MonitorError::internal(format!("reconciler task failed: {}", e))),
            },
            emitted = drain(results, &mut sink) => {
                info!(emitted, "result stream closed");
                Ok(())
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                info!("Shutdown signal received");
                Ok(())
            }
        }
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp (seconds since the epoch)
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
