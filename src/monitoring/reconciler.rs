//! Reconciliation loop
//!
//! The reconciler periodically re-reads the desired registry set and
//! converges the live-checker map onto it. It is the only owner and the
//! only writer of that map.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::checker::CheckerHandle;
use super::types::{CredentialRotation, ReconcileReport, ReconcilerSettings};
use crate::core::traits::{IdentityResolver, Prober, RegistrySource};
use crate::core::types::{CheckResult, DesiredSet, Identity};
use crate::utils::error::Result;

/// Keeps one checker running per registry in the desired set
pub struct Reconciler {
    source: Arc<dyn RegistrySource>,
    prober: Arc<dyn Prober>,
    identity_resolver: Option<Arc<dyn IdentityResolver>>,
    output: mpsc::Sender<CheckResult>,
    settings: ReconcilerSettings,
    identity: Option<Arc<Identity>>,
    /// Live checkers keyed by registry URL
    checkers: HashMap<String, CheckerHandle>,
    /// Stopped checkers whose last cycle may still be in flight
    stopping: HashMap<String, JoinHandle<()>>,
}

impl Reconciler {
    /// Create a reconciler publishing results on `output`
    pub fn new(
        source: Arc<dyn RegistrySource>,
        prober: Arc<dyn Prober>,
        output: mpsc::Sender<CheckResult>,
        settings: ReconcilerSettings,
    ) -> Self {
        Self {
            source,
            prober,
            identity_resolver: None,
            output,
            settings,
            identity: None,
            checkers: HashMap::new(),
            stopping: HashMap::new(),
        }
    }

    /// Enable source tagging: results carry the identity resolved at startup
    pub fn with_identity_resolver(mut self, resolver: Arc<dyn IdentityResolver>) -> Self {
        self.identity_resolver = Some(resolver);
        self
    }

    /// Identity results are tagged with, once resolved
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_deref()
    }

    /// URLs with a live checker, sorted
    pub fn live_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.checkers.keys().cloned().collect();
        urls.sort();
        urls
    }

    /// Number of live checkers
    pub fn live_count(&self) -> usize {
        self.checkers.len()
    }

    /// Run for the lifetime of the process.
    ///
    /// Only returns if self identity resolution fails at startup.
    pub async fn run(mut self) -> Result<()> {
        self.resolve_identity().await?;

        info!(
            namespace = %self.settings.namespace,
            refresh_interval_secs = self.settings.refresh_interval.as_secs(),
            check_interval_secs = self.settings.check_interval.as_secs(),
            "Starting registry reconciler"
        );

        let mut interval = tokio::time::interval(self.settings.refresh_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            if let Err(e) = self.reconcile_once().await {
                warn!(
                    namespace = %self.settings.namespace,
                    "Failed to list registries, keeping {} running checkers: {}",
                    self.checkers.len(),
                    e
                );
            }
        }
    }

    /// Resolve this process's identity if source tagging is enabled
    pub async fn resolve_identity(&mut self) -> Result<()> {
        if let Some(resolver) = &self.identity_resolver {
            let identity = resolver
                .resolve_self_identity(
                    &self.settings.namespace,
                    self.settings.discovery_hint.as_deref(),
                )
                .await?;
            info!(pod = %identity.pod_name, ip = %identity.pod_ip, "Resolved self identity");
            self.identity = Some(Arc::new(identity));
        }
        Ok(())
    }

    /// One reconciliation pass: fetch the desired set and converge onto it.
    ///
    /// A source error leaves the live checkers untouched.
    pub async fn reconcile_once(&mut self) -> Result<ReconcileReport> {
        let desired = self
            .source
            .list_registries(&self.settings.namespace)
            .await?;
        Ok(self.apply(desired))
    }

    fn apply(&mut self, desired: DesiredSet) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        self.stopping.retain(|_, task| !task.is_finished());

        // Start phase runs first so a live entry is never briefly missing.
        let mut retained = Vec::with_capacity(desired.len());
        for (url, registry) in desired {
            match self.checkers.get(&url) {
                // The previous checker for this URL is finishing its last cycle.
                None if self.stopping.contains_key(&url) => {
                    debug!(url = %url, "previous checker still stopping, deferring start");
                    report.deferred.push(url.clone());
                }
                None => {
                    info!(
                        name = %registry.name(),
                        url = %url,
                        user = %registry.username(),
                        "added registry check"
                    );
                    let handle = CheckerHandle::spawn(
                        registry,
                        self.settings.check_interval,
                        self.output.clone(),
                        self.identity.clone(),
                        self.prober.clone(),
                    );
                    self.checkers.insert(url.clone(), handle);
                    report.started.push(url.clone());
                }
                Some(handle) => {
                    if self.settings.credential_rotation == CredentialRotation::Apply
                        && !handle.registry().same_credentials(&registry)
                    {
                        info!(url = %url, user = %registry.username(), "applying rotated credentials");
                        handle.update_registry(registry);
                        report.rotated.push(url.clone());
                    }
                }
            }
            retained.push(url);
        }

        let mut outdated: Vec<String> = self
            .checkers
            .keys()
            .filter(|url| retained.binary_search(*url).is_err())
            .cloned()
            .collect();
        outdated.sort();

        for url in outdated {
            if let Some(handle) = self.checkers.remove(&url) {
                info!(url = %url, "deleted registry check");
                let task = handle.stop();
                if !task.is_finished() {
                    self.stopping.insert(url.clone(), task);
                }
                report.stopped.push(url);
            }
        }

        if report.is_empty() {
            debug!(live = self.checkers.len(), "registry set unchanged");
        }

        report
    }
}
