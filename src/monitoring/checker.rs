//! Per-registry checker task
//!
//! A checker probes one registry, publishes the outcome on the shared
//! result stream, sleeps for the check interval and repeats until its stop
//! signal is raised. Stopping is cooperative: an in-flight probe is never
//! interrupted.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot::error::TryRecvError;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::core::traits::Prober;
use crate::core::types::{CheckResult, Identity, Registry};

/// Lifecycle handle for one running checker.
///
/// Owned by the reconciler. Raising the stop signal consumes the handle, so
/// it can only ever be raised once; dropping the handle stops the checker too.
#[derive(Debug)]
pub struct CheckerHandle {
    url: String,
    registry: watch::Sender<Arc<Registry>>,
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl CheckerHandle {
    /// Spawn a checker for `registry` on the current runtime
    pub fn spawn(
        registry: Registry,
        interval: Duration,
        output: mpsc::Sender<CheckResult>,
        identity: Option<Arc<Identity>>,
        prober: Arc<dyn Prober>,
    ) -> Self {
        let url = registry.url().to_string();
        let (registry_tx, registry_rx) = watch::channel(Arc::new(registry));
        let (stop_tx, stop_rx) = oneshot::channel();

        let checker = Checker {
            registry: registry_rx,
            interval,
            output,
            identity,
            prober,
            stop: stop_rx,
        };
        let task = tokio::spawn(checker.run());

        Self {
            url,
            registry: registry_tx,
            stop: stop_tx,
            task,
        }
    }

    /// URL of the registry this checker probes
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Registry record the checker will use for its next probe
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.borrow().clone()
    }

    /// Replace the registry record used from the next cycle on
    pub fn update_registry(&self, registry: Registry) {
        self.registry.send_replace(Arc::new(registry));
    }

    /// Whether the task has already exited
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Raise the stop signal.
    ///
    /// Returns the task handle so callers that care can wait for the
    /// in-flight cycle to complete.
    pub fn stop(self) -> JoinHandle<()> {
        // The task may already be gone (result stream closed); nothing to signal then.
        let _ = self.stop.send(());
        self.task
    }
}

struct Checker {
    registry: watch::Receiver<Arc<Registry>>,
    interval: Duration,
    output: mpsc::Sender<CheckResult>,
    identity: Option<Arc<Identity>>,
    prober: Arc<dyn Prober>,
    stop: oneshot::Receiver<()>,
}

impl Checker {
    async fn run(mut self) {
        let name = self.registry.borrow().name().to_string();

        loop {
            match self.stop.try_recv() {
                Err(TryRecvError::Empty) => {}
                // Raised, or the handle was dropped.
                _ => break,
            }

            let registry = self.registry.borrow_and_update().clone();
            let result = self
                .prober
                .probe(registry.url(), registry.username(), registry.password())
                .await
                .tagged(self.identity.as_deref());

            debug!(
                url = %result.url,
                success = result.success,
                response_time_ms = result.response_time_ms,
                "registry probed"
            );

            if self.output.send(result).await.is_err() {
                warn!(url = %registry.url(), "result stream closed, stopping checker");
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = &mut self.stop => break,
            }
        }

        info!(name = %name, "registry checker has finished");
    }
}
