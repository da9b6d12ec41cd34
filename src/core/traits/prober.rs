//! Registry probe interface

use async_trait::async_trait;

use crate::core::types::CheckResult;

/// Performs one health check against a registry
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probe `url` with the given credentials.
    ///
    /// Every failure mode is reported as a result with `success == false`.
    /// Implementations bound the call with their own timeout.
    async fn probe(&self, url: &str, username: &str, password: &str) -> CheckResult;
}
