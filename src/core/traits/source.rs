//! Desired-set discovery interface

use async_trait::async_trait;

use crate::core::types::DesiredSet;
use crate::utils::error::Result;

/// Source of the desired registry set
///
/// Implementations fail atomically: they return either the complete set or
/// an error, never a silently truncated set. Malformed individual records
/// are skipped, and when two records expose the same URL the first one
/// encountered wins.
#[async_trait]
pub trait RegistrySource: Send + Sync {
    /// List the registries currently configured in `namespace`
    async fn list_registries(&self, namespace: &str) -> Result<DesiredSet>;
}
