//! Self identity resolution interface

use async_trait::async_trait;

use crate::core::types::Identity;
use crate::utils::error::Result;

/// Resolves which instance the current process is
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve the identity of this process among the candidates selected by
    /// `discovery_hint` in `namespace`. Called once at startup.
    async fn resolve_self_identity(
        &self,
        namespace: &str,
        discovery_hint: Option<&str>,
    ) -> Result<Identity>;
}
