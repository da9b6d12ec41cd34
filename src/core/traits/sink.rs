//! Result consumer interface

use async_trait::async_trait;

use crate::core::types::CheckResult;
use crate::utils::error::Result;

/// Renders or forwards check results drained from the output stream
#[async_trait]
pub trait ResultSink: Send {
    async fn emit(&mut self, result: &CheckResult) -> Result<()>;
}
