//! Registry monitoring engine
//!
//! This module holds the reconciliation loop, the per-registry checker
//! tasks and the result stream plumbing between them and the sink.
//!
//! ## Data flow
//!
//! ```text
//! RegistrySource -> Reconciler -> {spawn/stop} Checker(s) -> mpsc stream -> ResultSink
//! ```

mod checker;
mod reconciler;
mod sink;
mod types;


// Re-export public types
pub use checker::CheckerHandle;
pub use reconciler::Reconciler;
pub use sink::{JsonLinesSink, drain, result_stream};
pub use types::{CredentialRotation, ReconcileReport, ReconcilerSettings};
