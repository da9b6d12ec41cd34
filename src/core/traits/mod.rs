//! Core traits module
//!
//! Abstract interfaces of the collaborators the reconciliation engine
//! depends on. The engine only ever sees these traits; the Kubernetes,
//! HTTP and stdout implementations live elsewhere.

pub mod identity;
pub mod prober;
pub mod sink;
pub mod source;

pub use identity::IdentityResolver;
pub use prober::Prober;
pub use sink::ResultSink;
pub use source::RegistrySource;
