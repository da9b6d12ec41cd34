//! Core type definition module
//!
//! Contains the registry, result and identity records passed between components.

pub mod identity;
pub mod registry;
pub mod result;

// Re-export all public types
pub use identity::Identity;
pub use registry::{DesiredSet, Registry, insert_first_wins};
pub use result::CheckResult;
