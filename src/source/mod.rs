//! Desired-set sources
//!
//! - [`KubeSecretSource`]: docker config secrets of a namespace
//! - [`FileSource`]: a YAML registry list, for runs outside a cluster

mod file;
mod kube;

pub use file::{FileSource, RegistryFile};
pub use kube::KubeSecretSource;
