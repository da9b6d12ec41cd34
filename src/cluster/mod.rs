//! Minimal Kubernetes API access
//!
//! Just enough of the core/v1 API for this process: listing secrets and
//! pods in one namespace with the pod's service account.

mod client;
mod identity;
mod secrets;
mod types;


pub use client::ClusterClient;
pub use identity::{PodIdentityResolver, local_addresses, match_pod};
pub use secrets::{DOCKER_CFG_KEY, DOCKER_CONFIG_JSON_KEY, decode_secret, registries_from_secrets};
pub use types::{List, ObjectMeta, Pod, PodIp, PodStatus, Secret};
