//! Resolving which pod this process runs in
//!
//! The candidate pods are listed from the API server and intersected with
//! the addresses of the local network interfaces.

use async_trait::async_trait;
use std::collections::HashSet;
use std::net::IpAddr;
use tracing::debug;

use super::client::ClusterClient;
use super::types::Pod;
use crate::core::traits::IdentityResolver;
use crate::core::types::Identity;
use crate::utils::error::{MonitorError, Result};

/// Identity resolver backed by the pod list of the cluster
#[derive(Debug, Clone)]
pub struct PodIdentityResolver {
    client: ClusterClient,
}

impl PodIdentityResolver {
    pub fn new(client: ClusterClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityResolver for PodIdentityResolver {
    async fn resolve_self_identity(
        &self,
        namespace: &str,
        discovery_hint: Option<&str>,
    ) -> Result<Identity> {
        let pods = self
            .client
            .list_pods(namespace, discovery_hint)
            .await
            .map_err(|e| MonitorError::identity(format!("Failed to list pods: {}", e)))?;
        let local = local_addresses()?;
        debug!(candidates = pods.len(), local = ?local, "matching pods against local addresses");

        match_pod(&pods, &local).ok_or_else(|| {
            MonitorError::identity(format!(
                "none of {} pods in '{}' (selector {:?}) owns a local address",
                pods.len(),
                namespace,
                discovery_hint
            ))
        })
    }
}

/// Non-loopback addresses of the local network interfaces
pub fn local_addresses() -> Result<HashSet<IpAddr>> {
    let interfaces = if_addrs::get_if_addrs()
        .map_err(|e| MonitorError::identity(format!("Failed to list interfaces: {}", e)))?;

    Ok(interfaces
        .into_iter()
        .filter(|iface| !iface.is_loopback())
        .map(|iface| iface.ip())
        .collect())
}

/// First pod with an address in `local`
pub fn match_pod(pods: &[Pod], local: &HashSet<IpAddr>) -> Option<Identity> {
    pods.iter().find_map(|pod| {
        pod.addresses()
            .filter_map(|addr| addr.parse::<IpAddr>().ok())
            .find(|ip| local.contains(ip))
            .map(|ip| Identity::new(pod.metadata.name.clone(), ip))
    })
}
