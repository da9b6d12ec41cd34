//! Registry source backed by cluster secrets

use async_trait::async_trait;
use tracing::debug;

use crate::cluster::{ClusterClient, registries_from_secrets};
use crate::core::traits::RegistrySource;
use crate::core::types::DesiredSet;
use crate::utils::error::Result;

/// Reads registries from the docker config secrets of a namespace
#[derive(Debug, Clone)]
pub struct KubeSecretSource {
    client: ClusterClient,
}

impl KubeSecretSource {
    pub fn new(client: ClusterClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RegistrySource for KubeSecretSource {
    async fn list_registries(&self, namespace: &str) -> Result<DesiredSet> {
        let secrets = self.client.list_secrets(namespace).await?;
        let registries = registries_from_secrets(&secrets);
        debug!(
            namespace = %namespace,
            secrets = secrets.len(),
            registries = registries.len(),
            "listed registries"
        );
        Ok(registries)
    }
}
