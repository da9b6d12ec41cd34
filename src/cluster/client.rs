//! Kubernetes REST client

use reqwest::{Certificate, Client, ClientBuilder};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::types::{List, Pod, Secret};
use crate::config::ClusterConfig;
use crate::utils::error::{MonitorError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
enum Token {
    None,
    Static(String),
    /// Re-read on every request; the kubelet rotates projected tokens.
    File(PathBuf),
}

/// Client for the core/v1 API of one cluster
#[derive(Debug, Clone)]
pub struct ClusterClient {
    http: Client,
    base: Url,
    token: Token,
}

impl ClusterClient {
    /// Build a client from configuration, falling back to the in-cluster
    /// service account environment for anything not set explicitly.
    pub async fn from_config(config: &ClusterConfig) -> Result<Self> {
        let explicit_server = config.api_server.is_some();
        let base = match &config.api_server {
            Some(server) => Url::parse(server)?,
            None => in_cluster_server()?,
        };

        let mut builder = ClientBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(config.insecure_skip_verify);

        let ca_path = Path::new(&config.ca_path);
        if tokio::fs::try_exists(ca_path).await.unwrap_or(false) {
            let pem = tokio::fs::read(ca_path).await?;
            let certificate = Certificate::from_pem(&pem)
                .map_err(|e| MonitorError::cluster(format!("Invalid cluster CA bundle: {}", e)))?;
            builder = builder.add_root_certificate(certificate);
        }

        let token_path = PathBuf::from(&config.token_path);
        let token = if tokio::fs::try_exists(&token_path).await.unwrap_or(false) {
            Token::File(token_path)
        } else if explicit_server {
            Token::None
        } else {
            return Err(MonitorError::cluster(format!(
                "Service account token not found at {}",
                config.token_path
            )));
        };

        info!(api_server = %base, "Using Kubernetes API server");
        Ok(Self {
            http: builder.build()?,
            base,
            token,
        })
    }

    /// Client for `base` authenticating with a fixed bearer token
    pub fn new(base: Url, token: Option<String>) -> Result<Self> {
        Ok(Self {
            http: ClientBuilder::new().timeout(REQUEST_TIMEOUT).build()?,
            base,
            token: token.map(Token::Static).unwrap_or(Token::None),
        })
    }

    async fn bearer(&self) -> Result<Option<String>> {
        match &self.token {
            Token::None => Ok(None),
            Token::Static(token) => Ok(Some(token.clone())),
            Token::File(path) => {
                let token = tokio::fs::read_to_string(path).await?;
                Ok(Some(token.trim().to_string()))
            }
        }
    }

    /// GET `path` and decode the JSON response
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.base.join(path)?;
        debug!(url = %url, "cluster request");

        let mut request = self.http.get(url).query(query);
        if let Some(token) = self.bearer().await? {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MonitorError::cluster(format!("GET {} failed: {}", path, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MonitorError::cluster(format!(
                "GET {}: HTTP {}: {}",
                path,
                status,
                body.trim()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| MonitorError::cluster(format!("GET {}: reading body: {}", path, e)))?;
        serde_json::from_slice(&body)
            .map_err(|e| MonitorError::cluster(format!("GET {}: decoding body: {}", path, e)))
    }

    /// List all secrets in `namespace`
    pub async fn list_secrets(&self, namespace: &str) -> Result<Vec<Secret>> {
        let path = format!("/api/v1/namespaces/{}/secrets", namespace);
        let list: List<Secret> = self.get_json(&path, &[]).await?;
        Ok(list.items)
    }

    /// List pods in `namespace`, optionally filtered by a label selector
    pub async fn list_pods(&self, namespace: &str, label_selector: Option<&str>) -> Result<Vec<Pod>> {
        let path = format!("/api/v1/namespaces/{}/pods", namespace);
        let query: Vec<(&str, &str)> = label_selector
            .map(|selector| vec![("labelSelector", selector)])
            .unwrap_or_default();
        let list: List<Pod> = self.get_json(&path, &query).await?;
        Ok(list.items)
    }
}

fn in_cluster_server() -> Result<Url> {
    let host = std::env::var("KUBERNETES_SERVICE_HOST").map_err(|_| {
        MonitorError::cluster("KUBERNETES_SERVICE_HOST is not set; not running in a cluster")
    })?;
    let port = std::env::var("KUBERNETES_SERVICE_PORT").unwrap_or_else(|_| "443".to_string());

    let host = if host.contains(':') {
        format!("[{}]", host)
    } else {
        host
    };
    Ok(Url::parse(&format!("https://{}:{}", host, port))?)
}
