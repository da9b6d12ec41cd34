//! Docker Registry v2 catalog prober

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use std::time::Instant;
use tracing::debug;
use url::Url;

use crate::config::ProbeConfig;
use crate::core::traits::Prober;
use crate::core::types::CheckResult;
use crate::utils::error::{MonitorError, Result};

const CATALOG_PATH: &str = "/v2/_catalog";

/// Probes registries over HTTP(S) with basic authentication
#[derive(Debug, Clone)]
pub struct RegistryProber {
    client: Client,
    scheme: String,
}

impl RegistryProber {
    /// Build a prober from its configuration
    pub fn new(config: &ProbeConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(config.timeout())
            .danger_accept_invalid_certs(config.insecure_skip_verify)
            .user_agent(concat!("registry-monitor/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            scheme: config.scheme.clone(),
        })
    }

    async fn check(&self, url: &str, username: &str, password: &str) -> Result<String> {
        let endpoint = catalog_url(url, &self.scheme)?;
        debug!(endpoint = %endpoint, user = %username, "http request");

        let mut request = self.client.get(endpoint);
        if !username.is_empty() || !password.is_empty() {
            request = request.basic_auth(username, Some(password));
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(MonitorError::network(format!("HTTP {}: {}", status, body.trim())));
        }

        if let Some(errors) = registry_errors(&body) {
            return Err(MonitorError::registry(errors));
        }

        Ok(body)
    }
}

#[async_trait]
impl Prober for RegistryProber {
    async fn probe(&self, url: &str, username: &str, password: &str) -> CheckResult {
        let start_time = Instant::now();
        let outcome = self.check(url, username, password).await;
        let response_time_ms = start_time.elapsed().as_millis() as u64;

        match outcome {
            Ok(body) => CheckResult::success(url, body),
            Err(e) => CheckResult::failure(url, e.to_string()),
        }
        .with_response_time(response_time_ms)
    }
}

/// Catalog endpoint for a registry entry.
///
/// Entries are usually a bare `host[:port]`; entries that already carry a
/// scheme or a path (`https://index.docker.io/v1/`) are reduced to their origin.
pub fn catalog_url(registry: &str, default_scheme: &str) -> Result<Url> {
    let registry = registry.trim();
    let mut url = if registry.contains("://") {
        Url::parse(registry)?
    } else {
        Url::parse(&format!("{}://{}", default_scheme, registry))?
    };

    if url.host_str().is_none() {
        return Err(MonitorError::validation(format!(
            "Registry entry '{}' has no host",
            registry
        )));
    }

    url.set_path(CATALOG_PATH);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<RegistryError>,
}

#[derive(Debug, Deserialize)]
struct RegistryError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Errors listed in a registry response body, joined into one message.
///
/// Returns `None` when the body is not JSON or its error list is empty.
pub fn registry_errors(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    if parsed.errors.is_empty() {
        return None;
    }

    let joined = parsed
        .errors
        .iter()
        .map(|e| match (e.code.is_empty(), e.message.is_empty()) {
            (false, false) => format!("{}: {}", e.code, e.message),
            (false, true) => e.code.clone(),
            _ => e.message.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ");
    Some(joined)
}
