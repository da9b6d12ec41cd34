//! Test fixtures
//!
//! Every fixture is backed by a real local server or file.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use registry_monitor::config::ProbeConfig;
use registry_monitor::monitoring::{CredentialRotation, ReconcilerSettings};
use registry_monitor::probe::RegistryProber;
use serde_json::{Map, Value, json};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A local registry answering the catalog endpoint
pub struct MockRegistry {
    pub server: MockServer,
}

impl MockRegistry {
    /// Registry that answers 200 with an empty catalog
    pub async fn healthy() -> Self {
        Self::with_status(200, r#"{"repositories":[]}"#).await
    }

    /// Registry that rejects every request with 401
    pub async fn unauthorized() -> Self {
        Self::with_status(
            401,
            r#"{"errors":[{"code":"UNAUTHORIZED","message":"authentication required"}]}"#,
        )
        .await
    }

    async fn with_status(status: u16, body: &str) -> Self {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/_catalog"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&server)
            .await;
        Self { server }
    }

    /// Registry entry as it appears in a secret: `host:port`
    pub fn host(&self) -> String {
        self.server.address().to_string()
    }
}

/// A local cluster API serving secrets and pods for one namespace
pub struct MockCluster {
    pub server: MockServer,
}

impl MockCluster {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn base_url(&self) -> Url {
        Url::parse(&self.server.uri()).unwrap()
    }

    /// Serve one `.dockerconfigjson` secret per `(name, host, user, pass)` entry
    pub async fn serve_secrets(&self, namespace: &str, entries: &[(&str, &str, &str, &str)]) {
        let items: Vec<Value> = entries
            .iter()
            .map(|(name, host, user, pass)| {
                let mut auths = Map::new();
                auths.insert(
                    host.to_string(),
                    json!({ "username": user, "password": pass }),
                );
                let payload = json!({ "auths": auths }).to_string();
                json!({
                    "metadata": { "name": name },
                    "type": "kubernetes.io/dockerconfigjson",
                    "data": { ".dockerconfigjson": STANDARD.encode(payload) }
                })
            })
            .collect();

        Mock::given(method("GET"))
            .and(path(format!("/api/v1/namespaces/{}/secrets", namespace)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
            .mount(&self.server)
            .await;
    }

    /// Serve a pod list in which `pod_name` owns `pod_ip`
    pub async fn serve_pod(&self, namespace: &str, pod_name: &str, pod_ip: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/namespaces/{}/pods", namespace)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{
                    "metadata": { "name": pod_name },
                    "status": { "podIP": pod_ip, "podIPs": [{ "ip": pod_ip }] }
                }]
            })))
            .mount(&self.server)
            .await;
    }
}

/// A registry list file that can be rewritten between reconcile passes
pub struct RegistryFileFixture {
    file: NamedTempFile,
}

impl RegistryFileFixture {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        let mut fixture = Self {
            file: NamedTempFile::new().unwrap(),
        };
        fixture.write(entries);
        fixture
    }

    /// Replace the file contents with `(name, url)` entries
    pub fn write(&mut self, entries: &[(&str, &str)]) {
        let yaml = if entries.is_empty() {
            String::from("registries: []\n")
        } else {
            let mut yaml = String::from("registries:\n");
            for (name, url) in entries {
                yaml.push_str(&format!(
                    "  - name: {}\n    url: \"{}\"\n    username: user\n    password: pass\n",
                    name, url
                ));
            }
            yaml
        };
        std::fs::write(self.file.path(), yaml).unwrap();
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Prober speaking plain HTTP to the mock registries
pub fn http_prober() -> Arc<RegistryProber> {
    let config = ProbeConfig {
        timeout_secs: 2,
        insecure_skip_verify: false,
        scheme: "http".to_string(),
    };
    Arc::new(RegistryProber::new(&config).unwrap())
}

/// Reconciler settings with millisecond periods
pub fn fast_settings(namespace: &str) -> ReconcilerSettings {
    ReconcilerSettings {
        namespace: namespace.to_string(),
        refresh_interval: Duration::from_millis(50),
        check_interval: Duration::from_millis(20),
        discovery_hint: None,
        credential_rotation: CredentialRotation::Ignore,
    }
}
