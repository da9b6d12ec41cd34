//! Decoding docker config secrets into registry records

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::types::Secret;
use crate::core::types::{DesiredSet, Registry, insert_first_wins};
use crate::utils::error::{MonitorError, Result};

/// Data key of `kubernetes.io/dockerconfigjson` secrets
pub const DOCKER_CONFIG_JSON_KEY: &str = ".dockerconfigjson";
/// Data key of legacy `kubernetes.io/dockercfg` secrets
pub const DOCKER_CFG_KEY: &str = ".dockercfg";

#[derive(Debug, Deserialize)]
struct DockerConfigJson {
    #[serde(default)]
    auths: BTreeMap<String, DockerAuth>,
}

#[derive(Debug, Default, Deserialize)]
struct DockerAuth {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
    /// base64("username:password")
    #[serde(default)]
    auth: Option<String>,
}

impl DockerAuth {
    fn credentials(&self) -> Result<(String, String)> {
        let username = self.username.clone().unwrap_or_default();
        let password = self.password.clone().unwrap_or_default();
        if !username.is_empty() || !password.is_empty() {
            return Ok((username, password));
        }

        match self.auth.as_deref().filter(|a| !a.is_empty()) {
            Some(auth) => {
                let decoded = String::from_utf8(STANDARD.decode(auth.trim())?)
                    .map_err(|e| MonitorError::parsing(format!("auth is not UTF-8: {}", e)))?;
                let (username, password) = decoded
                    .split_once(':')
                    .ok_or_else(|| MonitorError::parsing("auth is not 'username:password'"))?;
                Ok((username.to_string(), password.to_string()))
            }
            None => Ok((username, password)),
        }
    }
}

/// Registries described by one secret.
///
/// Returns `Ok(None)` for secrets that hold no docker configuration and an
/// error for secrets whose configuration cannot be decoded as a whole. An
/// entry with undecodable credentials is logged and skipped on its own.
pub fn decode_secret(secret: &Secret) -> Result<Option<Vec<Registry>>> {
    let Some(data) = secret.data.as_ref() else {
        return Ok(None);
    };

    let auths = if let Some(encoded) = data.get(DOCKER_CONFIG_JSON_KEY) {
        let raw = STANDARD.decode(encoded.trim())?;
        serde_json::from_slice::<DockerConfigJson>(&raw)?.auths
    } else if let Some(encoded) = data.get(DOCKER_CFG_KEY) {
        let raw = STANDARD.decode(encoded.trim())?;
        serde_json::from_slice::<BTreeMap<String, DockerAuth>>(&raw)?
    } else {
        return Ok(None);
    };

    let name = &secret.metadata.name;
    let mut registries = Vec::with_capacity(auths.len());
    for (url, auth) in auths {
        match auth.credentials() {
            Ok((username, password)) => {
                registries.push(Registry::new(name.clone(), url, username, password));
            }
            Err(e) => warn!(secret = %name, url = %url, "Skipping registry entry: {}", e),
        }
    }
    Ok(Some(registries))
}

/// Desired set described by `secrets`, in list order.
///
/// Malformed secrets are logged and skipped; for a URL exposed by more than
/// one secret the first one wins.
pub fn registries_from_secrets(secrets: &[Secret]) -> DesiredSet {
    let mut registries = DesiredSet::new();

    for secret in secrets {
        let name = &secret.metadata.name;
        match decode_secret(secret) {
            Ok(Some(found)) => {
                for registry in found {
                    let url = registry.url().to_string();
                    if !insert_first_wins(&mut registries, registry) {
                        debug!(secret = %name, url = %url, "registry already provided by an earlier secret, ignoring");
                    }
                }
            }
            Ok(None) => {}
            Err(e) => warn!(secret = %name, "Skipping secret, decoding error: {}", e),
        }
    }

    registries
}
