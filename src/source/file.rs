//! Registry source backed by a YAML file
//!
//! ```yaml
//! registries:
//!   - name: local
//!     url: registry.local:5000
//!     username: admin
//!     password: admin
//! ```

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::traits::RegistrySource;
use crate::core::types::{DesiredSet, Registry, insert_first_wins};
use crate::utils::error::Result;

/// File layout
#[derive(Debug, Deserialize)]
pub struct RegistryFile {
    #[serde(default)]
    pub registries: Vec<Registry>,
}

/// Re-reads a registry file on every refresh
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RegistrySource for FileSource {
    async fn list_registries(&self, _namespace: &str) -> Result<DesiredSet> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            std::io::Error::new(e.kind(), format!("registry file {:?}: {}", self.path, e))
        })?;
        let file: RegistryFile = serde_yaml::from_str(&content)?;

        let mut registries = DesiredSet::new();
        for registry in file.registries {
            let url = registry.url().to_string();
            if !insert_first_wins(&mut registries, registry) {
                debug!(url = %url, "duplicate registry entry ignored");
            }
        }
        Ok(registries)
    }
}
