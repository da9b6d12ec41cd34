//! Registry records and the desired set

use serde::Deserialize;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

/// The desired set: registry URL -> registry, as reported by a [`RegistrySource`].
///
/// [`RegistrySource`]: crate::core::traits::RegistrySource
pub type DesiredSet = BTreeMap<String, Registry>;

/// One credentialed check target.
///
/// The URL is the identity key; `name` only records which credential record
/// the entry came from.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Registry {
    name: String,
    url: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

impl Registry {
    /// Create a new registry record
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Name of the originating credential record
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registry host, also the identity key
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Whether `other` carries the same credentials as this record
    pub fn same_credentials(&self, other: &Registry) -> bool {
        self.username == other.username && self.password == other.password
    }
}

// Password stays out of logs.
impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Insert `registry` under its URL unless the URL is already present.
///
/// Returns `false` when an earlier record already claimed the URL and the
/// new one was dropped.
pub fn insert_first_wins(set: &mut DesiredSet, registry: Registry) -> bool {
    match set.entry(registry.url.clone()) {
        Entry::Vacant(slot) => {
            slot.insert(registry);
            true
        }
        Entry::Occupied(_) => false,
    }
}
