//! Registry probing
//!
//! The HTTP prober checks a registry by listing its catalog through the
//! Docker Registry v2 API with the registry's credentials.

mod registry;


pub use registry::{RegistryProber, catalog_url, registry_errors};
