//! Common test utilities for registry-monitor

pub mod assertions;
pub mod fixtures;

pub use assertions::{collect_for, urls_seen};
pub use fixtures::{MockCluster, MockRegistry, RegistryFileFixture, fast_settings, http_prober};
