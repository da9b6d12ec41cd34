//! Integration tests for registry-monitor
//!
//! These tests drive the reconciler with real sources and the real prober
//! against local mock servers.

pub mod cluster_source_tests;
pub mod file_source_tests;
pub mod monitor_tests;
