//! Error handling for the monitor
//!
//! This module defines the error type shared by every component. Only
//! startup-time errors ever reach the process exit path; steady-state
//! failures are turned into data by the component that detected them.

mod helpers;
mod types;

pub use types::{MonitorError, Result};
