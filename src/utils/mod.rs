//! Utility modules for the monitor
//!
//! - **error**: Error handling
//! - **logging**: Logging setup

pub mod error; // Error handling
pub mod logging; // Logging & monitoring

pub use error::{MonitorError, Result};
pub use logging::init_logging;
