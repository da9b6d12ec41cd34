//! Configuration validation
//!
//! - `trait_def`: Core Validate trait definition
//! - `monitor_validators`: validators for every monitor configuration section
//! - `tests`: Test suite for all validators

mod monitor_validators;
mod trait_def;

pub use monitor_validators::warn_insecure_config;
pub use trait_def::Validate;
