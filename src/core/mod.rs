//! Core functionality for the monitor
//!
//! This module contains the shared data structures and the abstract
//! interfaces of the external collaborators the engine talks to.

pub mod traits;
pub mod types;
