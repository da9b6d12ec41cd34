//! Identity of the running monitor instance

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

/// Which pod this process runs as, used to tag results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Pod name
    pub pod_name: String,
    /// Pod address that matched a local interface
    pub pod_ip: IpAddr,
}

impl Identity {
    pub fn new(pod_name: impl Into<String>, pod_ip: IpAddr) -> Self {
        Self {
            pod_name: pod_name.into(),
            pod_ip,
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pod_name)
    }
}
