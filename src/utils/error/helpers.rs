//! Helper functions for creating specific error types

use super::types::MonitorError;

/// Helper functions for creating specific errors
impl MonitorError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn cluster<S: Into<String>>(message: S) -> Self {
        Self::Cluster(message.into())
    }

    pub fn identity<S: Into<String>>(message: S) -> Self {
        Self::Identity(message.into())
    }

    pub fn registry<S: Into<String>>(message: S) -> Self {
        Self::Registry(message.into())
    }

    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    pub fn parsing<S: Into<String>>(message: S) -> Self {
        Self::Parsing(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn sink<S: Into<String>>(message: S) -> Self {
        Self::Sink(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Whether this error can only have come from process startup and
    /// should end the process rather than be retried on the next cycle.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MonitorError::Config(_) | MonitorError::Identity(_) | MonitorError::Validation(_)
        )
    }

    /// Process exit status: 2 for fatal startup errors, 1 for anything else
    pub fn exit_code(&self) -> u8 {
        if self.is_fatal() { 2 } else { 1 }
    }
}
