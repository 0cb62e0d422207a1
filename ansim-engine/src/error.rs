//! Error types for the engine boundaries.

use thiserror::Error;

/// Failure to subscribe to a position source.
///
/// Surfaced once to the caller of [`StreamSupervisor::spawn`]; the engine
/// never retries a subscription on its own.
///
/// [`StreamSupervisor::spawn`]: crate::supervisor::StreamSupervisor::spawn
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubscribeError {
    /// The user has not granted location permission
    #[error("location permission denied")]
    PermissionDenied,

    /// The source failed for another reason
    #[error("position source unavailable: {0}")]
    SourceUnavailable(String),
}

/// Alert delivery failure reported by a dispatcher.
///
/// Dispatch is best-effort: the supervisor logs these and moves on. They
/// never reach the detection loop and never change membership state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("alert dispatch failed: {reason}")]
pub struct DispatchError {
    /// What went wrong, e.g. "notification permission missing"
    pub reason: String,
}

impl DispatchError {
    /// Create a dispatch error.
    pub fn new(reason: impl Into<String>) -> Self {
        DispatchError {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            SubscribeError::PermissionDenied.to_string(),
            "location permission denied"
        );
        assert_eq!(
            DispatchError::new("no notification grant").to_string(),
            "alert dispatch failed: no notification grant"
        );
    }
}
