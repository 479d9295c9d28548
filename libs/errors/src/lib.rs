//! Unified error handling for the alarm inventory tools
//!
//! Every crate in the workspace reports failures through [`ScanError`]. The
//! taxonomy is deliberately small: configuration problems and invalid filter
//! values are caught before any scanning starts, remote failures are either
//! fatal (region directory) or contained to a single region (alarm listing).

use std::fmt;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// RemoteError - failure talking to a remote directory
// ============================================================================

/// What went wrong with a remote call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteErrorKind {
    /// The service answered with an error or could not be reached
    Service(String),
    /// The per-call budget elapsed before the call sequence finished
    Timeout(Duration),
}

impl fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Service(message) => f.write_str(message),
            Self::Timeout(budget) => {
                write!(f, "timed out after {}", humantime::format_duration(*budget))
            },
        }
    }
}

/// A remote call failure tagged with the endpoint it was aimed at
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{target}: {kind}")]
pub struct RemoteError {
    /// Region identifier (or directory endpoint) the call was sent to
    pub target: String,
    pub kind: RemoteErrorKind,
}

impl RemoteError {
    pub fn service(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            kind: RemoteErrorKind::Service(message.into()),
        }
    }

    pub fn timeout(target: impl Into<String>, budget: Duration) -> Self {
        Self {
            target: target.into(),
            kind: RemoteErrorKind::Timeout(budget),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, RemoteErrorKind::Timeout(_))
    }
}

// ============================================================================
// ScanError - Main error type
// ============================================================================

/// Main error type for alarm inventory runs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    // ======================================
    // Configuration Errors
    // ======================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ======================================
    // Remote Errors
    // ======================================
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    // ======================================
    // Validation Errors
    // ======================================
    #[error("Invalid {field}: {value}. {expected}")]
    Validation {
        field: String,
        value: String,
        expected: String,
    },
}

/// Result type alias using ScanError
pub type ScanResult<T> = Result<T, ScanError>;

impl ScanError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a remote service error for the given target
    pub fn remote(target: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Remote(RemoteError::service(target, msg))
    }

    /// Create a remote timeout error for the given target
    pub fn timeout(target: impl Into<String>, budget: Duration) -> Self {
        Self::Remote(RemoteError::timeout(target, budget))
    }

    /// Create a validation error for a caller-supplied value
    pub fn validation(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::Validation {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Remote(e) if e.is_timeout())
    }

    /// Remote error details, if this is a remote failure
    pub fn as_remote(&self) -> Option<&RemoteError> {
        match self {
            Self::Remote(e) => Some(e),
            _ => None,
        }
    }

    /// Stable error code for logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Remote(e) if e.is_timeout() => "REMOTE_TIMEOUT",
            Self::Remote(_) => "REMOTE_ERROR",
            Self::Validation { .. } => "VALIDATION_ERROR",
        }
    }

    /// Process exit code when this error ends the run
    pub fn exit_code(&self) -> i32 {
        1
    }
}

// Convenience macros for creating errors
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::ScanError::Config($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::ScanError::Config(format!($fmt, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_remote() {
        let err = ScanError::timeout("eu-west-1", Duration::from_secs(20));
        assert!(err.is_remote());
        assert!(err.is_timeout());
        assert_eq!(err.error_code(), "REMOTE_TIMEOUT");
        assert_eq!(err.as_remote().map(|r| r.target.as_str()), Some("eu-west-1"));
    }

    #[test]
    fn test_display_messages() {
        let err = ScanError::remote("us-east-1", "AccessDenied");
        assert_eq!(err.to_string(), "Remote error: us-east-1: AccessDenied");

        let err = ScanError::timeout("us-west-2", Duration::from_secs(20));
        assert_eq!(err.to_string(), "Remote error: us-west-2: timed out after 20s");

        let err = ScanError::validation(
            "state",
            "BROKEN",
            "Must be one of: OK, ALARM, INSUFFICIENT_DATA",
        );
        assert_eq!(
            err.to_string(),
            "Invalid state: BROKEN. Must be one of: OK, ALARM, INSUFFICIENT_DATA"
        );
    }

    #[test]
    fn test_config_error_macro() {
        let err = config_error!("no valid regions in {}", "--regions");
        assert_eq!(err, ScanError::Config("no valid regions in --regions".to_string()));
        assert!(!err.is_remote());
        assert_eq!(err.exit_code(), 1);
    }
}
