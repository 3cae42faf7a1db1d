//! Error types for navigation operations

use thiserror::Error;

/// Error type for navigation operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Navigation is currently in transition")]
    NavigationInProgress,

    #[error("No page is currently active")]
    NoActivePage,

    #[error("Navigation stack is empty")]
    EmptyStack,

    #[error("Page factory failed: {message}")]
    Factory { message: String },

    #[error("Lifecycle hook failed: {message}")]
    Hook { message: String },

    #[error("{} detach hook(s) failed during remove_all", .errors.len())]
    DetachFailed { errors: Vec<Error> },

    #[error("Operation was cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal(err.to_string())
    }
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a factory error
    pub fn factory<S: Into<String>>(message: S) -> Self {
        Self::Factory {
            message: message.into(),
        }
    }

    /// Create a lifecycle hook error
    pub fn hook<S: Into<String>>(message: S) -> Self {
        Self::Hook {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Check if this error signals a conflicting in-flight transition
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Error::NavigationInProgress)
    }

    /// Check if this error came from a cancelled token
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    /// Check if this error is recoverable (caller can retry once the
    /// conflicting transition settles)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::NavigationInProgress | Error::Cancelled)
    }

    /// Get the error category for logging and metrics
    pub fn category(&self) -> &'static str {
        match self {
            Error::InvalidArgument { .. } => "invalid_argument",
            Error::NotFound { .. } => "not_found",
            Error::NavigationInProgress => "in_progress",
            Error::NoActivePage => "no_active_page",
            Error::EmptyStack => "empty_stack",
            Error::Factory { .. } => "factory",
            Error::Hook { .. } => "hook",
            Error::DetachFailed { .. } => "detach_failed",
            Error::Cancelled => "cancelled",
            Error::Internal(_) => "internal",
        }
    }
}

/// Convenience result type for navigation operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let not_found = Error::not_found("page is not registered");
        assert!(not_found.is_not_found());
        assert!(!not_found.is_in_progress());
        assert_eq!(not_found.category(), "not_found");

        let busy = Error::NavigationInProgress;
        assert!(busy.is_in_progress());
        assert!(busy.is_recoverable());
        assert_eq!(busy.category(), "in_progress");

        let hook = Error::hook("enter animation failed");
        assert!(!hook.is_recoverable());
        assert_eq!(hook.category(), "hook");
    }

    #[test]
    fn test_detach_failed_aggregation() {
        let err = Error::DetachFailed {
            errors: vec![Error::hook("a"), Error::hook("b")],
        };
        assert_eq!(err.category(), "detach_failed");
        assert!(format!("{}", err).contains("2 detach hook(s)"));
    }

    #[test]
    fn test_error_from_anyhow() {
        let err: Error = anyhow::anyhow!("boom").into();
        assert_eq!(err.category(), "internal");
        assert!(format!("{}", err).contains("boom"));
    }

    #[test]
    fn test_error_display() {
        let err = Error::invalid_argument("page is already registered");
        let display = format!("{}", err);
        assert!(display.contains("Invalid argument"));
        assert!(display.contains("already registered"));
    }
}
