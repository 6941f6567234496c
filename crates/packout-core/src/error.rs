//! Unified error handling for packout core.
//!
//! This module provides a unified error type that wraps domain, application
//! and per-render errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::{ApplicationError, RenderError};
use crate::domain::DomainError;

/// Root error type for packout core operations.
#[derive(Debug, Error)]
pub enum PackoutError {
    /// Errors from the domain layer (invalid requests, empty output).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (setup, pack loading).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// A fatal per-render error that stopped dispatch.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl PackoutError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Render(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Structural => ErrorCategory::Render,
            },
            Self::Application(e) => e.category(),
            Self::Render(e) if e.is_fatal() => ErrorCategory::Cancelled,
            Self::Render(_) => ErrorCategory::Render,
        }
    }

    /// Whether this is the user aborting at a prompt.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Self::Render(e) if e.kind() == crate::application::RenderErrorKind::Cancelled
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Render,
    Cancelled,
}

/// Convenient result type alias.
pub type PackoutResult<T> = Result<T, PackoutError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn cancelled_render_is_detected() {
        let err: PackoutError = RenderError::Cancelled {
            source: io::Error::from(io::ErrorKind::Interrupted),
        }
        .into();
        assert!(err.is_cancelled());
        assert_eq!(err.category(), ErrorCategory::Cancelled);
    }

    #[test]
    fn no_templates_maps_to_render_category() {
        let err: PackoutError = DomainError::NoTemplatesRendered.into();
        assert_eq!(err.category(), ErrorCategory::Render);
        assert_eq!(err.to_string(), "no templates rendered");
    }

    #[test]
    fn application_errors_keep_their_category() {
        let cases: [(PackoutError, ErrorCategory); 3] = [
            (
                ApplicationError::PackNotFound {
                    name: "redis".into(),
                    searched: "/cache/default/redis@latest".into(),
                }
                .into(),
                ErrorCategory::NotFound,
            ),
            (
                ApplicationError::DestinationNotDirectory {
                    path: "/tmp/out".into(),
                }
                .into(),
                ErrorCategory::Validation,
            ),
            (
                ApplicationError::RenderingFailed {
                    reason: "bad".into(),
                }
                .into(),
                ErrorCategory::Render,
            ),
        ];

        for (err, category) in cases {
            assert_eq!(err.category(), category, "{err}");
            assert!(!err.suggestions().is_empty());
        }
    }
}
