//! Application layer errors.
//!
//! [`ApplicationError`] covers setup and orchestration failures.
//! [`RenderError`] is the closed set of outcomes for materialising and
//! presenting a single render; callers branch on [`RenderError::kind`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ErrorContext;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The pack could not be found in the registry cache or on disk.
    #[error("pack '{name}' not found")]
    PackNotFound { name: String, searched: PathBuf },

    /// The pack exists but could not be read.
    #[error("failed to load pack at {path}: {reason}")]
    PackLoadFailed { path: PathBuf, reason: String },

    /// The `--to-dir` target exists and is not a directory.
    #[error("output path exists and is not a directory: {path}")]
    DestinationNotDirectory { path: PathBuf },

    /// Template rendering failed.
    #[error("template rendering failed: {reason}")]
    RenderingFailed { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::PackNotFound { name, searched } => vec![
                format!("No pack named '{}' at {}", name, searched.display()),
                "Check the pack name, --registry and --ref".into(),
                "Render a local pack by passing its directory, e.g. 'packout render .'".into(),
            ],
            Self::PackLoadFailed { path, .. } => vec![
                format!("Inspect the pack at {}", path.display()),
                "A pack needs a templates/ directory containing .tpl files".into(),
            ],
            Self::DestinationNotDirectory { path } => vec![
                format!("'{}' is a file", path.display()),
                "Point --to-dir at a directory (it is created if missing)".into(),
            ],
            Self::RenderingFailed { .. } => vec!["Check the template source and variables".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::PackNotFound { .. } => ErrorCategory::NotFound,
            Self::DestinationNotDirectory { .. } => ErrorCategory::Validation,
            Self::PackLoadFailed { .. } | Self::RenderingFailed { .. } => ErrorCategory::Render,
        }
    }
}

/// Discriminator for [`RenderError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderErrorKind {
    /// Overwrite declined; the existing file was left alone.
    AlreadyExists,
    /// The user aborted at the overwrite prompt.
    Cancelled,
    /// The render name cannot be mapped under the output directory.
    InvalidName,
    /// Reading or writing the destination failed.
    Io,
    /// The terminal could not be written to.
    Presentation,
}

/// Outcome of a failed per-render operation.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("destination file already exists: {}", path.display())]
    AlreadyExists { path: PathBuf, context: ErrorContext },

    #[error("operation cancelled")]
    Cancelled {
        #[source]
        source: io::Error,
    },

    #[error("render name '{name}' {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
        context: ErrorContext,
    },

    #[error("failed to write to the terminal: {source}")]
    Presentation {
        #[source]
        source: io::Error,
    },
}

impl RenderError {
    pub fn kind(&self) -> RenderErrorKind {
        match self {
            Self::AlreadyExists { .. } => RenderErrorKind::AlreadyExists,
            Self::Cancelled { .. } => RenderErrorKind::Cancelled,
            Self::InvalidName { .. } => RenderErrorKind::InvalidName,
            Self::Io { .. } => RenderErrorKind::Io,
            Self::Presentation { .. } => RenderErrorKind::Presentation,
        }
    }

    /// Fatal errors stop the whole batch; the rest skip one file.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind(),
            RenderErrorKind::Cancelled | RenderErrorKind::Presentation
        )
    }

    /// Context gathered while handling this render, if any.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::AlreadyExists { context, .. } | Self::Io { context, .. } => Some(context),
            _ => None,
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Cancelled { .. } => vec![
                "Rendering was cancelled at the overwrite prompt".into(),
                "Files written before cancelling were kept".into(),
            ],
            Self::Presentation { .. } => vec!["Check that standard output is still open".into()],
            Self::AlreadyExists { .. } => {
                vec!["Pass --auto-approve to overwrite existing files".into()]
            }
            Self::InvalidName { .. } | Self::Io { .. } => {
                vec!["Check the output directory and its permissions".into()]
            }
        }
    }
}
