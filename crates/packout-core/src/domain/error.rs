// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (cheap to report more than once)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("no templates rendered")]
    NoTemplatesRendered,

    #[error("invalid render name '{name}': {reason}")]
    InvalidRenderName { name: String, reason: String },

    #[error("invalid pack request: {0}")]
    InvalidPackRequest(String),

    #[error("invalid variable '{key}': {reason}")]
    InvalidVariable { key: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NoTemplatesRendered => vec![
                "The pack produced no parent or dependent templates".into(),
                "Check that the pack has files under templates/".into(),
                "Helper templates (names starting with '_') are never rendered on their own"
                    .into(),
            ],
            Self::InvalidRenderName { name, .. } => vec![
                format!("Template name '{}' cannot be written to disk", name),
                "Render names must be relative and must not contain '..'".into(),
            ],
            Self::InvalidPackRequest(reason) => vec![
                format!("Pack request rejected: {}", reason),
                "Use --ref only with registry packs, not filesystem paths".into(),
            ],
            Self::InvalidVariable { key, .. } => vec![
                format!("Check the value given for '{}'", key),
                "Variables are passed as --var key=value".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NoTemplatesRendered => ErrorCategory::Structural,
            Self::InvalidRenderName { .. }
            | Self::InvalidPackRequest(_)
            | Self::InvalidVariable { .. } => ErrorCategory::Validation,
        }
    }
}

/// Error categories for domain errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Structural,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_templates_is_structural() {
        assert_eq!(
            DomainError::NoTemplatesRendered.category(),
            ErrorCategory::Structural
        );
    }

    #[test]
    fn invalid_request_suggests_ref_usage() {
        let err = DomainError::InvalidPackRequest("ref with path".into());
        assert!(err.suggestions().iter().any(|s| s.contains("--ref")));
    }
}
