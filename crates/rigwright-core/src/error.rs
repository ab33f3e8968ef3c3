//! The error every public operation in this crate returns.
//!
//! [`RigError`] only wraps: schema problems come from [`DomainError`],
//! collaborator and loop failures from [`ApplicationError`]. Validation
//! findings about a build are not errors at all; they are data in
//! [`ValidationResult`](crate::domain::ValidationResult).

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

pub type RigResult<T> = Result<T, RigError>;

#[derive(Debug, Error, Clone)]
pub enum RigError {
    /// A constraints, build or critique document broke the schema.
    #[error("Invalid document: {0}")]
    Domain(#[from] DomainError),

    /// A collaborator misbehaved or the revision budget ran out.
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// A broken invariant inside rigwright itself.
    #[error("Internal error: {message} (please report this)")]
    Internal { message: String },
}

impl RigError {
    /// What the user can do about it.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "Re-run with -vv and include the log when reporting".into(),
                "Issues: https://github.com/cosecruz/rigwright/issues".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Collaborator failures (timeouts, an unparseable model reply) may
    /// succeed on a second attempt. Schema violations and an exhausted
    /// budget will not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Application(
                ApplicationError::GenerationFailure { .. }
                    | ApplicationError::CritiqueFailure { .. }
            )
        )
    }
}

/// Coarse grouping callers use to pick exit codes and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed constraints or build documents, or a too-short request.
    Validation,
    /// A model or remote service failed.
    Collaborator,
    /// No valid build could be produced.
    NotFound,
    Configuration,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_are_validation() {
        let err: RigError = DomainError::EmptyStorage.into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.is_retryable());
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn generation_failures_are_retryable() {
        let err: RigError = ApplicationError::GenerationFailure {
            reason: "timeout".into(),
        }
        .into();
        assert!(err.is_retryable());
        assert_eq!(err.category(), ErrorCategory::Collaborator);
    }

    #[test]
    fn exhausted_budget_is_not_found() {
        let err: RigError = ApplicationError::RevisionBudgetExceeded {
            attempts: 5,
            last_errors: vec!["socket".into()],
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(!err.is_retryable());
    }

    #[test]
    fn invalid_configuration_is_configuration() {
        let err: RigError = ApplicationError::InvalidConfiguration {
            reason: "max_iterations must be at least 1".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn internal_errors_ask_for_a_report() {
        let err = RigError::Internal {
            message: "lock poisoned".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(err.to_string().contains("please report"));
    }
}
