//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Natural-language text could not be turned into constraints.
    #[error("Constraint extraction failed: {reason}")]
    ExtractionFailure { reason: String },

    /// The build generator failed or returned an unusable build.
    #[error("Build generation failed: {reason}")]
    GenerationFailure { reason: String },

    /// The critic failed or returned an unusable report.
    #[error("Critique failed: {reason}")]
    CritiqueFailure { reason: String },

    /// No valid build within the iteration budget.
    #[error(
        "Could not generate a valid build within {attempts} attempts. Last errors: {}",
        last_errors.join("; ")
    )]
    RevisionBudgetExceeded {
        attempts: u32,
        last_errors: Vec<String>,
    },

    /// Service wired with unusable settings.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ExtractionFailure { .. } => vec![
                "Describe the build in a full sentence (at least 10 characters)".into(),
                "Mention a budget and what the machine is for, e.g. '$1500 gaming PC'".into(),
            ],
            Self::GenerationFailure { .. } | Self::CritiqueFailure { .. } => vec![
                "The model call failed; try again in a moment".into(),
                "Check the LLM provider settings with 'rigwright config'".into(),
            ],
            Self::RevisionBudgetExceeded { attempts, .. } => vec![
                format!("No compatible build was found in {attempts} attempts"),
                "Raise the limit with --max-iterations".into(),
                "Loosen the constraints: a higher budget or fewer hard requirements".into(),
            ],
            Self::InvalidConfiguration { reason } => vec![
                format!("Configuration problem: {reason}"),
                "Run 'rigwright init' to write a default configuration".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ExtractionFailure { .. } => ErrorCategory::Validation,
            Self::GenerationFailure { .. } | Self::CritiqueFailure { .. } => {
                ErrorCategory::Collaborator
            }
            Self::RevisionBudgetExceeded { .. } => ErrorCategory::NotFound,
            Self::InvalidConfiguration { .. } => ErrorCategory::Configuration,
        }
    }
}
