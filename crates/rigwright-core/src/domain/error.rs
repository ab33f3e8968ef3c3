// ============================================================================
// domain/error.rs - SCHEMA VIOLATIONS
// ============================================================================

use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// Every variant is a schema violation: a `Constraints` or `Build` value that
/// cannot exist. Compatibility findings are *not* errors; they are data in
/// `ValidationResult`.
///
/// All errors are:
/// - Cloneable (they travel inside collaborator failures)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Enumerated fields
    // ========================================================================
    #[error("invalid {field} '{value}': expected one of {}", expected.join(", "))]
    InvalidChoice {
        field: &'static str,
        value: String,
        expected: &'static [&'static str],
    },

    // ========================================================================
    // Numeric ranges
    // ========================================================================
    #[error("{field} out of range: {value} (expected {expected})")]
    OutOfRange {
        field: String,
        value: String,
        expected: &'static str,
    },

    // ========================================================================
    // Structure
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Build must include at least one storage device")]
    EmptyStorage,

    #[error("Malformed {entity}: {reason}")]
    Malformed { entity: &'static str, reason: String },
}

impl DomainError {
    pub(crate) fn out_of_range(
        field: impl Into<String>,
        value: impl ToString,
        expected: &'static str,
    ) -> Self {
        Self::OutOfRange {
            field: field.into(),
            value: value.to_string(),
            expected,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidChoice {
                field, expected, ..
            } => vec![
                format!("Valid values for {field}:"),
                format!("  • {}", expected.join(", ")),
            ],
            Self::OutOfRange {
                field, expected, ..
            } => vec![format!("Set {field} to a value {expected}")],
            Self::MissingRequiredField { field } => {
                vec![format!("Provide a value for '{field}'")]
            }
            Self::EmptyStorage => vec![
                "Add at least one drive to the 'storage' list".into(),
                "Secondary drives belong in 'additional_storage'".into(),
            ],
            Self::Malformed { entity, .. } => vec![
                format!("The {entity} document does not match the expected schema"),
                "Check field names, types and units (GB, W, mm, TB, USD)".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    ///
    /// Every domain error is a validation failure of its input.
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Validation
    }
}
