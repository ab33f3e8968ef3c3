//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from its collaborators.
//! The `rigwright-adapters` crate provides implementations. Each port has
//! one blocking method; timeouts belong to the adapter.

use crate::domain::{Build, Constraints, CritiqueReport, ValidationResult};
use crate::error::RigResult;

/// Port for turning free text into [`Constraints`].
///
/// Implemented by:
/// - `rigwright_adapters::llm::LlmInterpreter` (production)
/// - `rigwright_adapters::scripted::StaticExtractor` (testing/offline)
///
/// Fails with `ApplicationError::ExtractionFailure` for text shorter than
/// ten trimmed characters or a reply that does not validate.
#[cfg_attr(test, mockall::automock)]
pub trait ConstraintExtractor: Send + Sync {
    fn extract(&self, text: &str) -> RigResult<Constraints>;
}

/// Port for proposing a build.
///
/// Implemented by:
/// - `rigwright_adapters::llm::LlmPlanner` (production)
/// - `rigwright_adapters::scripted::ScriptedGenerator` (testing/offline)
///
/// ## Design Notes
///
/// - First call of a run: `revision` is `None`
/// - Revisions receive the last build and the rendered critique verbatim
/// - Failures surface as `ApplicationError::GenerationFailure`
#[cfg_attr(test, mockall::automock)]
pub trait BuildGenerator: Send + Sync {
    fn generate(&self, constraints: &Constraints, revision: Option<Revision>) -> RigResult<Build>;
}

/// The previous attempt and what to change about it.
///
/// Previous build and feedback always travel together.
#[derive(Debug, Clone, PartialEq)]
pub struct Revision {
    pub previous: Build,
    /// Rendered critique, passed through unmodified.
    pub feedback: String,
}

/// Port for analysing why a build failed validation.
///
/// Implemented by:
/// - `rigwright_adapters::llm::LlmCritic` (production)
/// - `rigwright_adapters::scripted::StaticCritic` (testing/offline)
#[cfg_attr(test, mockall::automock)]
pub trait BuildCritic: Send + Sync {
    fn critique(
        &self,
        build: &Build,
        constraints: &Constraints,
        result: &ValidationResult,
    ) -> RigResult<CritiqueReport>;
}
