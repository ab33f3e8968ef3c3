//! Advisor Service - the end-to-end use case.
//!
//! 1. Extract constraints from the user's text
//! 2. Run the revision loop until a build validates
//! 3. Hand back the build with everything needed to present it

use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{BuildCritic, BuildGenerator, ConstraintExtractor},
        services::revision_loop::{RevisionLoop, RevisionOutcome},
    },
    domain::{Build, Constraints, DomainValidator, ValidationResult},
    error::{RigError, RigResult},
};

/// Requests shorter than this (after trimming) are rejected before any
/// collaborator is called.
pub const MIN_REQUEST_CHARS: usize = 10;

/// Reject empty or near-empty requests.
pub fn check_request_text(text: &str) -> RigResult<()> {
    let len = text.trim().chars().count();
    if len < MIN_REQUEST_CHARS {
        return Err(ApplicationError::ExtractionFailure {
            reason: format!(
                "request too short ({len} characters, need at least {MIN_REQUEST_CHARS})"
            ),
        }
        .into());
    }
    Ok(())
}

/// A recommended build and how it was reached.
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub constraints: Constraints,
    pub build: Build,
    pub iterations: u32,
    pub validation: ValidationResult,
}

impl Recommendation {
    fn new(constraints: Constraints, outcome: RevisionOutcome) -> Self {
        Self {
            constraints,
            build: outcome.build,
            iterations: outcome.iterations,
            validation: outcome.validation,
        }
    }

    /// Signed distance to the budget; negative when under.
    pub fn budget_delta_usd(&self) -> f64 {
        self.build.calculate_total_cost() - self.constraints.budget_usd
    }
}

/// Main recommendation service.
pub struct AdvisorService {
    extractor: Box<dyn ConstraintExtractor>,
    revision: RevisionLoop,
}

impl AdvisorService {
    /// Create a new advisor with the given collaborators.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use rigwright_core::application::AdvisorService;
    ///
    /// let advisor = AdvisorService::new(
    ///     Box::new(extractor), // impl ConstraintExtractor
    ///     Box::new(planner),   // impl BuildGenerator
    ///     Box::new(critic),    // impl BuildCritic
    /// )
    /// .with_max_iterations(5)?;
    /// ```
    pub fn new(
        extractor: Box<dyn ConstraintExtractor>,
        generator: Box<dyn BuildGenerator>,
        critic: Box<dyn BuildCritic>,
    ) -> Self {
        Self {
            extractor,
            revision: RevisionLoop::new(generator, critic),
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> RigResult<Self> {
        self.revision = self.revision.with_max_iterations(max_iterations)?;
        Ok(self)
    }

    pub fn max_iterations(&self) -> u32 {
        self.revision.max_iterations()
    }

    /// Free text → validated build.
    #[instrument(skip_all, fields(request_chars = text.len()))]
    pub fn recommend(&self, text: &str) -> RigResult<Recommendation> {
        let constraints = self.extract(text)?;
        self.recommend_for(constraints)
    }

    /// Constraints → validated build, skipping extraction.
    pub fn recommend_for(&self, constraints: Constraints) -> RigResult<Recommendation> {
        let outcome = self.revision.run_with_report(&constraints)?;
        info!(
            iterations = outcome.iterations,
            total_usd = outcome.build.calculate_total_cost(),
            "Recommendation ready"
        );
        Ok(Recommendation::new(constraints, outcome))
    }

    /// Extract and validate constraints.
    pub fn extract(&self, text: &str) -> RigResult<Constraints> {
        check_request_text(text)?;

        let constraints = self.extractor.extract(text).map_err(|e| match e {
            RigError::Application(ApplicationError::ExtractionFailure { .. }) => e,
            other => ApplicationError::ExtractionFailure {
                reason: other.to_string(),
            }
            .into(),
        })?;

        DomainValidator::validate_constraints(&constraints).map_err(|e| {
            RigError::from(ApplicationError::ExtractionFailure {
                reason: e.to_string(),
            })
        })?;

        info!(
            budget_usd = constraints.budget_usd,
            workloads = ?constraints.primary_workloads,
            "Constraints extracted"
        );
        Ok(constraints)
    }

    /// Check an existing build without running the loop.
    pub fn quick_validate(&self, build: &Build) -> RigResult<ValidationResult> {
        quick_validate(build)
    }
}

/// Schema check then compatibility pass; for builds from outside the loop.
pub fn quick_validate(build: &Build) -> RigResult<ValidationResult> {
    DomainValidator::validate_build_schema(build)?;
    Ok(DomainValidator::check_compatibility(build))
}
