//! Revision loop controller - plan, validate, critique, revise.
//!
//! ```text
//!            ┌──────────────────────────────┐
//!            ▼                              │
//!      ┌──────────┐   ┌──────────┐   ┌──────────┐
//!  ──▶ │ Generate │──▶│ Validate │──▶│ Critique │
//!      └──────────┘   └────┬─────┘   └──────────┘
//!                          │ valid        ▲ invalid, iteration < max
//!                          ▼
//!                       Valid   /   Exhausted (invalid, iteration == max)
//! ```
//!
//! One controller serves many runs: per-run state (counter, pending
//! revision) lives on the stack of `run_with_report`.

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{BuildCritic, BuildGenerator, Revision},
        services::feedback::render_feedback,
    },
    domain::{Build, Constraints, CritiqueReport, ValidationResult, validate},
    error::{RigError, RigResult},
};

/// Generation attempts per run unless configured otherwise.
pub const DEFAULT_MAX_ITERATIONS: u32 = 5;

/// Controller states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Generate,
    Validate,
    Critique,
    /// Terminal: a build passed validation.
    Valid,
    /// Terminal: the last permitted build still failed.
    Exhausted,
}

impl LoopState {
    /// Transition out of `Validate`.
    pub const fn after_validation(is_valid: bool, iteration: u32, max_iterations: u32) -> Self {
        if is_valid {
            Self::Valid
        } else if iteration < max_iterations {
            Self::Critique
        } else {
            Self::Exhausted
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Valid | Self::Exhausted)
    }
}

/// A successful run.
#[derive(Debug, Clone)]
pub struct RevisionOutcome {
    pub build: Build,
    /// Generation calls made, 1-based.
    pub iterations: u32,
    /// Result of the accepted build: no errors, possibly warnings.
    pub validation: ValidationResult,
}

/// Drives generation and validation until a build is valid or the budget
/// runs out.
pub struct RevisionLoop {
    generator: Box<dyn BuildGenerator>,
    critic: Box<dyn BuildCritic>,
    max_iterations: u32,
}

impl RevisionLoop {
    pub fn new(generator: Box<dyn BuildGenerator>, critic: Box<dyn BuildCritic>) -> Self {
        Self {
            generator,
            critic,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Set the inclusive iteration budget. Zero is rejected.
    pub fn with_max_iterations(mut self, max_iterations: u32) -> RigResult<Self> {
        if max_iterations == 0 {
            return Err(ApplicationError::InvalidConfiguration {
                reason: "max_iterations must be at least 1".into(),
            }
            .into());
        }
        self.max_iterations = max_iterations;
        Ok(self)
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Return the first valid build.
    pub fn run(&self, constraints: &Constraints) -> RigResult<Build> {
        self.run_with_report(constraints).map(|outcome| outcome.build)
    }

    /// Return the first valid build with its iteration count and result.
    #[instrument(
        skip_all,
        fields(
            run_id = %Uuid::new_v4(),
            budget_usd = constraints.budget_usd,
            max_iterations = self.max_iterations
        )
    )]
    pub fn run_with_report(&self, constraints: &Constraints) -> RigResult<RevisionOutcome> {
        let mut revision: Option<Revision> = None;
        let mut iteration = 0;

        loop {
            // Generate
            iteration += 1;
            info!(iteration, "Generating build");
            let build = self.generate(constraints, revision.take())?;
            debug!(
                cpu = %build.cpu.model,
                gpu = build.gpu.as_ref().map_or("integrated", |g| g.model.as_str()),
                cost_usd = build.estimated_cost_usd,
                "Build generated"
            );

            // Validate
            let result = validate(&build);
            match LoopState::after_validation(result.is_valid(), iteration, self.max_iterations) {
                LoopState::Valid => {
                    info!(
                        iteration,
                        warnings = result.warnings().len(),
                        "Build valid"
                    );
                    return Ok(RevisionOutcome {
                        build,
                        iterations: iteration,
                        validation: result,
                    });
                }
                LoopState::Exhausted => {
                    warn!(
                        iteration,
                        errors = result.errors().len(),
                        "Revision budget exhausted"
                    );
                    return Err(ApplicationError::RevisionBudgetExceeded {
                        attempts: iteration,
                        last_errors: result.error_messages(),
                    }
                    .into());
                }
                _ => {}
            }

            warn!(
                iteration,
                errors = result.errors().len(),
                warnings = result.warnings().len(),
                "Build invalid, requesting critique"
            );
            for error in result.errors() {
                debug!(kind = %error.kind(), component = %error.component_tag(), "{}", error.message);
            }

            // Critique
            let report = self.critique(&build, constraints, &result)?;
            let feedback = render_feedback(&report);
            debug!(feedback = %feedback, "Feedback for next revision");

            revision = Some(Revision {
                previous: build,
                feedback,
            });
        }
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn generate(&self, constraints: &Constraints, revision: Option<Revision>) -> RigResult<Build> {
        let build = self
            .generator
            .generate(constraints, revision)
            .map_err(as_generation_failure)?;

        build
            .validate()
            .map_err(|e| ApplicationError::GenerationFailure {
                reason: format!("generated build violates schema: {e}"),
            })?;
        Ok(build)
    }

    fn critique(
        &self,
        build: &Build,
        constraints: &Constraints,
        result: &ValidationResult,
    ) -> RigResult<CritiqueReport> {
        self.critic
            .critique(build, constraints, result)
            .map_err(as_critique_failure)
    }
}

fn as_generation_failure(err: RigError) -> RigError {
    match err {
        RigError::Application(ApplicationError::GenerationFailure { .. }) => err,
        other => ApplicationError::GenerationFailure {
            reason: other.to_string(),
        }
        .into(),
    }
}

fn as_critique_failure(err: RigError) -> RigError {
    match err {
        RigError::Application(ApplicationError::CritiqueFailure { .. }) => err,
        other => ApplicationError::CritiqueFailure {
            reason: other.to_string(),
        }
        .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockBuildCritic, MockBuildGenerator};
    use crate::domain::fixtures::{baseline_build, constraints};
    use crate::domain::{CritiqueItem, DomainError};
    use mockall::Sequence;

    fn invalid_build() -> Build {
        let mut build = baseline_build();
        build.cpu.socket = "LGA1700".into();
        build
    }

    fn psu_report() -> CritiqueReport {
        CritiqueReport {
            critical_issues: vec![CritiqueItem::new("cpu", "wrong socket", "use an AM5 CPU")],
            preserve_components: vec!["motherboard".into()],
            ..CritiqueReport::default()
        }
    }

    fn quiet_critic(times: usize) -> MockBuildCritic {
        let mut critic = MockBuildCritic::new();
        critic
            .expect_critique()
            .times(times)
            .returning(|_, _, _| Ok(psu_report()));
        critic
    }

    #[test]
    fn state_transitions() {
        assert_eq!(LoopState::after_validation(true, 1, 5), LoopState::Valid);
        assert_eq!(LoopState::after_validation(false, 4, 5), LoopState::Critique);
        assert_eq!(LoopState::after_validation(false, 5, 5), LoopState::Exhausted);
        assert!(LoopState::Valid.is_terminal());
        assert!(!LoopState::Critique.is_terminal());
    }

    #[test]
    fn valid_first_build_skips_critique() {
        let mut generator = MockBuildGenerator::new();
        generator
            .expect_generate()
            .withf(|_, revision| revision.is_none())
            .times(1)
            .returning(|_, _| Ok(baseline_build()));

        let controller = RevisionLoop::new(Box::new(generator), Box::new(quiet_critic(0)));
        let outcome = controller.run_with_report(&constraints()).unwrap();

        assert_eq!(outcome.iterations, 1);
        assert!(outcome.validation.is_valid());
    }

    #[test]
    fn always_invalid_exhausts_budget() {
        let mut generator = MockBuildGenerator::new();
        generator
            .expect_generate()
            .times(5)
            .returning(|_, _| Ok(invalid_build()));

        let controller = RevisionLoop::new(Box::new(generator), Box::new(quiet_critic(4)));
        let err = controller.run(&constraints()).unwrap_err();

        match err {
            RigError::Application(ApplicationError::RevisionBudgetExceeded {
                attempts,
                last_errors,
            }) => {
                assert_eq!(attempts, 5);
                assert_eq!(last_errors.len(), 1);
                assert!(last_errors[0].contains("LGA1700"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn valid_on_third_attempt() {
        let mut seq = Sequence::new();
        let mut generator = MockBuildGenerator::new();
        generator
            .expect_generate()
            .withf(|_, revision| revision.is_none())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(invalid_build()));
        generator
            .expect_generate()
            .withf(|_, revision| {
                revision.as_ref().is_some_and(|r| {
                    r.previous.cpu.socket == "LGA1700"
                        && r.feedback.contains("FIX: use an AM5 CPU")
                })
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(invalid_build()));
        generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(baseline_build()));

        let controller = RevisionLoop::new(Box::new(generator), Box::new(quiet_critic(2)));
        let outcome = controller.run_with_report(&constraints()).unwrap();

        assert_eq!(outcome.iterations, 3);
        assert_eq!(outcome.build, baseline_build());
    }

    #[test]
    fn generation_failure_stops_immediately() {
        let mut generator = MockBuildGenerator::new();
        generator.expect_generate().times(1).returning(|_, _| {
            Err(ApplicationError::GenerationFailure {
                reason: "model unavailable".into(),
            }
            .into())
        });

        let controller = RevisionLoop::new(Box::new(generator), Box::new(quiet_critic(0)));
        let err = controller.run(&constraints()).unwrap_err();
        assert!(matches!(
            err,
            RigError::Application(ApplicationError::GenerationFailure { ref reason })
                if reason == "model unavailable"
        ));
    }

    #[test]
    fn schema_invalid_build_is_generation_failure() {
        let mut generator = MockBuildGenerator::new();
        generator.expect_generate().times(1).returning(|_, _| {
            let mut build = baseline_build();
            build.storage.clear();
            Ok(build)
        });

        let controller = RevisionLoop::new(Box::new(generator), Box::new(quiet_critic(0)));
        assert!(matches!(
            controller.run(&constraints()),
            Err(RigError::Application(ApplicationError::GenerationFailure { .. }))
        ));
    }

    #[test]
    fn other_generator_errors_are_wrapped() {
        let mut generator = MockBuildGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|_, _| Err(DomainError::EmptyStorage.into()));

        let controller = RevisionLoop::new(Box::new(generator), Box::new(quiet_critic(0)));
        assert!(matches!(
            controller.run(&constraints()),
            Err(RigError::Application(ApplicationError::GenerationFailure { .. }))
        ));
    }

    #[test]
    fn critique_failure_is_fatal() {
        let mut generator = MockBuildGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|_, _| Ok(invalid_build()));

        let mut critic = MockBuildCritic::new();
        critic.expect_critique().times(1).returning(|_, _, _| {
            Err(RigError::Internal {
                message: "bad json".into(),
            })
        });

        let controller = RevisionLoop::new(Box::new(generator), Box::new(critic));
        assert!(matches!(
            controller.run(&constraints()),
            Err(RigError::Application(ApplicationError::CritiqueFailure { .. }))
        ));
    }

    #[test]
    fn single_iteration_budget() {
        let mut generator = MockBuildGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|_, _| Ok(invalid_build()));

        let controller = RevisionLoop::new(Box::new(generator), Box::new(quiet_critic(0)))
            .with_max_iterations(1)
            .unwrap();
        assert!(matches!(
            controller.run(&constraints()),
            Err(RigError::Application(ApplicationError::RevisionBudgetExceeded { attempts: 1, .. }))
        ));
    }

    #[test]
    fn zero_iterations_rejected() {
        let controller = RevisionLoop::new(
            Box::new(MockBuildGenerator::new()),
            Box::new(MockBuildCritic::new()),
        );
        assert!(controller.with_max_iterations(0).is_err());
    }
}
