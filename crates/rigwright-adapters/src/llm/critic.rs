use std::sync::Arc;

use tracing::{info, instrument};

use rigwright_core::{
    application::{ApplicationError, BuildCritic},
    domain::{Build, Constraints, CritiqueReport, DomainValidator, ValidationResult},
    error::RigResult,
};

use super::{JsonCompletion, prompts};

/// Explains why a build failed and what to change.
pub struct LlmCritic {
    llm: Arc<dyn JsonCompletion>,
    temperature: f32,
}

impl LlmCritic {
    pub fn new(llm: Arc<dyn JsonCompletion>) -> Self {
        Self {
            llm,
            temperature: 0.3,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

fn failure(reason: impl Into<String>) -> ApplicationError {
    ApplicationError::CritiqueFailure {
        reason: reason.into(),
    }
}

impl BuildCritic for LlmCritic {
    #[instrument(
        skip_all,
        fields(errors = result.errors().len(), warnings = result.warnings().len())
    )]
    fn critique(
        &self,
        build: &Build,
        constraints: &Constraints,
        result: &ValidationResult,
    ) -> RigResult<CritiqueReport> {
        let prompt = prompts::critique_prompt(build, constraints, result)
            .map_err(|e| failure(format!("could not render prompt: {e}")))?;

        let reply = self
            .llm
            .complete_json(prompts::CRITIQUE_SYSTEM, &prompt, self.temperature)
            .map_err(|e| failure(e.to_string()))?;

        let report = CritiqueReport::from_json(reply)
            .and_then(|report| DomainValidator::validate_critique(&report).map(|()| report))
            .map_err(|e| failure(format!("critique generation failed: {e}")))?;

        info!(
            critical = report.critical_issues.len(),
            warnings = report.warnings.len(),
            "Critique generated"
        );
        Ok(report)
    }
}
