use std::sync::Arc;

use tracing::{info, instrument};

use rigwright_core::{
    application::{ApplicationError, ConstraintExtractor, check_request_text},
    domain::Constraints,
    error::RigResult,
};

use super::{JsonCompletion, prompts};

/// Natural language → [`Constraints`].
pub struct LlmInterpreter {
    llm: Arc<dyn JsonCompletion>,
    temperature: f32,
}

impl LlmInterpreter {
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
    ApplicationError::ExtractionFailure {
        reason: reason.into(),
    }
}

impl ConstraintExtractor for LlmInterpreter {
    #[instrument(skip_all, fields(temperature = self.temperature))]
    fn extract(&self, text: &str) -> RigResult<Constraints> {
        check_request_text(text)?;

        let reply = self
            .llm
            .complete_json(prompts::INTERPRET_SYSTEM, text, self.temperature)
            .map_err(|e| failure(e.to_string()))?;

        let constraints = Constraints::from_json(reply)
            .map_err(|e| failure(format!("failed to validate extracted constraints: {e}")))?;

        info!(
            budget_usd = constraints.budget_usd,
            workloads = ?constraints.primary_workloads,
            "Constraints extracted"
        );
        Ok(constraints)
    }
}
