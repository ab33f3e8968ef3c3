use std::sync::Arc;

use tracing::{error, info, instrument};

use rigwright_core::{
    application::{ApplicationError, BuildGenerator, Revision},
    domain::{Build, Constraints},
    error::RigResult,
};

use super::{JsonCompletion, prompts};

/// Proposes builds, and revises them when given feedback.
pub struct LlmPlanner {
    llm: Arc<dyn JsonCompletion>,
    temperature: f32,
}

impl LlmPlanner {
    pub fn new(llm: Arc<dyn JsonCompletion>) -> Self {
        Self {
            llm,
            temperature: 0.4,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

fn failure(reason: impl Into<String>) -> ApplicationError {
    ApplicationError::GenerationFailure {
        reason: reason.into(),
    }
}

impl BuildGenerator for LlmPlanner {
    #[instrument(
        skip_all,
        fields(budget_usd = constraints.budget_usd, revising = revision.is_some())
    )]
    fn generate(&self, constraints: &Constraints, revision: Option<Revision>) -> RigResult<Build> {
        let prompt = prompts::plan_prompt(constraints, revision.as_ref())
            .map_err(|e| failure(format!("could not render prompt: {e}")))?;

        let reply = self
            .llm
            .complete_json(prompts::PLAN_SYSTEM, &prompt, self.temperature)
            .map_err(|e| failure(e.to_string()))?;

        let build = Build::from_json(reply).map_err(|e| {
            error!(error = %e, "Model returned an unusable build");
            failure(format!("build validation failed: {e}"))
        })?;

        info!(
            cost_usd = build.calculate_total_cost(),
            cpu = %build.cpu.model,
            gpu = build.gpu.as_ref().map_or("integrated", |g| g.model.as_str()),
            "Build generated"
        );
        Ok(build)
    }
}
