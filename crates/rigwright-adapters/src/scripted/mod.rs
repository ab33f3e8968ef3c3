//! Deterministic collaborators for offline runs and tests.

mod completion;

use std::{collections::VecDeque, sync::Mutex};

use rigwright_core::{
    application::{ApplicationError, BuildCritic, BuildGenerator, ConstraintExtractor, Revision},
    domain::{Build, Constraints, CritiqueReport, ValidationResult},
    error::{RigError, RigResult},
};

pub use completion::{RecordedPrompt, ScriptedCompletion};

fn poisoned(what: &str) -> RigError {
    RigError::Internal {
        message: format!("{what} lock poisoned"),
    }
}

/// Always returns the same constraints.
#[derive(Debug, Clone)]
pub struct StaticExtractor {
    constraints: Constraints,
}

impl StaticExtractor {
    pub fn new(constraints: Constraints) -> Self {
        Self { constraints }
    }
}

impl ConstraintExtractor for StaticExtractor {
    fn extract(&self, _text: &str) -> RigResult<Constraints> {
        Ok(self.constraints.clone())
    }
}

#[derive(Debug, Default)]
struct GeneratorState {
    queue: VecDeque<Build>,
    last: Option<Build>,
    feedback: Vec<String>,
    calls: u32,
}

/// Hands out queued builds in order, then keeps repeating the last one.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    state: Mutex<GeneratorState>,
}

impl ScriptedGenerator {
    pub fn new(builds: impl IntoIterator<Item = Build>) -> Self {
        Self {
            state: Mutex::new(GeneratorState {
                queue: builds.into_iter().collect(),
                ..GeneratorState::default()
            }),
        }
    }

    pub fn calls(&self) -> u32 {
        self.state.lock().map_or(0, |s| s.calls)
    }

    /// Feedback received on each revision call, in order.
    pub fn feedback_received(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|s| s.feedback.clone())
            .unwrap_or_default()
    }
}

impl BuildGenerator for ScriptedGenerator {
    fn generate(&self, _constraints: &Constraints, revision: Option<Revision>) -> RigResult<Build> {
        let mut state = self.state.lock().map_err(|_| poisoned("generator"))?;
        state.calls += 1;
        if let Some(revision) = revision {
            state.feedback.push(revision.feedback);
        }

        if let Some(next) = state.queue.pop_front() {
            state.last = Some(next);
        }
        state.last.clone().ok_or_else(|| {
            ApplicationError::GenerationFailure {
                reason: "no scripted builds".into(),
            }
            .into()
        })
    }
}

/// Returns a fixed report for every failed build.
#[derive(Debug, Default)]
pub struct StaticCritic {
    report: CritiqueReport,
    calls: Mutex<u32>,
}

impl StaticCritic {
    pub fn new(report: CritiqueReport) -> Self {
        Self {
            report,
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.lock().map_or(0, |c| *c)
    }
}

impl BuildCritic for StaticCritic {
    fn critique(
        &self,
        _build: &Build,
        _constraints: &Constraints,
        _result: &ValidationResult,
    ) -> RigResult<CritiqueReport> {
        *self.calls.lock().map_err(|_| poisoned("critic"))? += 1;
        Ok(self.report.clone())
    }
}
