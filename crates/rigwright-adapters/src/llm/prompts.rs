//! System prompts and user-prompt builders.

use rigwright_core::application::Revision;
use rigwright_core::domain::{Build, Constraints, ValidationResult};

pub const INTERPRET_SYSTEM: &str = include_str!("../../prompts/interpret.txt");
pub const PLAN_SYSTEM: &str = include_str!("../../prompts/plan.txt");
pub const CRITIQUE_SYSTEM: &str = include_str!("../../prompts/critique.txt");

fn pretty<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// First attempt, or a revision when the previous build and its feedback
/// are supplied.
pub fn plan_prompt(
    constraints: &Constraints,
    revision: Option<&Revision>,
) -> Result<String, serde_json::Error> {
    let peripherals = if constraints.peripherals.any() {
        format!("Include these peripherals: {}.", constraints.peripherals.requested().join(", "))
    } else {
        "No peripherals requested.".to_string()
    };
    let constraints = pretty(constraints)?;

    let Some(revision) = revision else {
        return Ok(format!(
            "# Build Request\n\n\
             Generate a complete PC build based on these constraints:\n\n\
             {constraints}\n\n\
             {peripherals}\n\
             Return a complete build specification as JSON.\n"
        ));
    };

    let previous = pretty(&revision.previous)?;
    Ok(format!(
        "# Revision Request\n\n\
         The previous build failed validation. Revise it based on the feedback below.\n\n\
         ## Original Constraints\n{constraints}\n\n\
         ## Previous Build\n{previous}\n\n\
         ## Validation Feedback\n{feedback}\n\n\
         ## Instructions\n\
         Revise ONLY the components mentioned in the feedback. Keep all other valid components unchanged.\n\
         Return the complete revised build as JSON.\n",
        feedback = revision.feedback,
    ))
}

/// Analysis request for a build that failed validation.
pub fn critique_prompt(
    build: &Build,
    constraints: &Constraints,
    result: &ValidationResult,
) -> Result<String, serde_json::Error> {
    let errors = result
        .errors()
        .iter()
        .map(|e| format!("- {}: {} (component: {})", e.kind(), e.message, e.component_tag()))
        .collect::<Vec<_>>()
        .join("\n");

    let warnings = if result.warnings().is_empty() {
        "None".to_string()
    } else {
        result
            .warnings()
            .iter()
            .map(|w| {
                format!(
                    "- {}: {} (component: {})",
                    w.severity.as_str().to_uppercase(),
                    w.message,
                    w.component_tag()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    Ok(format!(
        "# Build Validation Failure Analysis\n\n\
         ## Original User Constraints\n{constraints}\n\n\
         ## Current Build (FAILED)\n{build}\n\n\
         ## Validation Errors\n{errors}\n\n\
         ## Validation Warnings\n{warnings}\n\n\
         ## Your Task\n\
         Analyze the validation failures and provide specific, actionable revision instructions as JSON.\n\n\
         Focus on:\n\
         1. **Critical errors first** - These MUST be fixed\n\
         2. **Root causes** - Why did this fail?\n\
         3. **Minimal changes** - Only change what's necessary\n\
         4. **Budget compliance** - Stay within ${budget}\n\n\
         Return your analysis as JSON with critical_issues, warnings, recommended_changes, and preserve_components.\n",
        constraints = pretty(constraints)?,
        build = pretty(build)?,
        budget = constraints.budget_usd,
    ))
}
