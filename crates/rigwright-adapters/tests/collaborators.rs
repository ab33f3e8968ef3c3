//! LLM collaborators driven by a scripted model, and the parts cleaner on
//! real files.

use std::sync::Arc;

use serde_json::{Value, json};

use rigwright_adapters::{
    LlmCritic, LlmInterpreter, LlmPlanner, ScriptedCompletion, ScriptedGenerator, StaticCritic,
    StaticExtractor, clean_parts_data,
    llm::prompts::{CRITIQUE_SYSTEM, INTERPRET_SYSTEM, PLAN_SYSTEM},
};
use rigwright_core::{
    application::{
        AdvisorService, ApplicationError, BuildCritic, BuildGenerator, ConstraintExtractor,
        Revision,
    },
    domain::{Build, Constraints, CritiqueReport, PeripheralPreferences, validate},
    error::RigError,
};

fn fixture(name: &str) -> Value {
    let path = format!(
        "{}/../rigwright-core/tests/fixtures/{name}",
        env!("CARGO_MANIFEST_DIR")
    );
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn constraints() -> Constraints {
    Constraints::from_json(fixture("constraints.json")).unwrap()
}

fn build(name: &str) -> Build {
    Build::from_json(fixture(name)).unwrap()
}

fn application_error(err: RigError) -> ApplicationError {
    match err {
        RigError::Application(e) => e,
        other => panic!("expected an application error, got {other:?}"),
    }
}

// ── Interpreter ───────────────────────────────────────────────────────────────

#[test]
fn interpreter_parses_model_reply() {
    let model = Arc::new(ScriptedCompletion::new().reply(fixture("constraints.json")));
    let interpreter = LlmInterpreter::new(model.clone());

    let c = interpreter
        .extract("Gaming and streaming PC around $2000, quiet please")
        .unwrap();

    assert_eq!(c.budget_usd, 2000.0);
    let prompts = model.prompts();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].system, INTERPRET_SYSTEM);
    assert_eq!(prompts[0].temperature, 0.3);
}

#[test]
fn interpreter_rejects_short_text_before_calling_model() {
    let model = Arc::new(ScriptedCompletion::new());
    let interpreter = LlmInterpreter::new(model.clone());

    let err = interpreter.extract("pc").unwrap_err();

    assert!(matches!(
        application_error(err),
        ApplicationError::ExtractionFailure { .. }
    ));
    assert!(model.prompts().is_empty());
}

#[test]
fn interpreter_rejects_invalid_constraints() {
    let model = Arc::new(ScriptedCompletion::new().reply(json!({
        "budget_usd": -5,
        "primary_workloads": ["gaming"]
    })));

    let err = LlmInterpreter::new(model)
        .extract("something cheap for gaming")
        .unwrap_err();

    match application_error(err) {
        ApplicationError::ExtractionFailure { reason } => {
            assert!(reason.contains("budget_usd"), "{reason}");
        }
        other => panic!("unexpected {other:?}"),
    }
}

// ── Planner ───────────────────────────────────────────────────────────────────

#[test]
fn planner_initial_prompt_has_no_revision_section() {
    let model = Arc::new(ScriptedCompletion::new().reply(fixture("gaming_build.json")));
    let planner = LlmPlanner::new(model.clone());

    let b = planner.generate(&constraints(), None).unwrap();

    assert_eq!(b.cpu.socket, "AM5");
    let prompt = &model.prompts()[0];
    assert_eq!(prompt.system, PLAN_SYSTEM);
    assert_eq!(prompt.temperature, 0.4);
    assert!(prompt.user.starts_with("# Build Request"));
    assert!(prompt.user.contains("No peripherals requested."));
    assert!(!prompt.user.contains("Previous Build"));
}

#[test]
fn planner_initial_prompt_lists_requested_peripherals() {
    let model = Arc::new(ScriptedCompletion::new().reply(fixture("gaming_build.json")));
    let planner = LlmPlanner::new(model.clone());

    let mut wanted = constraints();
    wanted.peripherals = PeripheralPreferences {
        monitor: true,
        mouse: true,
        ..PeripheralPreferences::default()
    };
    planner.generate(&wanted, None).unwrap();

    let prompt = &model.prompts()[0];
    assert!(prompt.user.contains("Include these peripherals: monitor, mouse."));
}

#[test]
fn planner_revision_prompt_carries_feedback_verbatim() {
    let model = Arc::new(ScriptedCompletion::new().reply(fixture("gaming_build.json")));
    let planner = LlmPlanner::new(model.clone()).with_temperature(0.2);

    let revision = Revision {
        previous: build("mismatched_build.json"),
        feedback: "CRITICAL ISSUES:\n  - CPU: wrong socket\n    FIX: use AM5".into(),
    };
    planner.generate(&constraints(), Some(revision)).unwrap();

    let prompt = &model.prompts()[0];
    assert_eq!(prompt.temperature, 0.2);
    assert!(prompt.user.starts_with("# Revision Request"));
    assert!(prompt.user.contains("## Previous Build"));
    assert!(prompt.user.contains("Intel Core i5-13600K"));
    assert!(prompt.user.contains("  - CPU: wrong socket\n    FIX: use AM5"));
    assert!(prompt.user.contains("Revise ONLY the components mentioned"));
}

#[test]
fn planner_failures_are_generation_failures() {
    let model = Arc::new(
        ScriptedCompletion::new()
            .fail("connection refused")
            .reply(json!({"cpu": "not a cpu"})),
    );
    let planner = LlmPlanner::new(model);

    for _ in 0..2 {
        let err = planner.generate(&constraints(), None).unwrap_err();
        assert!(matches!(
            application_error(err),
            ApplicationError::GenerationFailure { .. }
        ));
    }
}

// ── Critic ────────────────────────────────────────────────────────────────────

#[test]
fn critic_prompt_lists_errors_and_budget() {
    let model = Arc::new(ScriptedCompletion::new().reply(fixture("critique.json")));
    let critic = LlmCritic::new(model.clone());
    let failing = build("mismatched_build.json");
    let result = validate(&failing);

    let report = critic.critique(&failing, &constraints(), &result).unwrap();

    assert_eq!(report.preserve_components, vec!["cpu", "ram", "storage"]);
    let prompt = &model.prompts()[0];
    assert_eq!(prompt.system, CRITIQUE_SYSTEM);
    assert!(prompt.user.contains("- socket_mismatch: "));
    assert!(prompt.user.contains("(component: cpu+motherboard)"));
    assert!(prompt.user.contains("## Validation Warnings\nNone"));
    assert!(prompt.user.contains("Stay within $2000"));
}

#[test]
fn critic_rejects_malformed_reports() {
    let model = Arc::new(ScriptedCompletion::new().reply(json!({"critical_issues": "lots"})));
    let failing = build("mismatched_build.json");

    let err = LlmCritic::new(model)
        .critique(&failing, &constraints(), &validate(&failing))
        .unwrap_err();

    assert!(matches!(
        application_error(err),
        ApplicationError::CritiqueFailure { .. }
    ));
}

// ── Scripted collaborators end to end ─────────────────────────────────────────

#[test]
fn scripted_pipeline_repairs_the_build() {
    let generator = ScriptedGenerator::new([
        build("mismatched_build.json"),
        build("gaming_build.json"),
    ]);
    let critic = StaticCritic::new(
        CritiqueReport::from_json(fixture("critique.json")).unwrap(),
    );

    let advisor = AdvisorService::new(
        Box::new(StaticExtractor::new(constraints())),
        Box::new(generator),
        Box::new(critic),
    );

    let rec = advisor.recommend("Gaming and streaming PC for $2000").unwrap();
    assert_eq!(rec.iterations, 2);
    assert!(rec.validation.is_valid());
}

#[test]
fn scripted_generator_repeats_last_build() {
    let generator = ScriptedGenerator::new([build("mismatched_build.json")]);
    let c = constraints();

    let first = generator.generate(&c, None).unwrap();
    let revision = Revision {
        previous: first.clone(),
        feedback: "fix the socket".into(),
    };
    let second = generator.generate(&c, Some(revision)).unwrap();

    assert_eq!(first, second);
    assert_eq!(generator.calls(), 2);
    assert_eq!(generator.feedback_received(), vec!["fix the socket"]);
}

#[test]
fn empty_scripted_generator_fails() {
    let err = ScriptedGenerator::new([])
        .generate(&constraints(), None)
        .unwrap_err();
    assert!(matches!(
        application_error(err),
        ApplicationError::GenerationFailure { .. }
    ));
}

// ── Parts data ────────────────────────────────────────────────────────────────

#[test]
fn clean_parts_data_round_trips_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("raw.json");
    let output = dir.path().join("parts_db.json");
    std::fs::write(
        &input,
        json!({
            "cpu": [
                {"name": "Ryzen 7 7800X3D", "price": ["USD", "369.99"]},
                {"name": "Ryzen 7 1700", "price": ["USD", "0.00"]}
            ],
            "case-fan": [{"name": "Arctic P12", "price": ["USD", "0.00"]}],
            "source": "scrape"
        })
        .to_string(),
    )
    .unwrap();

    let report = clean_parts_data(&input, &output).unwrap();

    assert_eq!(report.total_before(), 3);
    assert_eq!(report.total_after(), 1);
    assert_eq!(report.categories["case-fan"].after, 0);

    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written["cpu"].as_array().unwrap().len(), 1);
    assert_eq!(written["source"], "scrape");
}

#[test]
fn clean_parts_data_rejects_non_objects() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("raw.json");
    std::fs::write(&input, "[1, 2, 3]").unwrap();

    let err = clean_parts_data(&input, &dir.path().join("out.json")).unwrap_err();
    assert!(err.to_string().contains("must contain a JSON object"));
}
