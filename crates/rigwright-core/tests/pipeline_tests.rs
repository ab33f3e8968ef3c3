//! End-to-end tests for rigwright-core against JSON documents shaped like
//! collaborator replies.

use mockall::{Sequence, mock};
use rigwright_core::{
    application::{
        AdvisorService, ApplicationError, BuildCritic, BuildGenerator, ConstraintExtractor,
        Revision, render_feedback,
    },
    domain::{
        Build, Constraints, CritiqueReport, ErrorKind, StorageKind, ValidationResult, metric,
        validate,
    },
    error::{RigError, RigResult},
};

mock! {
    Extractor {}
    impl ConstraintExtractor for Extractor {
        fn extract(&self, text: &str) -> RigResult<Constraints>;
    }
}

mock! {
    Planner {}
    impl BuildGenerator for Planner {
        fn generate(&self, constraints: &Constraints, revision: Option<Revision>) -> RigResult<Build>;
    }
}

mock! {
    Critic {}
    impl BuildCritic for Critic {
        fn critique(
            &self,
            build: &Build,
            constraints: &Constraints,
            result: &ValidationResult,
        ) -> RigResult<CritiqueReport>;
    }
}

fn fixture(name: &str) -> serde_json::Value {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    let text = std::fs::read_to_string(&path).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn gaming_build() -> Build {
    Build::from_json(fixture("gaming_build.json")).unwrap()
}

fn mismatched_build() -> Build {
    Build::from_json(fixture("mismatched_build.json")).unwrap()
}

fn constraints() -> Constraints {
    Constraints::from_json(fixture("constraints.json")).unwrap()
}

#[test]
fn gaming_build_validates_cleanly() {
    let result = validate(&gaming_build());

    assert!(result.is_valid(), "{:?}", result.error_messages());
    assert_eq!(result.metric(metric::ESTIMATED_POWER_DRAW_W), Some(529.0));
    assert_eq!(result.metric(metric::EFFECTIVE_WATTAGE), Some(765.0));
}

#[test]
fn mismatched_build_reports_socket_and_memory() {
    let result = validate(&mismatched_build());

    assert!(!result.is_valid());
    assert!(result.has_error(ErrorKind::SocketMismatch));
    assert!(result.has_error(ErrorKind::RamTypeMismatch));
}

#[test]
fn validation_result_serializes_with_stable_keys() {
    let json = serde_json::to_value(validate(&mismatched_build())).unwrap();

    assert_eq!(json["is_valid"], false);
    assert_eq!(json["errors"][0]["type"], "socket_mismatch");
    assert!(json["computed_metrics"]["estimated_power_draw_w"].is_number());
}

#[test]
fn constraints_document_parses_aliases() {
    let c = constraints();

    assert_eq!(c.primary_workloads, vec!["gaming", "streaming"]);
    assert_eq!(c.storage_type_preference, Some(StorageKind::Nvme));
    assert!(!c.peripherals.any());
    assert!((c.max_budget_usd() - 2200.0).abs() < 1e-9);
}

#[test]
fn critique_document_renders_feedback() {
    let report = CritiqueReport::from_json(fixture("critique.json")).unwrap();
    let feedback = render_feedback(&report);

    assert!(feedback.starts_with("CRITICAL ISSUES:\n  - MOTHERBOARD:"));
    assert!(!feedback.contains("WARNINGS:"));
    assert!(feedback.contains("    - socket: LGA1700"));
    assert!(feedback.ends_with("DO NOT CHANGE: cpu, ram, storage"));
}

#[test]
fn advisor_revises_until_valid() {
    let mut extractor = MockExtractor::new();
    extractor.expect_extract().times(1).returning(|_| Ok(constraints()));

    let mut seq = Sequence::new();
    let mut planner = MockPlanner::new();
    planner
        .expect_generate()
        .withf(|_, revision| revision.is_none())
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(mismatched_build()));
    planner
        .expect_generate()
        .withf(|_, revision| {
            revision
                .as_ref()
                .is_some_and(|r| r.feedback.contains("DO NOT CHANGE") && r.previous.gpu.is_none())
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(gaming_build()));

    let mut critic = MockCritic::new();
    critic
        .expect_critique()
        .withf(|_, _, result| result.has_error(ErrorKind::SocketMismatch))
        .times(1)
        .returning(|_, _, _| Ok(CritiqueReport::from_json(fixture("critique.json")).unwrap()));

    let advisor = AdvisorService::new(Box::new(extractor), Box::new(planner), Box::new(critic))
        .with_max_iterations(3)
        .unwrap();

    let rec = advisor
        .recommend("A $2000 gaming and streaming rig, quiet, liquid cooled")
        .unwrap();

    assert_eq!(rec.iterations, 2);
    assert!(rec.validation.is_valid());
    assert_eq!(rec.build.cpu.socket, "AM5");
}

#[test]
fn advisor_gives_up_after_budget() {
    let mut extractor = MockExtractor::new();
    extractor.expect_extract().returning(|_| Ok(constraints()));

    let mut planner = MockPlanner::new();
    planner
        .expect_generate()
        .times(2)
        .returning(|_, _| Ok(mismatched_build()));

    let mut critic = MockCritic::new();
    critic
        .expect_critique()
        .times(1)
        .returning(|_, _, _| Ok(CritiqueReport::default()));

    let advisor = AdvisorService::new(Box::new(extractor), Box::new(planner), Box::new(critic))
        .with_max_iterations(2)
        .unwrap();

    let err = advisor
        .recommend("A $2000 gaming and streaming rig")
        .unwrap_err();

    match err {
        RigError::Application(ApplicationError::RevisionBudgetExceeded {
            attempts,
            last_errors,
        }) => {
            assert_eq!(attempts, 2);
            assert_eq!(last_errors.len(), 2);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
