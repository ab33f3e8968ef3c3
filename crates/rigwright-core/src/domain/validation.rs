use crate::domain::{
    compatibility as compat,
    entities::{Build, Constraints, CritiqueReport, ValidationResult},
    error::DomainError,
    power,
};

/// A single compatibility or power check.
pub type Check = fn(&Build, &mut ValidationResult);

/// Every check, in the order findings are reported.
pub const CHECKS: &[(&str, Check)] = &[
    ("socket", compat::check_socket),
    ("ram", compat::check_ram),
    ("form_factor", compat::check_form_factor),
    ("gpu_clearance", compat::check_gpu_clearance),
    ("cooler_clearance", compat::check_cooler_clearance),
    ("cooling_capacity", compat::check_cooling_capacity),
    ("storage_connectivity", compat::check_storage_connectivity),
    ("graphics_output", compat::check_graphics_output),
    ("psu_wattage", power::check_psu_wattage),
    ("power_connectors", power::check_power_connectors),
];

/// Run every check against `build`.
///
/// Pure and total: the same build always yields the same result, and no
/// input can make it fail. Schema problems are caught earlier by
/// [`Build::validate`].
pub fn validate(build: &Build) -> ValidationResult {
    let mut result = ValidationResult::new();
    for (_, check) in CHECKS {
        check(build, &mut result);
    }
    result
}

/// Centralized domain validation.
///
/// Schema validation of each entity plus the compatibility pass.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_constraints(constraints: &Constraints) -> Result<(), DomainError> {
        constraints.validate()
    }

    pub fn validate_build_schema(build: &Build) -> Result<(), DomainError> {
        build.validate()
    }

    pub fn validate_critique(report: &CritiqueReport) -> Result<(), DomainError> {
        for item in report.critical_issues.iter().chain(&report.warnings) {
            if item.component.trim().is_empty() {
                return Err(DomainError::MissingRequiredField {
                    field: "critique.component",
                });
            }
        }
        Ok(())
    }

    pub fn check_compatibility(build: &Build) -> ValidationResult {
        validate(build)
    }
}
