// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Rigwright.
//!
//! This module contains the data model and the compatibility/power
//! validator. Everything here is pure: collaborators, prompts and I/O are
//! reached through ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No logging**: Findings are data in `ValidationResult`
//! - **Immutable entities**: A `Build` is never edited in place by the core
//! - **Total validation**: `validate` cannot fail, only report
//!
// Public API - what the world sees
pub mod compatibility;
pub mod entities;
pub mod error;
pub mod power;
pub mod value_objects;

mod validation;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-exports for convenience
pub use entities::{
    build::{
        Build, ChassisSpec, CoolingSpec, CpuSpec, GpuSpec, MotherboardSpec, PeripheralSpec,
        PsuSpec, RamSpec, StorageSpec,
    },
    constraints::{Constraints, ConstraintsBuilder, PeripheralPreferences},
    critique::{CritiqueItem, CritiqueReport, RecommendedChange},
    validation_result::{
        ErrorDetail, ErrorKind, ValidationError, ValidationResult, ValidationWarning,
        WarningDetail, WarningKind, component_tag, metric,
    },
};

pub use error::DomainError;

pub use value_objects::{
    Component, CoolingKind, EfficiencyRating, FormFactorPreference, NoiseTolerance, Priority,
    Severity, StorageKind,
};

pub use power::{PowerEstimate, calculate_headroom, efficiency_multiplier, estimate_total_power_draw};
pub use validation::{CHECKS, Check, DomainValidator, validate};
