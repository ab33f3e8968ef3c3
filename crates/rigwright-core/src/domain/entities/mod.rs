pub mod build;
pub(crate) mod common;
pub mod constraints;
pub mod critique;
pub mod validation_result;

pub use crate::domain::DomainError;
pub use build::{
    Build, ChassisSpec, CoolingSpec, CpuSpec, GpuSpec, MotherboardSpec, PeripheralSpec, PsuSpec,
    RamSpec, StorageSpec,
};
pub use constraints::{Constraints, ConstraintsBuilder, PeripheralPreferences};
pub use critique::{CritiqueItem, CritiqueReport, RecommendedChange};
pub use validation_result::{
    ErrorDetail, ErrorKind, ValidationError, ValidationResult, ValidationWarning, WarningDetail,
    WarningKind,
};
