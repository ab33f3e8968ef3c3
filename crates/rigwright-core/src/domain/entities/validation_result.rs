//! Outcome of validating one build.
//!
//! Errors and warnings are *data*, never raised. An error is a hard
//! violation (the build cannot be assembled or will not run); a warning is a
//! risk or a suboptimal choice on an otherwise valid build.
//!
//! ```text
//! ValidationResult
//! ├── errors:   Vec<ValidationError>    kind ← ErrorDetail
//! ├── warnings: Vec<ValidationWarning>  kind ← WarningDetail, severity
//! └── metrics:  BTreeMap<String, f64>   power figures
//! ```
//!
//! Validity is never stored: `is_valid()` is `errors.is_empty()`.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::domain::value_objects::{Component, Severity};

// ── Kinds ─────────────────────────────────────────────────────────────────────

/// Fixed taxonomy of hard violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    SocketMismatch,
    RamTypeMismatch,
    FormFactorIncompatible,
    GpuTooLong,
    CoolerTooTall,
    RadiatorNotSupported,
    InsufficientPsu,
    MissingPowerConnectors,
    CoolingInsufficient,
    InsufficientRamSlots,
    InsufficientM2Slots,
    InsufficientSataPorts,
    MissingGpu,
}

impl ErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SocketMismatch => "socket_mismatch",
            Self::RamTypeMismatch => "ram_type_mismatch",
            Self::FormFactorIncompatible => "form_factor_incompatible",
            Self::GpuTooLong => "gpu_too_long",
            Self::CoolerTooTall => "cooler_too_tall",
            Self::RadiatorNotSupported => "radiator_not_supported",
            Self::InsufficientPsu => "insufficient_psu",
            Self::MissingPowerConnectors => "missing_power_connectors",
            Self::CoolingInsufficient => "cooling_insufficient",
            Self::InsufficientRamSlots => "insufficient_ram_slots",
            Self::InsufficientM2Slots => "insufficient_m2_slots",
            Self::InsufficientSataPorts => "insufficient_sata_ports",
            Self::MissingGpu => "missing_gpu",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed taxonomy of soft findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    LowPsuHeadroom,
    EfficiencySuboptimal,
    ThermalRisk,
    RamSpeedMismatch,
    TightFit,
    ClearanceMinimal,
    NoSpareSlots,
}

impl WarningKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LowPsuHeadroom => "low_psu_headroom",
            Self::EfficiencySuboptimal => "efficiency_suboptimal",
            Self::ThermalRisk => "thermal_risk",
            Self::RamSpeedMismatch => "ram_speed_mismatch",
            Self::TightFit => "tight_fit",
            Self::ClearanceMinimal => "clearance_minimal",
            Self::NoSpareSlots => "no_spare_slots",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Details ───────────────────────────────────────────────────────────────────

/// Typed context for an error: expected vs actual values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "detail", rename_all = "snake_case")]
pub enum ErrorDetail {
    SocketMismatch {
        cpu_socket: String,
        cpu_model: String,
        motherboard_socket: String,
        motherboard_model: String,
    },
    RamTypeMismatch {
        ram_type: String,
        ram_capacity_gb: u32,
        motherboard_ram_type: String,
        motherboard_model: String,
    },
    RamCapacityExceeded {
        ram_capacity_gb: u32,
        motherboard_max_gb: u32,
    },
    RamSlotsExceeded {
        ram_modules: u32,
        motherboard_slots: u32,
    },
    FormFactorIncompatible {
        motherboard_form_factor: String,
        chassis_supports: Vec<String>,
        chassis_model: String,
    },
    GpuTooLong {
        gpu_length_mm: u32,
        chassis_max_mm: u32,
        overhang_mm: u32,
    },
    CoolerTooTall {
        cooler_height_mm: u32,
        chassis_max_mm: u32,
        overhang_mm: u32,
    },
    RadiatorNotSupported {
        radiator_size_mm: u32,
        chassis_supports: Vec<u32>,
    },
    CoolingInsufficient {
        cpu_tdp_w: u32,
        cooler_rating_w: u32,
        shortfall_w: u32,
    },
    InsufficientM2Slots {
        m2_required: u32,
        m2_available: u32,
    },
    InsufficientSataPorts {
        sata_required: u32,
        sata_available: u32,
    },
    MissingGpu {
        cpu_model: String,
        cpu_has_igpu: bool,
    },
    /// Effective PSU capacity below the estimated draw.
    PsuOverloaded {
        estimated_draw_w: u32,
        psu_rated_wattage: u32,
        psu_effective_wattage: u32,
        shortfall_w: u32,
    },
    /// Effective headroom below the critical threshold.
    PsuHeadroomCritical {
        estimated_draw_w: u32,
        effective_wattage: u32,
        headroom_pct: f64,
        minimum_required_pct: f64,
    },
    MissingPowerConnectors {
        gpu_connectors_required: String,
        psu_connectors_available: BTreeMap<String, u32>,
    },
}

impl ErrorDetail {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::SocketMismatch { .. } => ErrorKind::SocketMismatch,
            Self::RamTypeMismatch { .. } => ErrorKind::RamTypeMismatch,
            Self::RamCapacityExceeded { .. } | Self::RamSlotsExceeded { .. } => {
                ErrorKind::InsufficientRamSlots
            }
            Self::FormFactorIncompatible { .. } => ErrorKind::FormFactorIncompatible,
            Self::GpuTooLong { .. } => ErrorKind::GpuTooLong,
            Self::CoolerTooTall { .. } => ErrorKind::CoolerTooTall,
            Self::RadiatorNotSupported { .. } => ErrorKind::RadiatorNotSupported,
            Self::CoolingInsufficient { .. } => ErrorKind::CoolingInsufficient,
            Self::InsufficientM2Slots { .. } => ErrorKind::InsufficientM2Slots,
            Self::InsufficientSataPorts { .. } => ErrorKind::InsufficientSataPorts,
            Self::MissingGpu { .. } => ErrorKind::MissingGpu,
            Self::PsuOverloaded { .. } | Self::PsuHeadroomCritical { .. } => {
                ErrorKind::InsufficientPsu
            }
            Self::MissingPowerConnectors { .. } => ErrorKind::MissingPowerConnectors,
        }
    }
}

/// Typed context for a warning.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "detail", rename_all = "snake_case")]
pub enum WarningDetail {
    RamSlotsFull {
        ram_modules: u32,
        motherboard_slots: u32,
    },
    RamSpeedHigh {
        ram_speed_mhz: u32,
    },
    GpuClearanceTight {
        gpu_length_mm: u32,
        chassis_max_mm: u32,
        clearance_mm: u32,
    },
    GpuSlotWidth {
        gpu_pcie_slots: u32,
    },
    CoolerClearanceTight {
        cooler_height_mm: u32,
        chassis_max_mm: u32,
        clearance_mm: u32,
    },
    RadiatorSupportUnknown {
        radiator_size_mm: u32,
    },
    ThermalHeadroomLow {
        cpu_tdp_w: u32,
        cooler_rating_w: u32,
        headroom_pct: f64,
    },
    M2SlotsFull {
        m2_required: u32,
        m2_available: u32,
    },
    PsuHeadroomLow {
        estimated_draw_w: u32,
        effective_wattage: u32,
        headroom_pct: f64,
        recommended_pct: f64,
    },
    PsuConnectorsUnknown {
        gpu_tdp_w: u32,
        gpu_connectors_required: String,
    },
    EfficiencySuboptimal {
        current_efficiency: String,
        estimated_draw_w: u32,
    },
}

impl WarningDetail {
    pub const fn kind(&self) -> WarningKind {
        match self {
            Self::RamSlotsFull { .. } | Self::GpuSlotWidth { .. } | Self::M2SlotsFull { .. } => {
                WarningKind::NoSpareSlots
            }
            Self::RamSpeedHigh { .. } => WarningKind::RamSpeedMismatch,
            Self::GpuClearanceTight { .. } | Self::CoolerClearanceTight { .. } => {
                WarningKind::TightFit
            }
            Self::RadiatorSupportUnknown { .. } | Self::PsuConnectorsUnknown { .. } => {
                WarningKind::ClearanceMinimal
            }
            Self::ThermalHeadroomLow { .. } => WarningKind::ThermalRisk,
            Self::PsuHeadroomLow { .. } => WarningKind::LowPsuHeadroom,
            Self::EfficiencySuboptimal { .. } => WarningKind::EfficiencySuboptimal,
        }
    }
}

// ── Issues ────────────────────────────────────────────────────────────────────

/// `cpu+motherboard` style tag for a component list.
pub fn component_tag(components: &[Component]) -> String {
    components
        .iter()
        .map(Component::as_str)
        .collect::<Vec<_>>()
        .join("+")
}

/// Free-form context attached alongside the typed detail.
pub type Extra = BTreeMap<String, Value>;

/// A hard constraint violation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub components: Vec<Component>,
    pub message: String,
    pub detail: ErrorDetail,
    pub extra: Option<Extra>,
}

impl ValidationError {
    pub(crate) fn new(
        components: &[Component],
        message: impl Into<String>,
        detail: ErrorDetail,
    ) -> Self {
        Self {
            components: components.to_vec(),
            message: message.into(),
            detail,
            extra: None,
        }
    }

    pub(crate) fn with_extra(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.detail.kind()
    }

    pub fn component_tag(&self) -> String {
        component_tag(&self.components)
    }
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ValidationError", 5)?;
        s.serialize_field("type", &self.kind())?;
        s.serialize_field("component", &self.component_tag())?;
        s.serialize_field("message", &self.message)?;
        s.serialize_field("details", &self.detail)?;
        s.serialize_field("extra", &self.extra)?;
        s.end()
    }
}

/// A soft finding on an otherwise assemblable build.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    pub components: Vec<Component>,
    pub message: String,
    pub severity: Severity,
    pub detail: WarningDetail,
    pub extra: Option<Extra>,
}

impl ValidationWarning {
    pub(crate) fn new(
        components: &[Component],
        severity: Severity,
        message: impl Into<String>,
        detail: WarningDetail,
    ) -> Self {
        Self {
            components: components.to_vec(),
            message: message.into(),
            severity,
            detail,
            extra: None,
        }
    }

    pub(crate) fn with_extra(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value.into());
        self
    }

    pub fn kind(&self) -> WarningKind {
        self.detail.kind()
    }

    pub fn component_tag(&self) -> String {
        component_tag(&self.components)
    }
}

impl Serialize for ValidationWarning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ValidationWarning", 6)?;
        s.serialize_field("type", &self.kind())?;
        s.serialize_field("component", &self.component_tag())?;
        s.serialize_field("message", &self.message)?;
        s.serialize_field("severity", &self.severity)?;
        s.serialize_field("details", &self.detail)?;
        s.serialize_field("extra", &self.extra)?;
        s.end()
    }
}

// ── Result ────────────────────────────────────────────────────────────────────

/// Metric keys recorded by the power check.
pub mod metric {
    pub const ESTIMATED_POWER_DRAW_W: &str = "estimated_power_draw_w";
    pub const PSU_WATTAGE: &str = "psu_wattage";
    pub const PSU_HEADROOM_PCT: &str = "psu_headroom_pct";
    pub const EFFECTIVE_WATTAGE: &str = "effective_wattage";
    pub const EFFECTIVE_HEADROOM_PCT: &str = "effective_headroom_pct";
    pub const EFFICIENCY_MULTIPLIER: &str = "efficiency_multiplier";
}

/// Everything one validation pass found.
///
/// Only the validator mutates a result; consumers see it read-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationWarning>,
    metrics: BTreeMap<String, f64>,
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub(crate) fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    pub(crate) fn record_metric(&mut self, key: &str, value: f64) {
        self.metrics.insert(key.to_string(), value);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    pub fn metrics(&self) -> &BTreeMap<String, f64> {
        &self.metrics
    }

    pub fn metric(&self, key: &str) -> Option<f64> {
        self.metrics.get(key).copied()
    }

    pub fn has_error(&self, kind: ErrorKind) -> bool {
        self.errors.iter().any(|e| e.kind() == kind)
    }

    pub fn has_warning(&self, kind: WarningKind) -> bool {
        self.warnings.iter().any(|w| w.kind() == kind)
    }

    pub fn errors_of(&self, kind: ErrorKind) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(move |e| e.kind() == kind)
    }

    pub fn warnings_of(&self, kind: WarningKind) -> impl Iterator<Item = &ValidationWarning> {
        self.warnings.iter().filter(move |w| w.kind() == kind)
    }

    /// Errors that involve `component`.
    pub fn high_severity_warnings(&self) -> impl Iterator<Item = &ValidationWarning> {
        self.warnings
            .iter()
            .filter(|w| w.severity == Severity::High)
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    /// One-line human summary.
    pub fn summary(&self) -> String {
        match (self.is_valid(), self.warnings.len()) {
            (true, 0) => "Build is valid with no issues".into(),
            (true, n) => format!("Build is valid with {n} warning(s)"),
            (false, n) => format!(
                "Build is invalid: {} error(s), {n} warning(s)",
                self.errors.len()
            ),
        }
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ValidationResult", 4)?;
        s.serialize_field("is_valid", &self.is_valid())?;
        s.serialize_field("errors", &self.errors)?;
        s.serialize_field("warnings", &self.warnings)?;
        s.serialize_field("computed_metrics", &self.metrics)?;
        s.end()
    }
}
