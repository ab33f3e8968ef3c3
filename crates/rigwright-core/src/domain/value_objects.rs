//! Domain value objects: priorities, preferences, component kinds, severity.
//!
//! # Design
//!
//! These are plain `Copy` value types compared by value.
//! Each has a canonical lowercase string form, a case-insensitive `FromStr`
//! parser, and deserializes through that parser so that a collaborator
//! returning `"HIGH"` or `"Mid-Tower"` still produces a valid value while
//! anything outside the enumerated set is a schema violation.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm, the `FromStr` arm and the `VALUES` entry
//! 3. Done: serde and display follow

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wires `Display` and `TryFrom<String>` (used by serde) to the hand-written
/// `as_str` / `FromStr` pair of each value object.
macro_rules! string_value_object {
    ($($ty:ty),+ $(,)?) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl TryFrom<String> for $ty {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    )+};
}

string_value_object!(
    Priority,
    FormFactorPreference,
    NoiseTolerance,
    StorageKind,
    CoolingKind,
    Severity,
    Component,
);

// ── Priority ──────────────────────────────────────────────────────────────────

/// How much a component matters to the user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const VALUES: &'static [&'static str] = &["low", "medium", "high", "critical"];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl FromStr for Priority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(DomainError::InvalidChoice {
                field: "priority",
                value: s.into(),
                expected: Self::VALUES,
            }),
        }
    }
}

// ── FormFactorPreference ──────────────────────────────────────────────────────

/// Chassis size the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum FormFactorPreference {
    MiniItx,
    MicroAtx,
    #[default]
    MidTower,
    FullTower,
}

impl FormFactorPreference {
    pub const VALUES: &'static [&'static str] = &["mini-itx", "micro-atx", "mid-tower", "full-tower"];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MiniItx => "mini-itx",
            Self::MicroAtx => "micro-atx",
            Self::MidTower => "mid-tower",
            Self::FullTower => "full-tower",
        }
    }
}

impl FromStr for FormFactorPreference {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mini-itx" => Ok(Self::MiniItx),
            "micro-atx" => Ok(Self::MicroAtx),
            "mid-tower" => Ok(Self::MidTower),
            "full-tower" => Ok(Self::FullTower),
            _ => Err(DomainError::InvalidChoice {
                field: "form_factor",
                value: s.into(),
                expected: Self::VALUES,
            }),
        }
    }
}

// ── NoiseTolerance ────────────────────────────────────────────────────────────

/// How loud the user is willing to let the machine be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum NoiseTolerance {
    /// Quiet build.
    Low,
    #[default]
    Medium,
    /// Performance over acoustics.
    High,
}

impl NoiseTolerance {
    pub const VALUES: &'static [&'static str] = &["low", "medium", "high"];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for NoiseTolerance {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(DomainError::InvalidChoice {
                field: "noise_tolerance",
                value: s.into(),
                expected: Self::VALUES,
            }),
        }
    }
}

// ── StorageKind ───────────────────────────────────────────────────────────────

/// Physical drive technology; decides which motherboard port it consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum StorageKind {
    /// M.2 NVMe drive (uses an M.2 slot).
    Nvme,
    /// 2.5" SATA SSD (uses a SATA port).
    Ssd,
    /// Spinning disk (uses a SATA port).
    Hdd,
}

impl StorageKind {
    pub const VALUES: &'static [&'static str] = &["nvme", "ssd", "hdd"];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Nvme => "nvme",
            Self::Ssd => "ssd",
            Self::Hdd => "hdd",
        }
    }

    pub const fn uses_m2_slot(self) -> bool {
        matches!(self, Self::Nvme)
    }

    pub const fn uses_sata_port(self) -> bool {
        matches!(self, Self::Ssd | Self::Hdd)
    }
}

impl FromStr for StorageKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nvme" => Ok(Self::Nvme),
            "ssd" => Ok(Self::Ssd),
            "hdd" => Ok(Self::Hdd),
            _ => Err(DomainError::InvalidChoice {
                field: "storage type",
                value: s.into(),
                expected: Self::VALUES,
            }),
        }
    }
}

// ── CoolingKind ───────────────────────────────────────────────────────────────

/// CPU cooler technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum CoolingKind {
    Air,
    /// All-in-one liquid cooler with a radiator and pump.
    Aio,
    Custom,
}

impl CoolingKind {
    pub const VALUES: &'static [&'static str] = &["air", "aio", "custom"];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Air => "air",
            Self::Aio => "aio",
            Self::Custom => "custom",
        }
    }
}

impl FromStr for CoolingKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "air" => Ok(Self::Air),
            "aio" | "liquid" => Ok(Self::Aio),
            "custom" => Ok(Self::Custom),
            _ => Err(DomainError::InvalidChoice {
                field: "cooling type",
                value: s.into(),
                expected: Self::VALUES,
            }),
        }
    }
}

// ── Severity ──────────────────────────────────────────────────────────────────

/// Warning severity. Errors carry no severity: every error invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const VALUES: &'static [&'static str] = &["low", "medium", "high"];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for Severity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(DomainError::InvalidChoice {
                field: "severity",
                value: s.into(),
                expected: Self::VALUES,
            }),
        }
    }
}

// ── Component ─────────────────────────────────────────────────────────────────

/// A build slot, used to tag which parts a validation issue involves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Component {
    Cpu,
    Gpu,
    Motherboard,
    Ram,
    Storage,
    Psu,
    Cooling,
    Chassis,
}

impl Component {
    pub const VALUES: &'static [&'static str] = &[
        "cpu",
        "gpu",
        "motherboard",
        "ram",
        "storage",
        "psu",
        "cooling",
        "chassis",
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Gpu => "gpu",
            Self::Motherboard => "motherboard",
            Self::Ram => "ram",
            Self::Storage => "storage",
            Self::Psu => "psu",
            Self::Cooling => "cooling",
            Self::Chassis => "chassis",
        }
    }
}

impl FromStr for Component {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpu" => Ok(Self::Cpu),
            "gpu" => Ok(Self::Gpu),
            "motherboard" | "mobo" => Ok(Self::Motherboard),
            "ram" | "memory" => Ok(Self::Ram),
            "storage" => Ok(Self::Storage),
            "psu" => Ok(Self::Psu),
            "cooling" | "cooler" => Ok(Self::Cooling),
            "chassis" | "case" => Ok(Self::Chassis),
            _ => Err(DomainError::InvalidChoice {
                field: "component",
                value: s.into(),
                expected: Self::VALUES,
            }),
        }
    }
}

// ── EfficiencyRating ──────────────────────────────────────────────────────────

/// 80 PLUS certification tier of a power supply.
///
/// PSU specs carry the certification as free text (`"80+ Gold"`); this type
/// is the normalised reading of that label. Unrecognised labels have no
/// rating and fall back to [`EfficiencyRating::DEFAULT_MULTIPLIER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EfficiencyRating {
    /// Plain "80+" with no metal tier.
    Standard,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Titanium,
}

impl EfficiencyRating {
    /// Multiplier applied when a label is not recognised (Bronze-equivalent).
    pub const DEFAULT_MULTIPLIER: f64 = 0.85;

    /// Fraction of rated wattage treated as usable capacity.
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Titanium => 0.96,
            Self::Platinum => 0.94,
            Self::Gold => 0.90,
            Self::Silver => 0.88,
            Self::Bronze => 0.85,
            Self::Standard => 0.82,
        }
    }

    /// Read a certification label.
    ///
    /// Accepts `"80+ Gold"`, `"80 PLUS Gold"`, `"80plus gold"` and the bare
    /// tier name `"Gold"`; `"80+"` / `"80 Plus"` alone is [`Self::Standard`].
    pub fn from_label(label: &str) -> Option<Self> {
        let normalised: String = label
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect();
        let tier = normalised
            .strip_prefix("80plus")
            .or_else(|| normalised.strip_prefix("80+"))
            .unwrap_or(&normalised);

        match tier {
            "" if normalised != tier => Some(Self::Standard),
            "titanium" => Some(Self::Titanium),
            "platinum" => Some(Self::Platinum),
            "gold" => Some(Self::Gold),
            "silver" => Some(Self::Silver),
            "bronze" => Some(Self::Bronze),
            "white" | "standard" => Some(Self::Standard),
            _ => None,
        }
    }

    /// Multiplier for a free-text label, with the default for unknown labels.
    pub fn multiplier_for_label(label: &str) -> f64 {
        Self::from_label(label).map_or(Self::DEFAULT_MULTIPLIER, Self::multiplier)
    }
}
