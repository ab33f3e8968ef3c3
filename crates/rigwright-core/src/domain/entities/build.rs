//! Complete PC build specification.
//!
//! A [`Build`] is an immutable value: the generator returns a fresh one on
//! every revision and the validator only reads it. Units are fixed per field
//! (GB, GHz, W, mm, TB, USD, MHz, dB) and encoded in the field names.
//!
//! Optional physical dimensions (`length_mm`, `height_mm`, ...) of `0` are
//! treated the same as absent: the clearance checks skip them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::common::{at_least, non_blank, non_negative, null_as_default, positive, within};
use crate::domain::error::DomainError;
use crate::domain::value_objects::{CoolingKind, StorageKind};

const fn default_gpu_slots() -> u32 {
    2
}
const fn default_ram_modules() -> u32 {
    2
}
const fn default_fan_count() -> u32 {
    1
}
fn default_psu_form_factor() -> String {
    "ATX".into()
}

/// `Some(v)` only for a declared, non-zero dimension.
fn known(value: Option<u32>) -> Option<u32> {
    value.filter(|v| *v > 0)
}

// ── Components ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuSpec {
    pub model: String,
    pub brand: String,
    pub socket: String,
    pub cores: u32,
    pub threads: u32,
    pub base_clock_ghz: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost_clock_ghz: Option<f64>,
    pub tdp_w: u32,
    #[serde(default)]
    pub integrated_graphics: bool,
    pub price_usd: f64,
}

impl CpuSpec {
    fn validate(&self) -> Result<(), DomainError> {
        non_blank("cpu.model", &self.model)?;
        non_blank("cpu.socket", &self.socket)?;
        at_least("cpu.cores", self.cores, 2, ">= 2")?;
        at_least("cpu.threads", self.threads, 2, ">= 2")?;
        positive("cpu.base_clock_ghz", self.base_clock_ghz)?;
        if let Some(boost) = self.boost_clock_ghz {
            positive("cpu.boost_clock_ghz", boost)?;
        }
        at_least("cpu.tdp_w", self.tdp_w, 1, "> 0")?;
        non_negative("cpu.price_usd", self.price_usd)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuSpec {
    pub model: String,
    pub brand: String,
    pub chipset: String,
    pub vram_gb: u32,
    pub vram_type: String,
    pub tdp_w: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_mm: Option<u32>,
    #[serde(default = "default_gpu_slots")]
    pub pcie_slots: u32,
    /// Free-text label, e.g. `"2x 8-pin"` or `"1x 12VHPWR"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_connectors: Option<String>,
    pub price_usd: f64,
}

impl GpuSpec {
    pub fn known_length_mm(&self) -> Option<u32> {
        known(self.length_mm)
    }

    /// Whether the card needs a 16-pin 12VHPWR / 12V-2x6 cable.
    pub fn needs_high_power_connector(&self) -> bool {
        self.power_connectors.as_deref().is_some_and(|label| {
            let label = label.to_ascii_lowercase();
            label.contains("12vhpwr") || label.contains("12v-2x6")
        })
    }

    fn validate(&self) -> Result<(), DomainError> {
        non_blank("gpu.model", &self.model)?;
        at_least("gpu.vram_gb", self.vram_gb, 1, "> 0")?;
        at_least("gpu.tdp_w", self.tdp_w, 1, "> 0")?;
        within("gpu.pcie_slots", self.pcie_slots, 1, 4, "between 1 and 4")?;
        non_negative("gpu.price_usd", self.price_usd)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RamSpec {
    pub capacity_gb: u32,
    /// `"DDR4"` / `"DDR5"`, compared case-insensitively.
    #[serde(rename = "type")]
    pub ram_type: String,
    pub speed_mhz: u32,
    #[serde(default = "default_ram_modules")]
    pub modules: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cas_latency: Option<u32>,
    pub price_usd: f64,
}

impl RamSpec {
    fn validate(&self) -> Result<(), DomainError> {
        at_least("ram.capacity_gb", self.capacity_gb, 1, "> 0")?;
        non_blank("ram.type", &self.ram_type)?;
        at_least("ram.speed_mhz", self.speed_mhz, 1, "> 0")?;
        at_least("ram.modules", self.modules, 1, ">= 1")?;
        non_negative("ram.price_usd", self.price_usd)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSpec {
    #[serde(rename = "type")]
    pub kind: StorageKind,
    pub capacity_tb: f64,
    pub interface: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_speed_mbps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_speed_mbps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_factor: Option<String>,
    pub price_usd: f64,
}

impl StorageSpec {
    fn validate(&self) -> Result<(), DomainError> {
        positive("storage.capacity_tb", self.capacity_tb)?;
        non_negative("storage.price_usd", self.price_usd)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotherboardSpec {
    pub model: String,
    pub chipset: String,
    pub socket: String,
    /// `"Mini-ITX"`, `"Micro-ATX"`, `"ATX"`, `"E-ATX"`.
    pub form_factor: String,
    pub ram_type: String,
    pub ram_slots: u32,
    pub max_ram_gb: u32,
    pub m2_slots: u32,
    pub sata_ports: u32,
    /// Slot label → count, e.g. `{"x16": 2, "x1": 2}`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub pcie_slots: BTreeMap<String, u32>,
    pub price_usd: f64,
}

impl MotherboardSpec {
    fn validate(&self) -> Result<(), DomainError> {
        non_blank("motherboard.model", &self.model)?;
        non_blank("motherboard.socket", &self.socket)?;
        non_blank("motherboard.form_factor", &self.form_factor)?;
        non_blank("motherboard.ram_type", &self.ram_type)?;
        within("motherboard.ram_slots", self.ram_slots, 2, 8, "between 2 and 8")?;
        at_least("motherboard.max_ram_gb", self.max_ram_gb, 1, "> 0")?;
        non_negative("motherboard.price_usd", self.price_usd)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsuSpec {
    pub model: String,
    pub wattage: u32,
    /// Certification label such as `"80+ Gold"`.
    pub efficiency: String,
    /// `"full"`, `"semi"` or `"non"`.
    pub modular: String,
    #[serde(default = "default_psu_form_factor")]
    pub form_factor: String,
    /// Connector label → count, e.g. `{"8-pin": 4, "12VHPWR": 1}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pcie_connectors: Option<BTreeMap<String, u32>>,
    pub price_usd: f64,
}

impl PsuSpec {
    /// Declared connector inventory; `None` when absent or empty.
    pub fn declared_connectors(&self) -> Option<&BTreeMap<String, u32>> {
        self.pcie_connectors.as_ref().filter(|c| !c.is_empty())
    }

    /// Case-insensitive lookup of a connector label in the inventory.
    pub fn has_connector(&self, label: &str) -> bool {
        self.declared_connectors()
            .is_some_and(|c| c.keys().any(|k| k.trim().eq_ignore_ascii_case(label)))
    }

    fn validate(&self) -> Result<(), DomainError> {
        non_blank("psu.model", &self.model)?;
        at_least("psu.wattage", self.wattage, 1, "> 0")?;
        non_negative("psu.price_usd", self.price_usd)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoolingSpec {
    #[serde(rename = "type")]
    pub kind: CoolingKind,
    pub model: String,
    pub tdp_rating_w: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_mm: Option<u32>,
    /// AIO radiator length: 120, 240, 280, 360, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radiator_size_mm: Option<u32>,
    #[serde(default = "default_fan_count")]
    pub fan_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise_level_db: Option<f64>,
    pub price_usd: f64,
}

impl CoolingSpec {
    pub fn known_height_mm(&self) -> Option<u32> {
        known(self.height_mm)
    }

    pub fn known_radiator_mm(&self) -> Option<u32> {
        known(self.radiator_size_mm)
    }

    fn validate(&self) -> Result<(), DomainError> {
        non_blank("cooling.model", &self.model)?;
        at_least("cooling.tdp_rating_w", self.tdp_rating_w, 1, "> 0")?;
        at_least("cooling.fan_count", self.fan_count, 1, ">= 1")?;
        non_negative("cooling.price_usd", self.price_usd)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChassisSpec {
    pub model: String,
    pub form_factor: String,
    /// Motherboard form factors that fit, e.g. `["Micro-ATX", "ATX"]`.
    pub motherboard_support: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_gpu_length_mm: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cpu_cooler_height_mm: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radiator_support: Option<Vec<u32>>,
    #[serde(default)]
    pub included_fans: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub price_usd: f64,
}

impl ChassisSpec {
    pub fn known_max_gpu_length_mm(&self) -> Option<u32> {
        known(self.max_gpu_length_mm)
    }

    pub fn known_max_cooler_height_mm(&self) -> Option<u32> {
        known(self.max_cpu_cooler_height_mm)
    }

    /// Declared radiator sizes; `None` when absent or empty.
    pub fn declared_radiators(&self) -> Option<&[u32]> {
        self.radiator_support.as_deref().filter(|r| !r.is_empty())
    }

    pub fn supports_motherboard(&self, form_factor: &str) -> bool {
        self.motherboard_support
            .iter()
            .any(|ff| ff.trim().eq_ignore_ascii_case(form_factor.trim()))
    }

    fn validate(&self) -> Result<(), DomainError> {
        non_blank("chassis.model", &self.model)?;
        non_negative("chassis.price_usd", self.price_usd)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeripheralSpec {
    /// `"monitor"`, `"keyboard"`, `"mouse"`, `"headphones"`, `"speakers"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub model: String,
    pub price_usd: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specs: Option<BTreeMap<String, serde_json::Value>>,
}

// ── Build ─────────────────────────────────────────────────────────────────────

/// A complete PC build.
///
/// `storage` is never empty once validated; secondary drives go in
/// `additional_storage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Build {
    pub cpu: CpuSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu: Option<GpuSpec>,
    pub motherboard: MotherboardSpec,
    pub ram: RamSpec,
    pub storage: Vec<StorageSpec>,
    pub psu: PsuSpec,
    pub cooling: CoolingSpec,
    pub chassis: ChassisSpec,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub additional_storage: Vec<StorageSpec>,
    /// Extra case fans beyond those included with the chassis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_fans: Option<u32>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub peripherals: Vec<PeripheralSpec>,

    pub estimated_cost_usd: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_tdp_w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl Build {
    /// Parse and validate a JSON document.
    pub fn from_json(value: serde_json::Value) -> Result<Self, DomainError> {
        let build: Self = serde_json::from_value(value).map_err(|e| DomainError::Malformed {
            entity: "build",
            reason: e.to_string(),
        })?;
        build.validate()?;
        Ok(build)
    }

    /// Schema-level checks. Compatibility is the validator's job.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.storage.is_empty() {
            return Err(DomainError::EmptyStorage);
        }

        self.cpu.validate()?;
        if let Some(gpu) = &self.gpu {
            gpu.validate()?;
        }
        self.motherboard.validate()?;
        self.ram.validate()?;
        for drive in self.all_storage() {
            drive.validate()?;
        }
        self.psu.validate()?;
        self.cooling.validate()?;
        self.chassis.validate()?;
        for peripheral in &self.peripherals {
            non_negative("peripherals.price_usd", peripheral.price_usd)?;
        }

        non_negative("estimated_cost_usd", self.estimated_cost_usd)
    }

    /// Primary then secondary drives.
    pub fn all_storage(&self) -> impl Iterator<Item = &StorageSpec> {
        self.storage.iter().chain(self.additional_storage.iter())
    }

    pub fn total_storage_tb(&self) -> f64 {
        self.all_storage().map(|s| s.capacity_tb).sum()
    }

    /// Sum of every component price, including GPU, secondary drives and
    /// peripherals.
    pub fn calculate_total_cost(&self) -> f64 {
        let core = self.cpu.price_usd
            + self.motherboard.price_usd
            + self.ram.price_usd
            + self.psu.price_usd
            + self.cooling.price_usd
            + self.chassis.price_usd;

        core + self.gpu.as_ref().map_or(0.0, |g| g.price_usd)
            + self.all_storage().map(|s| s.price_usd).sum::<f64>()
            + self.peripherals.iter().map(|p| p.price_usd).sum::<f64>()
    }

    /// Fans drawing power: cooler fans, extra case fans, chassis fans.
    pub fn fan_count(&self) -> u32 {
        self.cooling
            .fan_count
            .saturating_add(self.case_fans.unwrap_or(0))
            .saturating_add(self.chassis.included_fans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "cpu": {
                "model": "Ryzen 5 7600", "brand": "amd", "socket": "AM5",
                "cores": 6, "threads": 12, "base_clock_ghz": 3.8, "boost_clock_ghz": 5.1,
                "tdp_w": 65, "integrated_graphics": true, "price_usd": 229.99
            },
            "motherboard": {
                "model": "MSI B650 TOMAHAWK", "chipset": "B650", "socket": "AM5",
                "form_factor": "ATX", "ram_type": "DDR5", "ram_slots": 4,
                "max_ram_gb": 128, "m2_slots": 2, "sata_ports": 4,
                "pcie_slots": {"x16": 1, "x1": 2}, "price_usd": 219.99
            },
            "ram": {
                "capacity_gb": 32, "type": "DDR5", "speed_mhz": 6000,
                "modules": 2, "cas_latency": 30, "price_usd": 109.99
            },
            "storage": [{
                "type": "nvme", "capacity_tb": 1.0, "interface": "PCIe 4.0 x4",
                "price_usd": 89.99
            }],
            "psu": {
                "model": "Corsair RM750e", "wattage": 750, "efficiency": "80+ Gold",
                "modular": "full", "pcie_connectors": {"8-pin": 4, "6-pin": 2},
                "price_usd": 99.99
            },
            "cooling": {
                "type": "air", "model": "Thermalright Peerless Assassin 120",
                "tdp_rating_w": 220, "height_mm": 155, "fan_count": 2, "price_usd": 39.99
            },
            "chassis": {
                "model": "Fractal Meshify 2", "form_factor": "Mid-Tower",
                "motherboard_support": ["Mini-ITX", "Micro-ATX", "ATX"],
                "max_gpu_length_mm": 315, "max_cpu_cooler_height_mm": 185,
                "radiator_support": [240, 280, 360], "included_fans": 3,
                "price_usd": 119.99
            },
            "additional_storage": null,
            "estimated_cost_usd": 909.93
        })
    }

    #[test]
    fn parses_and_applies_defaults() {
        let build = Build::from_json(sample()).unwrap();

        assert_eq!(build.psu.form_factor, "ATX");
        assert_eq!(build.cooling.kind, CoolingKind::Air);
        assert!(build.additional_storage.is_empty());
        assert!(build.peripherals.is_empty());
        assert_eq!(build.fan_count(), 5);
    }

    #[test]
    fn total_cost_sums_components() {
        let build = Build::from_json(sample()).unwrap();
        assert!((build.calculate_total_cost() - 909.93).abs() < 0.01);
    }

    #[test]
    fn total_cost_includes_optional_parts() {
        let mut build = Build::from_json(sample()).unwrap();
        build.additional_storage.push(build.storage[0].clone());
        build.peripherals.push(PeripheralSpec {
            kind: "mouse".into(),
            model: "G305".into(),
            price_usd: 40.0,
            specs: None,
        });
        assert!((build.calculate_total_cost() - (909.93 + 89.99 + 40.0)).abs() < 0.01);
    }

    #[test]
    fn empty_storage_rejected() {
        let mut doc = sample();
        doc["storage"] = json!([]);
        assert_eq!(Build::from_json(doc).unwrap_err(), DomainError::EmptyStorage);
    }

    #[test]
    fn unknown_storage_type_rejected() {
        let mut doc = sample();
        doc["storage"][0]["type"] = json!("tape");
        assert!(matches!(
            Build::from_json(doc),
            Err(DomainError::Malformed { entity: "build", .. })
        ));
    }

    #[test]
    fn out_of_range_component_rejected() {
        let mut doc = sample();
        doc["cpu"]["cores"] = json!(1);
        assert!(matches!(
            Build::from_json(doc),
            Err(DomainError::OutOfRange { ref field, .. }) if field == "cpu.cores"
        ));
    }

    #[test]
    fn zero_dimensions_are_unknown() {
        let mut build = Build::from_json(sample()).unwrap();
        build.chassis.max_gpu_length_mm = Some(0);
        build.cooling.height_mm = Some(0);
        assert_eq!(build.chassis.known_max_gpu_length_mm(), None);
        assert_eq!(build.cooling.known_height_mm(), None);
    }

    #[test]
    fn connector_lookup_ignores_case() {
        let mut build = Build::from_json(sample()).unwrap();
        assert!(build.psu.has_connector("8-PIN"));
        assert!(!build.psu.has_connector("12VHPWR"));

        build.psu.pcie_connectors = Some(BTreeMap::new());
        assert!(build.psu.declared_connectors().is_none());
    }
}
