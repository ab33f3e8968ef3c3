//! Normalised user requirements for a build.
//!
//! `Constraints` is what natural-language extraction produces and what the
//! build generator and critic consume. Every qualitative input has already
//! been resolved to a concrete value; enumerated fields are typed value
//! objects so an unknown choice cannot be represented at all.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::common::{non_blank, null_as_default, positive, within};
use crate::domain::error::DomainError;
use crate::domain::value_objects::{
    CoolingKind, FormFactorPreference, NoiseTolerance, Priority, StorageKind,
};

mod defaults {
    use crate::domain::value_objects::StorageKind;

    pub(super) const fn flexibility() -> f64 {
        5.0
    }
    pub(super) const fn ram_min_gb() -> u32 {
        16
    }
    pub(super) const fn storage_min_tb() -> f64 {
        1.0
    }
    pub(super) const fn storage_kind() -> Option<StorageKind> {
        Some(StorageKind::Nvme)
    }
    pub(super) const fn upgrade_horizon() -> u32 {
        3
    }
}

/// Which peripherals the user wants included in the build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeripheralPreferences {
    pub monitor: bool,
    pub keyboard: bool,
    pub mouse: bool,
    pub audio: bool,
    pub headphones: bool,
}

impl PeripheralPreferences {
    pub fn any(&self) -> bool {
        self.monitor || self.keyboard || self.mouse || self.audio || self.headphones
    }

    /// Names of the requested peripherals, in a fixed order.
    pub fn requested(&self) -> Vec<&'static str> {
        [
            (self.monitor, "monitor"),
            (self.keyboard, "keyboard"),
            (self.mouse, "mouse"),
            (self.audio, "audio"),
            (self.headphones, "headphones"),
        ]
        .into_iter()
        .filter_map(|(wanted, name)| wanted.then_some(name))
        .collect()
    }
}

/// Normalised user constraints for build generation.
///
/// Invariants (checked by [`Constraints::validate`], which every constructor
/// runs):
/// - `budget_usd > 0`
/// - `0 <= budget_flexibility_pct <= 20`
/// - `primary_workloads` non-empty, no blank tags
/// - `ram_min_gb >= 8`, `storage_min_tb >= 0.25`
/// - `1 <= upgrade_horizon_years <= 5`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    pub budget_usd: f64,
    #[serde(default = "defaults::flexibility")]
    pub budget_flexibility_pct: f64,

    pub primary_workloads: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workload_weights: Option<BTreeMap<String, f64>>,

    #[serde(default)]
    pub gpu_priority: Priority,
    #[serde(default)]
    pub cpu_priority: Priority,

    #[serde(default = "defaults::ram_min_gb")]
    pub ram_min_gb: u32,
    #[serde(default = "defaults::storage_min_tb")]
    pub storage_min_tb: f64,
    #[serde(default = "defaults::storage_kind")]
    pub storage_type_preference: Option<StorageKind>,

    #[serde(default)]
    pub form_factor: FormFactorPreference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_preference: Option<String>,

    #[serde(default)]
    pub noise_tolerance: NoiseTolerance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooling_preference: Option<CoolingKind>,

    #[serde(default = "defaults::upgrade_horizon")]
    pub upgrade_horizon_years: u32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub peripherals: PeripheralPreferences,

    /// component → preferred brands
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_preferences: Option<BTreeMap<String, Vec<String>>>,
    /// component → brands to avoid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_brands: Option<BTreeMap<String, Vec<String>>>,
}

impl Constraints {
    /// Start building constraints for a budget and at least one workload.
    pub fn builder(budget_usd: f64) -> ConstraintsBuilder {
        ConstraintsBuilder::new(budget_usd)
    }

    /// Parse and validate a JSON document.
    pub fn from_json(value: serde_json::Value) -> Result<Self, DomainError> {
        let constraints: Self =
            serde_json::from_value(value).map_err(|e| DomainError::Malformed {
                entity: "constraints",
                reason: e.to_string(),
            })?;
        constraints.validate()?;
        Ok(constraints)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        positive("budget_usd", self.budget_usd)?;

        let flex = self.budget_flexibility_pct;
        if !(flex.is_finite() && (0.0..=20.0).contains(&flex)) {
            return Err(DomainError::out_of_range(
                "budget_flexibility_pct",
                flex,
                "between 0 and 20",
            ));
        }

        if self.primary_workloads.is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "primary_workloads",
            });
        }
        for workload in &self.primary_workloads {
            non_blank("primary_workloads", workload)?;
        }

        if self.ram_min_gb < 8 {
            return Err(DomainError::out_of_range("ram_min_gb", self.ram_min_gb, ">= 8"));
        }
        if !(self.storage_min_tb.is_finite() && self.storage_min_tb >= 0.25) {
            return Err(DomainError::out_of_range(
                "storage_min_tb",
                self.storage_min_tb,
                ">= 0.25",
            ));
        }

        within(
            "upgrade_horizon_years",
            self.upgrade_horizon_years,
            1,
            5,
            "between 1 and 5",
        )?;

        if let Some(weights) = &self.workload_weights {
            for (workload, weight) in weights {
                if !(weight.is_finite() && *weight >= 0.0) {
                    return Err(DomainError::out_of_range(
                        format!("workload_weights.{workload}"),
                        weight,
                        ">= 0",
                    ));
                }
            }
        }

        Ok(())
    }

    /// Hard ceiling including the allowed overage.
    pub fn max_budget_usd(&self) -> f64 {
        self.budget_usd * (1.0 + self.budget_flexibility_pct / 100.0)
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Builder for [`Constraints`]; `build()` runs the same validation as
/// deserialization.
#[derive(Debug, Clone)]
pub struct ConstraintsBuilder {
    inner: Constraints,
}

impl ConstraintsBuilder {
    fn new(budget_usd: f64) -> Self {
        Self {
            inner: Constraints {
                budget_usd,
                budget_flexibility_pct: defaults::flexibility(),
                primary_workloads: Vec::new(),
                workload_weights: None,
                gpu_priority: Priority::default(),
                cpu_priority: Priority::default(),
                ram_min_gb: defaults::ram_min_gb(),
                storage_min_tb: defaults::storage_min_tb(),
                storage_type_preference: defaults::storage_kind(),
                form_factor: FormFactorPreference::default(),
                color_preference: None,
                noise_tolerance: NoiseTolerance::default(),
                cooling_preference: None,
                upgrade_horizon_years: defaults::upgrade_horizon(),
                peripherals: PeripheralPreferences::default(),
                brand_preferences: None,
                exclude_brands: None,
            },
        }
    }

    pub fn workload(mut self, workload: impl Into<String>) -> Self {
        self.inner.primary_workloads.push(workload.into());
        self
    }

    pub fn flexibility_pct(mut self, pct: f64) -> Self {
        self.inner.budget_flexibility_pct = pct;
        self
    }

    pub fn gpu_priority(mut self, priority: Priority) -> Self {
        self.inner.gpu_priority = priority;
        self
    }

    pub fn cpu_priority(mut self, priority: Priority) -> Self {
        self.inner.cpu_priority = priority;
        self
    }

    pub fn ram_min_gb(mut self, gb: u32) -> Self {
        self.inner.ram_min_gb = gb;
        self
    }

    pub fn storage_min_tb(mut self, tb: f64) -> Self {
        self.inner.storage_min_tb = tb;
        self
    }

    pub fn storage_type(mut self, kind: Option<StorageKind>) -> Self {
        self.inner.storage_type_preference = kind;
        self
    }

    pub fn form_factor(mut self, form_factor: FormFactorPreference) -> Self {
        self.inner.form_factor = form_factor;
        self
    }

    pub fn noise_tolerance(mut self, noise: NoiseTolerance) -> Self {
        self.inner.noise_tolerance = noise;
        self
    }

    pub fn cooling(mut self, cooling: CoolingKind) -> Self {
        self.inner.cooling_preference = Some(cooling);
        self
    }

    pub fn upgrade_horizon_years(mut self, years: u32) -> Self {
        self.inner.upgrade_horizon_years = years;
        self
    }

    pub fn peripherals(mut self, peripherals: PeripheralPreferences) -> Self {
        self.inner.peripherals = peripherals;
        self
    }

    pub fn prefer_brand(mut self, component: impl Into<String>, brand: impl Into<String>) -> Self {
        self.inner
            .brand_preferences
            .get_or_insert_with(BTreeMap::new)
            .entry(component.into())
            .or_default()
            .push(brand.into());
        self
    }

    pub fn exclude_brand(mut self, component: impl Into<String>, brand: impl Into<String>) -> Self {
        self.inner
            .exclude_brands
            .get_or_insert_with(BTreeMap::new)
            .entry(component.into())
            .or_default()
            .push(brand.into());
        self
    }

    pub fn build(self) -> Result<Constraints, DomainError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_apply_when_fields_missing() {
        let c = Constraints::from_json(json!({
            "budget_usd": 1500,
            "primary_workloads": ["gaming"]
        }))
        .unwrap();

        assert_eq!(c.budget_flexibility_pct, 5.0);
        assert_eq!(c.ram_min_gb, 16);
        assert_eq!(c.storage_min_tb, 1.0);
        assert_eq!(c.storage_type_preference, Some(StorageKind::Nvme));
        assert_eq!(c.form_factor, FormFactorPreference::MidTower);
        assert_eq!(c.noise_tolerance, NoiseTolerance::Medium);
        assert_eq!(c.gpu_priority, Priority::Medium);
        assert_eq!(c.upgrade_horizon_years, 3);
        assert!(!c.peripherals.any());
    }

    #[test]
    fn enumerated_fields_parse_case_insensitively() {
        let c = Constraints::from_json(json!({
            "budget_usd": 2000,
            "primary_workloads": ["ml"],
            "gpu_priority": "CRITICAL",
            "form_factor": "Mini-ITX",
            "noise_tolerance": "Low",
            "cooling_preference": "AIO"
        }))
        .unwrap();

        assert_eq!(c.gpu_priority, Priority::Critical);
        assert_eq!(c.form_factor, FormFactorPreference::MiniItx);
        assert_eq!(c.noise_tolerance, NoiseTolerance::Low);
        assert_eq!(c.cooling_preference, Some(CoolingKind::Aio));
    }

    #[test]
    fn unknown_priority_is_a_schema_violation() {
        let err = Constraints::from_json(json!({
            "budget_usd": 1000,
            "primary_workloads": ["gaming"],
            "gpu_priority": "extreme"
        }))
        .unwrap_err();

        assert!(matches!(err, DomainError::Malformed { entity: "constraints", .. }));
    }

    #[test]
    fn numeric_ranges_enforced() {
        let base = || Constraints::builder(1200.0).workload("gaming");

        assert!(base().build().is_ok());
        assert!(Constraints::builder(0.0).workload("gaming").build().is_err());
        assert!(base().flexibility_pct(25.0).build().is_err());
        assert!(base().ram_min_gb(4).build().is_err());
        assert!(base().storage_min_tb(0.1).build().is_err());
        assert!(base().upgrade_horizon_years(0).build().is_err());
        assert!(base().upgrade_horizon_years(6).build().is_err());
    }

    #[test]
    fn workloads_required() {
        let err = Constraints::builder(1200.0).build().unwrap_err();
        assert_eq!(
            err,
            DomainError::MissingRequiredField {
                field: "primary_workloads"
            }
        );
    }

    #[test]
    fn null_peripherals_become_defaults() {
        let c = Constraints::from_json(json!({
            "budget_usd": 900,
            "primary_workloads": ["productivity"],
            "peripherals": null
        }))
        .unwrap();
        assert_eq!(c.peripherals, PeripheralPreferences::default());
    }

    #[test]
    fn builder_collects_brands() {
        let c = Constraints::builder(1800.0)
            .workload("gaming")
            .prefer_brand("gpu", "nvidia")
            .prefer_brand("gpu", "amd")
            .exclude_brand("cpu", "intel")
            .build()
            .unwrap();

        let prefs = c.brand_preferences.unwrap();
        assert_eq!(prefs["gpu"], vec!["nvidia", "amd"]);
        assert_eq!(c.exclude_brands.unwrap()["cpu"], vec!["intel"]);
    }

    #[test]
    fn max_budget_includes_flexibility() {
        let c = Constraints::builder(1000.0)
            .workload("gaming")
            .flexibility_pct(10.0)
            .build()
            .unwrap();
        assert!((c.max_budget_usd() - 1100.0).abs() < 1e-9);
    }
}
