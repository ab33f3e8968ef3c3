//! Power estimation and PSU checks.
//!
//! The estimate is deliberately coarse: rated TDPs plus fixed per-part
//! allowances. Every headroom decision uses the *effective* capacity
//! (rated wattage × efficiency multiplier, truncated to whole watts); the
//! raw rated headroom is recorded as a metric only.

use crate::domain::entities::validation_result::metric;
use crate::domain::entities::{
    Build, ErrorDetail, ValidationError, ValidationResult, ValidationWarning, WarningDetail,
};
use crate::domain::value_objects::{
    Component, CoolingKind, EfficiencyRating, Severity, StorageKind,
};

// ── Allowances (W) ────────────────────────────────────────────────────────────

pub const MOTHERBOARD_W: u32 = 60;
pub const FAN_W: u32 = 5;
pub const AIO_PUMP_W: u32 = 10;
pub const NVME_W: u32 = 8;
pub const SATA_SSD_W: u32 = 3;
pub const HDD_W: u32 = 8;

// ── Headroom thresholds (fraction of draw) ────────────────────────────────────

pub const CRITICAL_HEADROOM: f64 = 0.15;
pub const MINIMUM_HEADROOM: f64 = 0.20;
pub const RECOMMENDED_HEADROOM: f64 = 0.30;

/// Systems above this draw should not run on Bronze-or-worse units.
const EFFICIENCY_DRAW_THRESHOLD_W: u32 = 400;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

const fn storage_draw_w(kind: StorageKind) -> u32 {
    match kind {
        StorageKind::Nvme => NVME_W,
        StorageKind::Ssd => SATA_SSD_W,
        StorageKind::Hdd => HDD_W,
    }
}

/// Estimated total system draw in watts.
pub fn estimate_total_power_draw(build: &Build) -> u32 {
    let ram_w = (f64::from(build.ram.capacity_gb) / 8.0 * 4.0).round() as u32;
    let storage_w: u32 = build.all_storage().map(|s| storage_draw_w(s.kind)).sum();
    let pump_w = if build.cooling.kind == CoolingKind::Aio {
        AIO_PUMP_W
    } else {
        0
    };

    // Saturates: an absurd build reads as an enormous draw and fails the PSU check.
    [
        build.cpu.tdp_w,
        build.gpu.as_ref().map_or(0, |g| g.tdp_w),
        ram_w,
        storage_w,
        MOTHERBOARD_W,
        FAN_W.saturating_mul(build.fan_count()),
        pump_w,
    ]
    .into_iter()
    .fold(0, u32::saturating_add)
}

/// `(capacity - draw) / draw`; `1.0` for a zero draw.
pub fn calculate_headroom(capacity_w: u32, draw_w: u32) -> f64 {
    if draw_w == 0 {
        return 1.0;
    }
    (f64::from(capacity_w) - f64::from(draw_w)) / f64::from(draw_w)
}

/// Usable fraction of rated wattage for an efficiency label.
pub fn efficiency_multiplier(label: &str) -> f64 {
    EfficiencyRating::multiplier_for_label(label)
}

/// Every power figure for one build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerEstimate {
    pub draw_w: u32,
    pub psu_wattage: u32,
    pub multiplier: f64,
    pub effective_wattage: u32,
    /// Rated headroom, informational.
    pub raw_headroom: f64,
    pub effective_headroom: f64,
}

impl PowerEstimate {
    pub fn for_build(build: &Build) -> Self {
        let draw_w = estimate_total_power_draw(build);
        let psu_wattage = build.psu.wattage;
        let multiplier = efficiency_multiplier(&build.psu.efficiency);
        let effective_wattage = (f64::from(psu_wattage) * multiplier) as u32;

        Self {
            draw_w,
            psu_wattage,
            multiplier,
            effective_wattage,
            raw_headroom: calculate_headroom(psu_wattage, draw_w),
            effective_headroom: calculate_headroom(effective_wattage, draw_w),
        }
    }

    fn record(&self, result: &mut ValidationResult) {
        result.record_metric(metric::ESTIMATED_POWER_DRAW_W, f64::from(self.draw_w));
        result.record_metric(metric::PSU_WATTAGE, f64::from(self.psu_wattage));
        result.record_metric(metric::PSU_HEADROOM_PCT, round1(self.raw_headroom * 100.0));
        result.record_metric(metric::EFFECTIVE_WATTAGE, f64::from(self.effective_wattage));
        result.record_metric(
            metric::EFFECTIVE_HEADROOM_PCT,
            round1(self.effective_headroom * 100.0),
        );
        result.record_metric(metric::EFFICIENCY_MULTIPLIER, self.multiplier);
    }
}

/// PSU capacity and headroom policy.
pub(crate) fn check_psu_wattage(build: &Build, result: &mut ValidationResult) {
    let power = PowerEstimate::for_build(build);
    power.record(result);

    let psu = &build.psu;
    let headroom_pct = round1(power.effective_headroom * 100.0);

    if power.effective_wattage < power.draw_w {
        result.add_error(
            ValidationError::new(
                &[Component::Psu],
                format!(
                    "PSU wattage insufficient: {}W draw exceeds {}W effective capacity \
                     (accounting for {} efficiency)",
                    power.draw_w, power.effective_wattage, psu.efficiency
                ),
                ErrorDetail::PsuOverloaded {
                    estimated_draw_w: power.draw_w,
                    psu_rated_wattage: power.psu_wattage,
                    psu_effective_wattage: power.effective_wattage,
                    shortfall_w: power.draw_w - power.effective_wattage,
                },
            )
            .with_extra("psu_model", psu.model.as_str()),
        );
        return;
    }

    if power.effective_headroom < CRITICAL_HEADROOM {
        result.add_error(
            ValidationError::new(
                &[Component::Psu],
                format!(
                    "PSU headroom critically low: {:.1}% (minimum {:.0}% required)",
                    power.effective_headroom * 100.0,
                    CRITICAL_HEADROOM * 100.0
                ),
                ErrorDetail::PsuHeadroomCritical {
                    estimated_draw_w: power.draw_w,
                    effective_wattage: power.effective_wattage,
                    headroom_pct,
                    minimum_required_pct: CRITICAL_HEADROOM * 100.0,
                },
            )
            .with_extra("psu_model", psu.model.as_str()),
        );
        return;
    }

    let low_headroom = |severity: Severity, label: &str| {
        ValidationWarning::new(
            &[Component::Psu],
            severity,
            format!(
                "{label}: {:.1}% (recommended {:.0}%)",
                power.effective_headroom * 100.0,
                RECOMMENDED_HEADROOM * 100.0
            ),
            WarningDetail::PsuHeadroomLow {
                estimated_draw_w: power.draw_w,
                effective_wattage: power.effective_wattage,
                headroom_pct,
                recommended_pct: RECOMMENDED_HEADROOM * 100.0,
            },
        )
    };
    if power.effective_headroom < MINIMUM_HEADROOM {
        result.add_warning(low_headroom(Severity::High, "PSU headroom low"));
    } else if power.effective_headroom < RECOMMENDED_HEADROOM {
        result.add_warning(low_headroom(
            Severity::Medium,
            "PSU headroom below recommended",
        ));
    }

    let basic_unit = matches!(
        EfficiencyRating::from_label(&psu.efficiency),
        Some(EfficiencyRating::Standard | EfficiencyRating::Bronze)
    );
    if basic_unit && power.draw_w > EFFICIENCY_DRAW_THRESHOLD_W {
        result.add_warning(ValidationWarning::new(
            &[Component::Psu],
            Severity::Low,
            format!(
                "PSU efficiency ({}) is suboptimal for {}W system. \
                 Consider 80+ Gold or higher for better efficiency and lower heat/noise.",
                psu.efficiency, power.draw_w
            ),
            WarningDetail::EfficiencySuboptimal {
                current_efficiency: psu.efficiency.clone(),
                estimated_draw_w: power.draw_w,
            },
        ));
    }
}

/// 16-pin connector availability for cards that need it.
pub(crate) fn check_power_connectors(build: &Build, result: &mut ValidationResult) {
    let Some(gpu) = &build.gpu else { return };
    let Some(required) = gpu.power_connectors.as_deref().filter(|l| !l.trim().is_empty()) else {
        return;
    };

    let Some(available) = build.psu.declared_connectors() else {
        if gpu.tdp_w > 150 {
            result.add_warning(ValidationWarning::new(
                &[Component::Psu, Component::Gpu],
                Severity::Medium,
                format!("PSU power connectors not specified. GPU requires: {required}"),
                WarningDetail::PsuConnectorsUnknown {
                    gpu_tdp_w: gpu.tdp_w,
                    gpu_connectors_required: required.to_string(),
                },
            ));
        }
        return;
    };

    if gpu.needs_high_power_connector()
        && !build.psu.has_connector("12VHPWR")
        && !build.psu.has_connector("12V-2x6")
    {
        result.add_error(ValidationError::new(
            &[Component::Psu, Component::Gpu],
            "GPU requires 12VHPWR connector but PSU does not provide it",
            ErrorDetail::MissingPowerConnectors {
                gpu_connectors_required: required.to_string(),
                psu_connectors_available: available.clone(),
            },
        ));
    }
}
