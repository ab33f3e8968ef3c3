//! Human and JSON renderings of a recommended build.

use chrono::{SecondsFormat, Utc};
use serde_json::{Value, json};

use rigwright_core::{
    application::Recommendation,
    domain::{Build, Constraints, CoolingKind, PowerEstimate, StorageKind, ValidationResult},
};

const RULE_WIDTH: usize = 60;

/// `1969.9` → `$1,969.90`.
pub fn usd(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

fn storage_label(kind: StorageKind) -> &'static str {
    match kind {
        StorageKind::Nvme => "NVMe",
        StorageKind::Ssd => "SATA SSD",
        StorageKind::Hdd => "HDD",
    }
}

fn cooling_label(kind: CoolingKind) -> &'static str {
    match kind {
        CoolingKind::Air => "Air",
        CoolingKind::Aio => "AIO",
        CoolingKind::Custom => "Custom loop",
    }
}

/// Lines of the report, joined once at the end.
#[derive(Default)]
struct Lines(Vec<String>);

impl Lines {
    fn push(&mut self, line: impl Into<String>) {
        self.0.push(line.into());
    }

    fn price(&mut self, amount: f64) {
        self.push(format!("  Price: {}", usd(amount)));
    }

    fn section(&mut self, title: &str) {
        let rule = "-".repeat(RULE_WIDTH);
        self.push("");
        self.push(rule.clone());
        self.push(title);
        self.push(rule);
    }

    fn finish(self) -> String {
        let mut text = self.0.join("\n");
        text.push('\n');
        text
    }
}

/// Full plain-text report.
///
/// The budget line appears only when `constraints` are known; warnings only
/// when a `validation` result is given.
pub fn build_report(
    build: &Build,
    constraints: Option<&Constraints>,
    validation: Option<&ValidationResult>,
) -> String {
    let mut out = Lines::default();
    let bar = "=".repeat(RULE_WIDTH);
    out.push(bar.clone());
    out.push("PC BUILD RECOMMENDATION");
    out.push(bar);
    out.push("");

    let total = build.calculate_total_cost();
    out.push(format!("Total Cost: {}", usd(total)));
    if let Some(c) = constraints.filter(|c| c.budget_usd > 0.0) {
        let delta = c.budget_usd - total;
        let pct = delta.abs() / c.budget_usd * 100.0;
        if delta >= 0.0 {
            out.push(format!("Under Budget: {} ({pct:.1}%)", usd(delta)));
        } else {
            out.push(format!("Over Budget: {} ({pct:.1}%)", usd(-delta)));
        }
    }

    out.section("COMPONENTS");
    push_components(&mut out, build);

    out.section("POWER");
    let power = PowerEstimate::for_build(build);
    out.push(format!("Estimated Power Draw: {}W", power.draw_w));
    out.push(format!(
        "PSU Capacity: {}W ({}W effective, {:.1}% headroom)",
        power.psu_wattage,
        power.effective_wattage,
        power.effective_headroom * 100.0
    ));

    if let Some(result) = validation.filter(|r| !r.warnings().is_empty()) {
        match result.high_severity_warnings().count() {
            0 => out.section("WARNINGS"),
            high => out.section(&format!("WARNINGS ({high} high severity)")),
        }
        for w in result.warnings() {
            out.push(format!(
                "[{}] {}: {}",
                w.severity.as_str().to_uppercase(),
                w.component_tag(),
                w.message
            ));
        }
    }

    if let Some(rationale) = build.rationale.as_deref().filter(|r| !r.trim().is_empty()) {
        out.section("RATIONALE");
        out.push(rationale.trim());
    }

    out.finish()
}

fn push_components(out: &mut Lines, build: &Build) {
    let cpu = &build.cpu;
    let clocks = match cpu.boost_clock_ghz {
        Some(boost) => format!("{:.1}-{:.1} GHz", cpu.base_clock_ghz, boost),
        None => format!("{:.1} GHz", cpu.base_clock_ghz),
    };
    out.push(format!("CPU: {}", cpu.model));
    out.push(format!(
        "  {} cores / {} threads, {clocks}, {}W TDP",
        cpu.cores, cpu.threads, cpu.tdp_w
    ));
    out.price(cpu.price_usd);

    match &build.gpu {
        Some(gpu) => {
            out.push(format!("GPU: {}", gpu.model));
            out.push(format!("  {}GB {}, {}W TDP", gpu.vram_gb, gpu.vram_type, gpu.tdp_w));
            out.price(gpu.price_usd);
        }
        None => out.push("GPU: Integrated Graphics"),
    }

    let mb = &build.motherboard;
    out.push(format!("Motherboard: {}", mb.model));
    out.push(format!("  {} chipset, {}, {}", mb.chipset, mb.form_factor, mb.socket));
    out.price(mb.price_usd);

    let ram = &build.ram;
    let per_module = ram.capacity_gb / ram.modules.max(1);
    out.push(format!(
        "RAM: {}GB {}-{} ({}x{}GB)",
        ram.capacity_gb, ram.ram_type, ram.speed_mhz, ram.modules, per_module
    ));
    out.price(ram.price_usd);

    out.push(format!("Storage: {:.1}TB Total", build.total_storage_tb()));
    for drive in build.all_storage() {
        out.push(format!(
            "  - {:.1}TB {} ({}) {}",
            drive.capacity_tb,
            storage_label(drive.kind),
            drive.interface,
            usd(drive.price_usd)
        ));
    }

    let psu = &build.psu;
    out.push(format!("PSU: {}", psu.model));
    out.push(format!("  {}W, {}, {} modular", psu.wattage, psu.efficiency, psu.modular));
    out.price(psu.price_usd);

    let cooling = &build.cooling;
    out.push(format!("Cooling: {} - {}", cooling_label(cooling.kind), cooling.model));
    out.price(cooling.price_usd);

    let chassis = &build.chassis;
    out.push(format!("Case: {}", chassis.model));
    out.push(format!("  {}", chassis.form_factor));
    out.price(chassis.price_usd);

    for p in &build.peripherals {
        out.push(format!("{}: {} {}", p.kind, p.model, usd(p.price_usd)));
    }
}

/// Stable JSON document for `recommend --json`.
pub fn recommendation_json(rec: &Recommendation) -> Value {
    json!({
        "generated_at": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        "iterations": rec.iterations,
        "total_cost_usd": rec.build.calculate_total_cost(),
        "budget_delta_usd": rec.budget_delta_usd(),
        "constraints": rec.constraints,
        "build": rec.build,
        "validation": rec.validation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigwright_core::domain::validate;

    fn fixture(name: &str) -> Value {
        let path = format!(
            "{}/../rigwright-core/tests/fixtures/{name}",
            env!("CARGO_MANIFEST_DIR")
        );
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    fn gaming() -> Build {
        Build::from_json(fixture("gaming_build.json")).unwrap()
    }

    #[test]
    fn usd_groups_thousands() {
        assert_eq!(usd(0.0), "$0.00");
        assert_eq!(usd(999.5), "$999.50");
        assert_eq!(usd(1969.92), "$1,969.92");
        assert_eq!(usd(1234567.0), "$1,234,567.00");
        assert_eq!(usd(-30.08), "-$30.08");
    }

    #[test]
    fn report_shows_budget_and_power() {
        let constraints = Constraints::from_json(fixture("constraints.json")).unwrap();
        let report = build_report(&gaming(), Some(&constraints), None);

        assert!(report.contains("PC BUILD RECOMMENDATION"));
        assert!(report.contains("Total Cost: $1,969.92"));
        assert!(report.contains("Under Budget: $30.08 (1.5%)"));
        assert!(report.contains("CPU: AMD Ryzen 7 7800X3D"));
        assert!(report.contains("8 cores / 16 threads, 4.2-5.0 GHz, 120W TDP"));
        assert!(report.contains("RAM: 32GB DDR5-6000 (2x16GB)"));
        assert!(report.contains("Storage: 2.0TB Total"));
        assert!(report.contains("Cooling: AIO - Arctic Liquid Freezer III 360"));
        assert!(report.contains("Estimated Power Draw: 529W"));
        assert!(report.contains("850W (765W effective, 44.6% headroom)"));
        assert!(report.contains("RATIONALE"));
    }

    #[test]
    fn report_without_constraints_omits_budget() {
        let report = build_report(&gaming(), None, None);
        assert!(!report.contains("Budget"));
    }

    #[test]
    fn missing_gpu_reads_integrated() {
        let mut build = gaming();
        build.gpu = None;
        let report = build_report(&build, None, None);
        assert!(report.contains("GPU: Integrated Graphics"));
    }

    #[test]
    fn warnings_section_only_when_present() {
        let build = gaming();
        let clean = validate(&build);
        assert!(!build_report(&build, None, Some(&clean)).contains("WARNINGS"));

        let mut tight = gaming();
        if let Some(gpu) = tight.gpu.as_mut() {
            gpu.length_mm = Some(310);
        }
        let result = validate(&tight);
        let report = build_report(&tight, None, Some(&result));
        assert!(report.contains("WARNINGS"));
        assert!(!report.contains("high severity"));
        assert!(report.contains("[MEDIUM] gpu+chassis:"));
    }

    #[test]
    fn warnings_heading_counts_high_severity() {
        let mut build = gaming();
        // 690 W Gold -> 621 W effective against a 529 W draw
        build.psu.wattage = 690;
        let result = validate(&build);

        let report = build_report(&build, None, Some(&result));
        assert!(report.contains("WARNINGS (1 high severity)"));
        assert!(report.contains("[HIGH] psu:"));
    }

    #[test]
    fn report_ends_with_one_newline() {
        let report = build_report(&gaming(), None, None);
        assert!(report.ends_with("\n"));
        assert!(!report.ends_with("\n\n"));
    }
}
