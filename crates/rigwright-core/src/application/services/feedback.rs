//! Rendering a critique into planner feedback.
//!
//! The output is plain text passed verbatim to the next generation call:
//!
//! ```text
//! CRITICAL ISSUES:
//!   - PSU: 650W unit cannot carry a 494W draw with headroom
//!     FIX: use an 850W 80+ Gold unit
//!
//! WARNINGS:
//!   - GPU: only 3mm clearance
//!     SUGGESTION: pick a shorter card
//!
//! RECOMMENDED CHANGES:
//!   PSU:
//!     - wattage: 850
//!     Reason: 30% headroom
//!
//! DO NOT CHANGE: cpu, motherboard
//! ```
//!
//! Empty sections are omitted. Recommended changes are listed in component
//! then field order.

use serde_json::Value;

use crate::domain::{CritiqueItem, CritiqueReport};

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_items(heading: &str, label: &str, items: &[CritiqueItem]) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    let mut lines = vec![format!("{heading}:")];
    for item in items {
        lines.push(format!(
            "  - {}: {}",
            item.component.to_uppercase(),
            item.issue
        ));
        lines.push(format!("    {label}: {}", item.fix));
    }
    Some(lines.join("\n"))
}

/// Render `report` as revision instructions for the generator.
pub fn render_feedback(report: &CritiqueReport) -> String {
    let mut sections = Vec::with_capacity(4);

    sections.extend(render_items(
        "CRITICAL ISSUES",
        "FIX",
        &report.critical_issues,
    ));
    sections.extend(render_items("WARNINGS", "SUGGESTION", &report.warnings));

    if !report.recommended_changes.is_empty() {
        let mut lines = vec!["RECOMMENDED CHANGES:".to_string()];
        for (component, change) in &report.recommended_changes {
            lines.push(format!("  {}:", component.to_uppercase()));
            for (field, value) in &change.fields {
                lines.push(format!("    - {field}: {}", render_value(value)));
            }
            if let Some(reason) = &change.reason {
                lines.push(format!("    Reason: {reason}"));
            }
        }
        sections.push(lines.join("\n"));
    }

    if !report.preserve_components.is_empty() {
        sections.push(format!(
            "DO NOT CHANGE: {}",
            report.preserve_components.join(", ")
        ));
    }

    sections.join("\n\n")
}
