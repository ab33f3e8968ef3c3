//! Structured critique of a failed build.
//!
//! Produced by the critic collaborator, rendered into planner feedback by
//! the application layer. All fields tolerate `null` / absence: a critic
//! that has nothing to say about warnings simply omits them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::null_as_default;
use crate::domain::error::DomainError;

/// One issue the critic found, with the fix it proposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CritiqueItem {
    pub component: String,
    pub issue: String,
    pub fix: String,
}

impl CritiqueItem {
    pub fn new(
        component: impl Into<String>,
        issue: impl Into<String>,
        fix: impl Into<String>,
    ) -> Self {
        Self {
            component: component.into(),
            issue: issue.into(),
            fix: fix.into(),
        }
    }
}

/// Field-level changes proposed for one component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendedChange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// field → proposed value, alphabetical
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl RecommendedChange {
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CritiqueReport {
    #[serde(default, deserialize_with = "null_as_default")]
    pub critical_issues: Vec<CritiqueItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub warnings: Vec<CritiqueItem>,
    /// component → change
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommended_changes: BTreeMap<String, RecommendedChange>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub preserve_components: Vec<String>,
}

impl CritiqueReport {
    pub fn from_json(value: Value) -> Result<Self, DomainError> {
        serde_json::from_value(value).map_err(|e| DomainError::Malformed {
            entity: "critique",
            reason: e.to_string(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.critical_issues.is_empty()
            && self.warnings.is_empty()
            && self.recommended_changes.is_empty()
            && self.preserve_components.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_report() {
        let report = CritiqueReport::from_json(json!({
            "critical_issues": [
                {"component": "psu", "issue": "too small", "fix": "use 850W"}
            ],
            "warnings": null,
            "recommended_changes": {
                "psu": {"wattage": 850, "model": "RM850e", "reason": "headroom"}
            },
            "preserve_components": ["cpu", "gpu"]
        }))
        .unwrap();

        assert_eq!(report.critical_issues.len(), 1);
        assert!(report.warnings.is_empty());
        let psu = &report.recommended_changes["psu"];
        assert_eq!(psu.reason.as_deref(), Some("headroom"));
        assert_eq!(psu.fields["wattage"], json!(850));
        assert!(!psu.fields.contains_key("reason"));
        assert_eq!(report.preserve_components, vec!["cpu", "gpu"]);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let report = CritiqueReport::from_json(json!({})).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn malformed_item_rejected() {
        let err = CritiqueReport::from_json(json!({
            "critical_issues": [{"component": "psu"}]
        }))
        .unwrap_err();
        assert!(matches!(err, DomainError::Malformed { entity: "critique", .. }));
    }
}
