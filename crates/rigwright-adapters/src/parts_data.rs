//! Parts dataset cleaning.
//!
//! The scraped parts database is a JSON object of category → array of
//! parts. Listings without a real price carry `"price": ["USD", "0.00"]`;
//! those are dropped. Anything that is not an array passes through as is.
//!
//! ```text
//! {
//!   "cpu":   [{"name": "...", "price": ["USD", "229.99"]}, ...],
//!   "video-card": [{"name": "...", "price": ["USD", "0.00"]}, ...],
//!   "scraped_at": "2025-12-15T10:49:14"
//! }
//! ```

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum PartsDataError {
    #[error("failed to read '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("'{path}' is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("'{path}' must contain a JSON object of category → parts")]
    NotAnObject { path: PathBuf },

    #[error("failed to write '{path}': {source}")]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub before: usize,
    pub after: usize,
}

impl CategoryCount {
    pub fn removed(&self) -> usize {
        self.before - self.after
    }
}

/// Per-category counts; only array categories appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    pub categories: BTreeMap<String, CategoryCount>,
}

impl CleanReport {
    pub fn total_before(&self) -> usize {
        self.categories.values().map(|c| c.before).sum()
    }

    pub fn total_after(&self) -> usize {
        self.categories.values().map(|c| c.after).sum()
    }

    pub fn total_removed(&self) -> usize {
        self.total_before() - self.total_after()
    }
}

/// `["USD", "0.00"]` and friends.
fn has_zero_price(part: &Value) -> bool {
    match part.get("price") {
        Some(Value::Array(price)) => {
            price.len() >= 2 && price[1].as_str() == Some("0.00")
        }
        _ => false,
    }
}

/// Drop unpriced parts from an in-memory dataset.
pub fn clean_parts(data: Map<String, Value>) -> (Map<String, Value>, CleanReport) {
    let mut report = CleanReport::default();
    let mut cleaned = Map::with_capacity(data.len());

    for (category, parts) in data {
        let Value::Array(parts) = parts else {
            cleaned.insert(category, parts);
            continue;
        };

        let before = parts.len();
        let kept: Vec<Value> = parts.into_iter().filter(|p| !has_zero_price(p)).collect();
        let count = CategoryCount {
            before,
            after: kept.len(),
        };
        if count.removed() > 0 {
            info!(
                category = %category,
                removed = count.removed(),
                before = count.before,
                after = count.after,
                "Removed unpriced parts"
            );
        }

        report.categories.insert(category.clone(), count);
        cleaned.insert(category, Value::Array(kept));
    }

    (cleaned, report)
}

/// Read `input`, drop unpriced parts, write pretty JSON to `output`.
#[instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
pub fn clean_parts_data(input: &Path, output: &Path) -> Result<CleanReport, PartsDataError> {
    let raw = fs::read_to_string(input).map_err(|source| PartsDataError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let data: Value = serde_json::from_str(&raw).map_err(|source| PartsDataError::Parse {
        path: input.to_path_buf(),
        source,
    })?;
    let Value::Object(data) = data else {
        return Err(PartsDataError::NotAnObject {
            path: input.to_path_buf(),
        });
    };

    let (cleaned, report) = clean_parts(data);

    let json = serde_json::to_string_pretty(&Value::Object(cleaned)).map_err(|e| {
        PartsDataError::Write {
            path: output.to_path_buf(),
            source: io::Error::other(e),
        }
    })?;
    fs::write(output, json).map_err(|source| PartsDataError::Write {
        path: output.to_path_buf(),
        source,
    })?;

    info!(
        before = report.total_before(),
        after = report.total_after(),
        removed = report.total_removed(),
        "Parts data cleaned"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn zero_priced_parts_are_dropped() {
        let data = object(json!({
            "cpu": [
                {"name": "Ryzen 5 7600", "price": ["USD", "229.99"]},
                {"name": "Ryzen 5 1600", "price": ["USD", "0.00"]},
                {"name": "Core i3", "price": ["CAD", "0.00"]}
            ]
        }));

        let (cleaned, report) = clean_parts(data);

        assert_eq!(cleaned["cpu"].as_array().unwrap().len(), 1);
        assert_eq!(report.categories["cpu"], CategoryCount { before: 3, after: 1 });
        assert_eq!(report.total_removed(), 2);
    }

    #[test]
    fn odd_prices_are_kept() {
        let data = object(json!({
            "memory": [
                {"name": "no price"},
                {"name": "bare", "price": "0.00"},
                {"name": "short", "price": ["USD"]},
                {"name": "numeric", "price": ["USD", 0.0]}
            ]
        }));

        let (_, report) = clean_parts(data);
        assert_eq!(report.categories["memory"].removed(), 0);
    }

    #[test]
    fn non_array_categories_pass_through() {
        let data = object(json!({
            "scraped_at": "2025-12-15",
            "meta": {"source": "pcpartpicker"}
        }));

        let (cleaned, report) = clean_parts(data);
        assert_eq!(cleaned["scraped_at"], "2025-12-15");
        assert_eq!(cleaned["meta"]["source"], "pcpartpicker");
        assert!(report.categories.is_empty());
    }
}
