use super::DomainError;
use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default.
///
/// Collaborators frequently emit `"additional_storage": null` where an empty
/// list is meant; this keeps the field a plain `Vec` / map.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ── Range checks ──────────────────────────────────────────────────────────────

/// `value > 0` and finite.
pub(crate) fn positive(field: &str, value: f64) -> Result<(), DomainError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DomainError::out_of_range(field, value, "> 0"))
    }
}

/// `value >= 0` and finite.
pub(crate) fn non_negative(field: &str, value: f64) -> Result<(), DomainError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DomainError::out_of_range(field, value, ">= 0"))
    }
}

pub(crate) fn at_least(
    field: &str,
    value: u32,
    min: u32,
    expected: &'static str,
) -> Result<(), DomainError> {
    if value >= min {
        Ok(())
    } else {
        Err(DomainError::out_of_range(field, value, expected))
    }
}

pub(crate) fn within(
    field: &str,
    value: u32,
    min: u32,
    max: u32,
    expected: &'static str,
) -> Result<(), DomainError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(DomainError::out_of_range(field, value, expected))
    }
}

pub(crate) fn non_blank(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        Err(DomainError::MissingRequiredField { field })
    } else {
        Ok(())
    }
}

/// Equality ignoring ASCII case and surrounding whitespace.
pub(crate) fn same_label(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_zero_and_nan() {
        assert!(positive("budget_usd", 1.0).is_ok());
        assert!(positive("budget_usd", 0.0).is_err());
        assert!(positive("budget_usd", f64::NAN).is_err());
    }

    #[test]
    fn within_is_inclusive() {
        assert!(within("years", 1, 1, 5, "between 1 and 5").is_ok());
        assert!(within("years", 5, 1, 5, "between 1 and 5").is_ok());
        assert!(within("years", 6, 1, 5, "between 1 and 5").is_err());
    }

    #[test]
    fn labels_compare_case_insensitively() {
        assert!(same_label("am5", " AM5"));
        assert!(!same_label("AM5", "AM4"));
    }
}
