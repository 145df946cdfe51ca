//! Internal helpers for field normalization and validation.
//!
//! These utilities are **not** part of the public API. Each unique field has
//! exactly one normalization function, invoked before both the uniqueness
//! check and the persisted write, so the compared value and the stored value
//! can never diverge.

use crate::{EngineError, ResultEngine};

/// Canonical form of an email address: trimmed and lower-cased.
pub(crate) fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Canonical form of a bank account number: trimmed, with all whitespace and
/// hyphen formatting stripped.
pub(crate) fn normalize_account_number(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

/// Stored form of a category name: trimmed and upper-cased.
///
/// Uniqueness is checked case-insensitively on the trimmed value, so the
/// stored case never matters for collisions.
pub(crate) fn normalize_category_name(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Trim a required text field, rejecting values that are empty afterwards.
pub(crate) fn normalize_required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidRequest(format!(
            "{label} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional note, mapping blank input to `None`.
pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Movement amounts must be strictly positive.
pub(crate) fn validate_amount(amount: f64) -> ResultEngine<f64> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(EngineError::InvalidRequest(
            "Movement amount must be greater than zero".to_string(),
        ));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Ana.Perez@Mail.COM "), "ana.perez@mail.com");
    }

    #[test]
    fn account_number_strips_spaces_and_hyphens() {
        assert_eq!(normalize_account_number("00 0011-11"), "00001111");
        assert_eq!(normalize_account_number("\t12-34 56\n"), "123456");
    }

    #[test]
    fn category_name_is_trimmed_and_uppercased() {
        assert_eq!(normalize_category_name("  hogar  "), "HOGAR");
    }

    #[test]
    fn required_text_rejects_blank() {
        assert!(normalize_required_text("   ", "bank").is_err());
        assert_eq!(normalize_required_text(" Pichincha ", "bank").unwrap(), "Pichincha");
    }

    #[test]
    fn optional_text_maps_blank_to_none() {
        assert_eq!(normalize_optional_text(Some("  ")), None);
        assert_eq!(normalize_optional_text(Some(" taxi ")), Some("taxi".to_string()));
        assert_eq!(normalize_optional_text(None), None);
    }

    #[test]
    fn amount_must_be_positive_and_finite() {
        assert!(validate_amount(0.0).is_err());
        assert!(validate_amount(-5.0).is_err());
        assert!(validate_amount(f64::NAN).is_err());
        assert_eq!(validate_amount(12.5).unwrap(), 12.5);
    }
}
