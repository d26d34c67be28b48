//! Internal helpers for input normalization.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation so every entity enforces the same rules.

use crate::{EngineError, ResultEngine};

/// Trim a required name and check its length (in characters).
pub(crate) fn normalize_required_name(
    value: &str,
    label: &str,
    max_chars: usize,
) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(format!("{label} name is required")));
    }
    if trimmed.chars().count() > max_chars {
        return Err(EngineError::InvalidName(format!(
            "{label} name must be {max_chars} characters or fewer"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim optional free text, mapping blank input to `None`.
pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_name_is_trimmed() {
        assert_eq!(
            normalize_required_name("  Food ", "tag", 60).unwrap(),
            "Food"
        );
    }

    #[test]
    fn required_name_counts_chars_not_bytes() {
        let name = "é".repeat(60);
        assert!(normalize_required_name(&name, "tag", 60).is_ok());
        assert!(normalize_required_name(&format!("{name}é"), "tag", 60).is_err());
    }

    #[test]
    fn optional_text_blank_is_none() {
        assert_eq!(normalize_optional_text(Some("   ")), None);
        assert_eq!(normalize_optional_text(None), None);
        assert_eq!(
            normalize_optional_text(Some(" lunch ")),
            Some("lunch".to_string())
        );
    }
}
