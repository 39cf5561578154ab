//! Field checks shared by request payloads.
//!
//! Payloads report one error at a time, in the order the fields are declared,
//! so each check returns as soon as it fails.

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

/// Returns whether a string field is absent or only whitespace.
#[inline]
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|value| value.trim().is_empty())
}

/// Builds a single-field validation failure carrying `message`.
pub fn rejection(field: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, ValidationError::new("required").with_message(message.into()));
    errors
}

/// Fails with `"{field} is required"` when the field is blank.
pub fn require(field: &'static str, value: Option<&str>) -> Result<(), ValidationErrors> {
    if is_blank(value) {
        return Err(rejection(field, format!("{field} is required")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some(" \t\n")));
        assert!(!is_blank(Some(" x ")));
    }

    #[test]
    fn require_reports_field_name() {
        let errors = require("outletName", Some("  ")).expect_err("blank");
        let message = errors
            .field_errors()
            .into_values()
            .flat_map(|errors| errors.iter())
            .find_map(|error| error.message.clone());
        assert_eq!(message.as_deref(), Some("outletName is required"));
    }
}
