//! Per-form validation rules.
//!
//! Each request DTO implements `validate()` by accumulating problems into a
//! `FieldErrors` map; the handler turns a non-empty map into a single 400
//! response listing every failing field at once.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::ApiError;

/// Accumulator for per-field validation messages
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: HashMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        // First error per field wins; later rules usually cascade from the same cause
        self.errors.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Finish validation: empty map is Ok, otherwise a 400 with field detail
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Validation failed", Some(self.errors)))
        }
    }
}

/// Required string with length bounds (counted in characters, not bytes)
pub fn require_length(errors: &mut FieldErrors, field: &str, value: &str, min: usize, max: usize) {
    let len = value.trim().chars().count();
    if len == 0 {
        errors.push(field, "This field is required");
    } else if len < min {
        errors.push(field, format!("Must be at least {} characters", min));
    } else if len > max {
        errors.push(field, format!("Must be at most {} characters", max));
    }
}

/// Optional string, length-checked only when present and non-blank
pub fn optional_length(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    max: usize,
) {
    if let Some(v) = value {
        if !v.trim().is_empty() && v.trim().chars().count() > max {
            errors.push(field, format!("Must be at most {} characters", max));
        }
    }
}

/// Basic email shape check: one '@', non-empty local and domain, dotted domain
pub fn require_email(errors: &mut FieldErrors, field: &str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        errors.push(field, "This field is required");
        return;
    }
    if value.len() > 254 {
        errors.push(field, "Email address is too long");
        return;
    }

    let parts: Vec<&str> = value.split('@').collect();
    let valid = parts.len() == 2
        && !parts[0].is_empty()
        && parts[1].contains('.')
        && !parts[1].starts_with('.')
        && !parts[1].ends_with('.')
        && !value.chars().any(char::is_whitespace);

    if !valid {
        errors.push(field, "Invalid email format");
    }
}

/// Enum membership check; `parse` is the domain enum's parse function
pub fn require_choice<T>(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    parse: fn(&str) -> Option<T>,
    allowed: &str,
) {
    if parse(value).is_none() {
        errors.push(field, format!("Must be one of: {}", allowed));
    }
}

/// Numeric range check for money amounts
pub fn require_amount_range(
    errors: &mut FieldErrors,
    field: &str,
    value: Decimal,
    min: Decimal,
    max: Decimal,
) {
    if value < min {
        errors.push(field, format!("Must be at least {}", min));
    } else if value > max {
        errors.push(field, format!("Must be at most {}", max));
    }
}

/// Cross-field refinement: the consent checkbox must be ticked
pub fn require_consent(errors: &mut FieldErrors, field: &str, accepted: bool) {
    if !accepted {
        errors.push(field, "Consent must be accepted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(v: &str) -> Decimal {
        Decimal::from_str_exact(v).unwrap()
    }

    #[test]
    fn length_bounds_enforced() {
        let mut errors = FieldErrors::new();
        require_length(&mut errors, "name", "ab", 2, 100);
        assert!(errors.is_empty());

        require_length(&mut errors, "name", "a", 2, 100);
        assert!(!errors.is_empty());
    }

    #[test]
    fn blank_required_field_reports_required() {
        let mut errors = FieldErrors::new();
        require_length(&mut errors, "content", "   ", 10, 4000);
        let err = errors.into_result().unwrap_err();
        let body = err.to_json();
        assert_eq!(body["field_errors"]["content"], "This field is required");
    }

    #[test]
    fn email_shapes() {
        let ok = ["user@example.com", "first.last@mail.example.org"];
        let bad = ["", "plainaddress", "@no-local.org", "user@nodot", "two@@example.com", "sp ace@example.com"];

        for e in ok {
            let mut errors = FieldErrors::new();
            require_email(&mut errors, "email", e);
            assert!(errors.is_empty(), "expected valid: {}", e);
        }
        for e in bad {
            let mut errors = FieldErrors::new();
            require_email(&mut errors, "email", e);
            assert!(!errors.is_empty(), "expected invalid: {}", e);
        }
    }

    #[test]
    fn choice_membership() {
        let mut errors = FieldErrors::new();
        require_choice(
            &mut errors,
            "membership_type",
            "family",
            |v| crate::types::MembershipType::parse(v),
            "individual, family, supporter",
        );
        assert!(errors.is_empty());

        require_choice(
            &mut errors,
            "membership_type",
            "corporate",
            |v| crate::types::MembershipType::parse(v),
            "individual, family, supporter",
        );
        assert!(!errors.is_empty());
    }

    #[test]
    fn amount_range() {
        let mut errors = FieldErrors::new();
        require_amount_range(&mut errors, "amount", dec("50"), dec("1"), dec("100000"));
        assert!(errors.is_empty());

        require_amount_range(&mut errors, "amount", dec("0.5"), dec("1"), dec("100000"));
        assert!(!errors.is_empty());
    }

    #[test]
    fn consent_refinement() {
        let mut errors = FieldErrors::new();
        require_consent(&mut errors, "consent", false);
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn first_error_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.push("email", "first");
        errors.push("email", "second");
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.to_json()["field_errors"]["email"], "first");
    }
}
