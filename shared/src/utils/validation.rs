//! Common validation utilities

use serde::Serialize;
use std::collections::HashMap;

/// Validation error with field-level details
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub code: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }
}

/// Collection of validation errors
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) {
        self.add(ValidationError::new(field, message, code));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn to_field_errors(&self) -> HashMap<String, Vec<String>> {
        let mut field_errors: HashMap<String, Vec<String>> = HashMap::new();
        for error in &self.errors {
            field_errors
                .entry(error.field.clone())
                .or_default()
                .push(error.message.clone());
        }
        field_errors
    }
}

/// Trait for types that can be validated
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Common validation functions
pub mod validators {
    use once_cell::sync::Lazy;
    use regex::Regex;

    static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
    });

    /// Check if a string is not empty
    pub fn not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// Check if a string length is within bounds
    pub fn length_between(value: &str, min: usize, max: usize) -> bool {
        let len = value.len();
        len >= min && len <= max
    }

    /// Check if a string matches a pattern
    pub fn matches_pattern(value: &str, pattern: &Regex) -> bool {
        pattern.is_match(value)
    }

    /// Check if an email address is valid
    pub fn is_valid_email(email: &str) -> bool {
        EMAIL_REGEX.is_match(email)
    }

    /// Check if a string is exactly `len` decimal digits
    pub fn is_numeric_code(value: &str, len: usize) -> bool {
        value.len() == len && value.chars().all(|c| c.is_ascii_digit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validators() {
        assert!(validators::not_empty("value"));
        assert!(!validators::not_empty("   "));
        assert!(validators::length_between("abcd", 2, 6));
        assert!(!validators::length_between("a", 2, 6));
        assert!(validators::is_valid_email("fan@arena.com"));
        assert!(!validators::is_valid_email("fan@arena"));
        assert!(validators::is_numeric_code("123456", 6));
        assert!(!validators::is_numeric_code("12345a", 6));
        assert!(!validators::is_numeric_code("12345", 6));
    }

    #[test]
    fn test_validation_errors_collects_by_field() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());

        errors.add_error("email", "must not be empty", "REQUIRED");
        errors.add_error("email", "must be a valid address", "FORMAT");
        errors.add_error("token", "must not be empty", "REQUIRED");

        assert!(errors.has_errors());
        assert_eq!(errors.errors().len(), 3);

        let by_field = errors.to_field_errors();
        assert_eq!(by_field["email"].len(), 2);
        assert_eq!(by_field["token"].len(), 1);
    }
}
