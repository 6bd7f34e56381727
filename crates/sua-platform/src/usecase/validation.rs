//! Field Validation Collector
//!
//! Accumulates per-field validation failures so that a payload is checked
//! exhaustively before being rejected - the caller sees every offending
//! field, not just the first one.

use std::collections::HashMap;

use super::error::UseCaseError;

/// Collects `field -> reason` pairs while a command is being validated.
///
/// # Usage
///
/// ```ignore
/// let mut errors = FieldErrors::new();
/// errors.require_str("number", &command.number);
/// errors.require_str("name", &command.name);
/// if let Some(power) = command.power {
///     if !(0..=1).contains(&power) {
///         errors.push("power", "must be 0 or 1");
///     }
/// }
/// errors.into_result("INVALID_STUDENT", "Student payload is invalid")?;
/// ```
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<(String, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for a field.
    pub fn push(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.errors.push((field.into(), reason.into()));
    }

    /// Require a non-blank string value.
    pub fn require_str(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, "is required");
        }
    }

    /// Require a strictly positive hour amount.
    pub fn require_positive(&mut self, field: &str, value: f64) {
        if !(value > 0.0) {
            self.push(field, "must be greater than zero");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failures collected so far.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Convert into a single exhaustive `ValidationError`, or `Ok(())`
    /// when nothing was collected. A field reported twice keeps its first
    /// reason.
    pub fn into_result(
        self,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<(), UseCaseError> {
        if self.errors.is_empty() {
            return Ok(());
        }

        let mut details: HashMap<String, serde_json::Value> = HashMap::new();
        for (field, reason) in self.errors {
            details
                .entry(field)
                .or_insert_with(|| serde_json::json!(reason));
        }

        Err(UseCaseError::validation_with_details(code, message, details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collector_is_ok() {
        let errors = FieldErrors::new();
        assert!(errors.is_empty());
        assert!(errors.into_result("INVALID", "bad payload").is_ok());
    }

    #[test]
    fn test_collects_every_field() {
        let mut errors = FieldErrors::new();
        errors.require_str("number", "  ");
        errors.require_str("name", "");
        errors.require_positive("suahours", 0.0);
        assert_eq!(errors.len(), 3);

        let err = errors.into_result("INVALID_STUDENT", "bad payload").unwrap_err();
        let details = err.details();
        assert_eq!(details.len(), 3);
        assert_eq!(details.get("number"), Some(&serde_json::json!("is required")));
        assert_eq!(
            details.get("suahours"),
            Some(&serde_json::json!("must be greater than zero"))
        );
    }

    #[test]
    fn test_first_reason_wins_per_field() {
        let mut errors = FieldErrors::new();
        errors.push("proof", "missing evidence");
        errors.push("proof", "second reason");

        let err = errors.into_result("INVALID_PROOF", "bad payload").unwrap_err();
        assert_eq!(
            err.details().get("proof"),
            Some(&serde_json::json!("missing evidence"))
        );
    }

    #[test]
    fn test_valid_values_pass() {
        let mut errors = FieldErrors::new();
        errors.require_str("name", "Cleanup Day");
        errors.require_positive("suahours", 2.0);
        assert!(errors.is_empty());
    }
}
