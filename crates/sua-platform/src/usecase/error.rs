//! Use Case Errors
//!
//! Categorized error types for use case failures.
//! Errors are categorized by type to enable consistent HTTP status mapping.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Macro for creating error detail maps.
///
/// # Example
///
/// ```ignore
/// use sua_platform::details;
///
/// let details = details! {
///     "number" => "2016011234",
///     "studentId" => student_id
/// };
/// ```
#[macro_export]
macro_rules! details {
    () => {
        std::collections::HashMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = std::collections::HashMap::new();
        $(
            map.insert($key.to_string(), serde_json::json!($value));
        )+
        map
    }};
}

/// Categorized error types for use case failures.
///
/// Each variant maps to a specific HTTP status code:
/// - `ValidationError` -> 400 Bad Request
/// - `ConflictError` -> 409 Conflict
/// - `NotFoundError` -> 404 Not Found
/// - `IntegrityError` -> 500 Internal Server Error
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UseCaseError {
    /// Input validation failed (missing required fields, invalid format, etc.).
    /// The `details` map carries one entry per offending field - validation
    /// reports are exhaustive, not short-circuiting.
    /// Maps to HTTP 400 Bad Request.
    ValidationError {
        code: String,
        message: String,
        #[serde(default)]
        details: HashMap<String, serde_json::Value>,
    },

    /// Uniqueness violation or a forbidden state transition.
    /// Maps to HTTP 409 Conflict.
    ConflictError {
        code: String,
        message: String,
        #[serde(default)]
        details: HashMap<String, serde_json::Value>,
    },

    /// Referenced entity not found.
    /// Maps to HTTP 404 Not Found.
    NotFoundError {
        code: String,
        message: String,
        #[serde(default)]
        details: HashMap<String, serde_json::Value>,
    },

    /// Mid-cascade storage failure. The surrounding transaction has been
    /// rolled back; no partial writes survive.
    /// Maps to HTTP 500 Internal Server Error.
    IntegrityError {
        code: String,
        message: String,
        #[serde(default)]
        details: HashMap<String, serde_json::Value>,
    },
}

impl UseCaseError {
    /// Create a validation error with the given code and message.
    pub fn validation(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            code: code.into(),
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Create a validation error with per-field details.
    pub fn validation_with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self::ValidationError {
            code: code.into(),
            message: message.into(),
            details,
        }
    }

    /// Create a conflict error.
    pub fn conflict(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConflictError {
            code: code.into(),
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Create a conflict error with details.
    pub fn conflict_with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self::ConflictError {
            code: code.into(),
            message: message.into(),
            details,
        }
    }

    /// Create a not found error.
    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFoundError {
            code: code.into(),
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Create an integrity error for a failed cascade commit.
    pub fn integrity(message: impl Into<String>) -> Self {
        Self::IntegrityError {
            code: "CASCADE_ABORTED".to_string(),
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Get the error code.
    pub fn code(&self) -> &str {
        match self {
            Self::ValidationError { code, .. } => code,
            Self::ConflictError { code, .. } => code,
            Self::NotFoundError { code, .. } => code,
            Self::IntegrityError { code, .. } => code,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        match self {
            Self::ValidationError { message, .. } => message,
            Self::ConflictError { message, .. } => message,
            Self::NotFoundError { message, .. } => message,
            Self::IntegrityError { message, .. } => message,
        }
    }

    /// Get the per-field detail map.
    pub fn details(&self) -> &HashMap<String, serde_json::Value> {
        match self {
            Self::ValidationError { details, .. } => details,
            Self::ConflictError { details, .. } => details,
            Self::NotFoundError { details, .. } => details,
            Self::IntegrityError { details, .. } => details,
        }
    }

    /// Get the suggested HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::ValidationError { .. } => 400,
            Self::ConflictError { .. } => 409,
            Self::NotFoundError { .. } => 404,
            Self::IntegrityError { .. } => 500,
        }
    }
}

impl std::fmt::Display for UseCaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message())
    }
}

impl std::error::Error for UseCaseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = UseCaseError::validation("NUMBER_REQUIRED", "Student number is required");
        assert_eq!(err.code(), "NUMBER_REQUIRED");
        assert_eq!(err.message(), "Student number is required");
        assert_eq!(err.http_status_code(), 400);
    }

    #[test]
    fn test_not_found_error() {
        let err = UseCaseError::not_found("STUDENT_NOT_FOUND", "Student not found");
        assert_eq!(err.http_status_code(), 404);
    }

    #[test]
    fn test_conflict_with_details() {
        let err = UseCaseError::conflict_with_details(
            "STUDENT_NUMBER_EXISTS",
            "Student number already registered",
            details! { "number" => "2016011234" },
        );

        assert_eq!(err.http_status_code(), 409);
        if let UseCaseError::ConflictError { details, .. } = err {
            assert!(details.contains_key("number"));
        } else {
            panic!("Expected ConflictError");
        }
    }

    #[test]
    fn test_integrity_error() {
        let err = UseCaseError::integrity("transaction aborted");
        assert_eq!(err.code(), "CASCADE_ABORTED");
        assert_eq!(err.http_status_code(), 500);
    }

    #[test]
    fn test_details_macro_empty() {
        let details: HashMap<String, serde_json::Value> = details!();
        assert!(details.is_empty());
    }

    #[test]
    fn test_details_macro_multiple() {
        let number = "2016011234";
        let details = details! {
            "number" => number,
            "power" => 2,
        };
        assert_eq!(details.get("number"), Some(&serde_json::json!("2016011234")));
        assert_eq!(details.get("power"), Some(&serde_json::json!(2)));
    }
}
