//! Platform Error Types

use thiserror::Error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response, Json},
};
use utoipa::ToSchema;

use crate::usecase::UseCaseError;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Duplicate entity: {entity_type} with {field}={value}")]
    Duplicate { entity_type: String, field: String, value: String },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<UseCaseError>,
    },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Authorization error: {message}")]
    Unauthorized { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bson::ser::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] bson::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PlatformError {
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    pub fn duplicate(entity_type: impl Into<String>, field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: entity_type.into(),
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into(), source: None }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized { message: message.into() }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden { message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, PlatformError>;

/// Error response body
#[derive(Debug, serde::Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Per-field failure reasons, present for validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for PlatformError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            PlatformError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            PlatformError::Duplicate { .. } => (StatusCode::CONFLICT, "DUPLICATE"),
            PlatformError::Conflict { .. } => (StatusCode::CONFLICT, "CONFLICT"),
            PlatformError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            PlatformError::Unauthorized { .. } => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            PlatformError::Forbidden { .. } => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let details = match &self {
            PlatformError::Validation { source: Some(err), .. } if !err.details().is_empty() => {
                serde_json::to_value(err.details()).ok()
            }
            _ => None,
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<UseCaseError> for PlatformError {
    fn from(err: UseCaseError) -> Self {
        match err {
            UseCaseError::ValidationError { .. } => {
                let message = err.message().to_string();
                PlatformError::Validation {
                    message,
                    source: Some(err),
                }
            }
            UseCaseError::ConflictError { message, .. } => {
                PlatformError::Conflict { message }
            }
            UseCaseError::NotFoundError { message, .. } => {
                PlatformError::NotFound {
                    entity_type: "Entity".to_string(),
                    id: message,
                }
            }
            UseCaseError::IntegrityError { message, .. } => {
                PlatformError::Internal { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::details;

    #[test]
    fn test_use_case_error_mapping() {
        let err: PlatformError = UseCaseError::conflict("X", "taken").into();
        assert!(matches!(err, PlatformError::Conflict { .. }));

        let err: PlatformError = UseCaseError::not_found("X", "gone").into();
        assert!(matches!(err, PlatformError::NotFound { .. }));

        let err: PlatformError = UseCaseError::integrity("aborted").into();
        assert!(matches!(err, PlatformError::Internal { .. }));
    }

    #[test]
    fn test_validation_mapping_keeps_field_details() {
        let use_case_err = UseCaseError::validation_with_details(
            "INVALID_STUDENT",
            "Student payload is invalid",
            details! { "number" => "is required" },
        );
        let err: PlatformError = use_case_err.into();
        match err {
            PlatformError::Validation { source: Some(inner), .. } => {
                assert!(inner.details().contains_key("number"));
            }
            other => panic!("Expected Validation with source, got {:?}", other),
        }
    }
}
