//! API Middleware
//!
//! Authentication extractor and authorization checks for Axum handlers.
//!
//! Token verification happens upstream (gateway or session layer); the
//! platform receives the already-authenticated principal id in the
//! `X-Principal-Id` header and resolves it against the store. Handlers
//! then apply the per-resource authorization preconditions through the
//! `checks` module before invoking a cascade.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::principal::repository::PrincipalRepository;
use crate::shared::api_common::ApiError;
use crate::shared::error::{PlatformError, Result};
use crate::student::repository::StudentRepository;

/// Header carrying the authenticated principal id, set by the fronting
/// auth layer.
const PRINCIPAL_HEADER: &str = "x-principal-id";

/// Application state containing the repositories needed to resolve the
/// acting principal.
#[derive(Clone)]
pub struct AppState {
    pub principal_repo: Arc<PrincipalRepository>,
    pub student_repo: Arc<StudentRepository>,
}

/// Authorization context for a request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Principal ID
    pub principal_id: String,

    /// Login name (a student's number for student accounts)
    pub username: String,

    /// Staff accounts may write any resource
    pub is_staff: bool,

    /// Owned student profile id, if the principal is a student account
    pub student_id: Option<String>,

    /// The student's power level (0 = regular, 1 = elevated)
    pub power: i32,
}

impl AuthContext {
    /// Staff accounts and elevated students may self-approve activity
    /// creation.
    pub fn is_elevated(&self) -> bool {
        self.is_staff || self.power == 1
    }

    /// Whether this principal owns the given entity.
    pub fn owns(&self, owner_id: &str) -> bool {
        self.principal_id == owner_id
    }

    /// Whether this principal is the given student.
    pub fn is_student(&self, student_id: &str) -> bool {
        self.student_id.as_deref() == Some(student_id)
    }
}

/// Authenticated principal extractor.
///
/// Resolves the `X-Principal-Id` header to an active principal and its
/// student profile (if any).
pub struct Authenticated(pub AuthContext);

impl std::ops::Deref for Authenticated {
    type Target = AuthContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Error response for authentication failures
pub struct AuthError {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = ApiError {
            error: "UNAUTHORIZED".to_string(),
            message: self.message,
            details: None,
        };
        (self.status, Json(body)).into_response()
    }
}

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> std::result::Result<Self, Self::Rejection> {
        // AppState is installed as an extension by the server setup
        let app_state = parts.extensions.get::<AppState>()
            .ok_or_else(|| AuthError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Auth state not configured".to_string(),
            })?
            .clone();

        let principal_id = parts.headers
            .get(PRINCIPAL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AuthError {
                status: StatusCode::UNAUTHORIZED,
                message: "Missing authenticated principal".to_string(),
            })?
            .to_string();

        let principal = app_state.principal_repo
            .find_by_id(&principal_id)
            .await
            .map_err(|e: PlatformError| AuthError {
                status: StatusCode::UNAUTHORIZED,
                message: e.to_string(),
            })?
            .ok_or_else(|| AuthError {
                status: StatusCode::UNAUTHORIZED,
                message: "Unknown principal".to_string(),
            })?;

        if !principal.active {
            return Err(AuthError {
                status: StatusCode::UNAUTHORIZED,
                message: "Principal is deactivated".to_string(),
            });
        }

        let student = app_state.student_repo
            .find_by_principal(&principal.id)
            .await
            .map_err(|e: PlatformError| AuthError {
                status: StatusCode::UNAUTHORIZED,
                message: e.to_string(),
            })?;

        Ok(Authenticated(AuthContext {
            principal_id: principal.id,
            username: principal.username,
            is_staff: principal.is_staff,
            student_id: student.as_ref().map(|s| s.id.clone()),
            power: student.map(|s| s.power).unwrap_or(0),
        }))
    }
}

/// Common authorization checks applied by handlers before invoking a
/// cascade. Each writer operation assumes its precondition has already
/// passed.
pub mod checks {
    use super::*;

    /// Require a staff account.
    pub fn require_staff(context: &AuthContext) -> Result<()> {
        if context.is_staff {
            Ok(())
        } else {
            Err(PlatformError::forbidden("Staff access required"))
        }
    }

    /// Staff, or the principal that owns the entity.
    pub fn require_staff_or_owner(context: &AuthContext, owner_id: &str) -> Result<()> {
        if context.is_staff || context.owns(owner_id) {
            Ok(())
        } else {
            Err(PlatformError::forbidden("Not the owner of this resource"))
        }
    }

    /// Staff, or the student the resource belongs to.
    pub fn require_staff_or_student(context: &AuthContext, student_id: &str) -> Result<()> {
        if context.is_staff || context.is_student(student_id) {
            Ok(())
        } else {
            Err(PlatformError::forbidden("Not this student's resource"))
        }
    }

    /// Any principal with a student profile.
    pub fn require_student(context: &AuthContext) -> Result<String> {
        context.student_id.clone()
            .ok_or_else(|| PlatformError::forbidden("Student profile required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student_context(power: i32) -> AuthContext {
        AuthContext {
            principal_id: "p-1".to_string(),
            username: "2016011234".to_string(),
            is_staff: false,
            student_id: Some("s-1".to_string()),
            power,
        }
    }

    fn staff_context() -> AuthContext {
        AuthContext {
            principal_id: "p-admin".to_string(),
            username: "admin".to_string(),
            is_staff: true,
            student_id: None,
            power: 0,
        }
    }

    #[test]
    fn test_elevation() {
        assert!(staff_context().is_elevated());
        assert!(!student_context(0).is_elevated());
        assert!(student_context(1).is_elevated());
    }

    #[test]
    fn test_require_staff() {
        assert!(checks::require_staff(&staff_context()).is_ok());
        assert!(checks::require_staff(&student_context(1)).is_err());
    }

    #[test]
    fn test_require_staff_or_owner() {
        let ctx = student_context(0);
        assert!(checks::require_staff_or_owner(&ctx, "p-1").is_ok());
        assert!(checks::require_staff_or_owner(&ctx, "p-2").is_err());
        assert!(checks::require_staff_or_owner(&staff_context(), "p-2").is_ok());
    }

    #[test]
    fn test_require_staff_or_student() {
        let ctx = student_context(0);
        assert!(checks::require_staff_or_student(&ctx, "s-1").is_ok());
        assert!(checks::require_staff_or_student(&ctx, "s-2").is_err());
    }

    #[test]
    fn test_require_student() {
        assert_eq!(checks::require_student(&student_context(0)).unwrap(), "s-1");
        assert!(checks::require_student(&staff_context()).is_err());
    }
}
