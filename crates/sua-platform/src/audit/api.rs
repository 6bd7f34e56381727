//! Audit Logs API
//!
//! Staff-only inspection of the audit trail written by the cascades.

use axum::{
    extract::{Path, State},
    Json,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa::ToSchema;
use serde::Serialize;
use std::sync::Arc;

use crate::audit::entity::AuditLog;
use crate::audit::repository::AuditLogRepository;
use crate::shared::error::PlatformError;
use crate::shared::middleware::{checks, Authenticated};

/// Audit log response DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogResponse {
    pub id: String,
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub operation: String,
    pub operation_json: Option<String>,
    pub principal_id: Option<String>,
    pub performed_at: String,
}

impl From<AuditLog> for AuditLogResponse {
    fn from(log: AuditLog) -> Self {
        Self {
            id: log.id,
            entity_type: log.entity_type,
            entity_id: log.entity_id,
            operation: log.operation,
            operation_json: log.operation_json,
            principal_id: log.principal_id,
            performed_at: log.performed_at.to_rfc3339(),
        }
    }
}

/// Audit log list response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogListResponse {
    pub logs: Vec<AuditLogResponse>,
    pub total: usize,
}

/// Audit logs service state
#[derive(Clone)]
pub struct AuditLogsState {
    pub audit_repo: Arc<AuditLogRepository>,
}

/// List audit logs for an entity
#[utoipa::path(
    get,
    path = "/{entity_type}/{entity_id}",
    tag = "audit-logs",
    params(
        ("entity_type" = String, Path, description = "Entity type, e.g. Student"),
        ("entity_id" = String, Path, description = "Entity ID")
    ),
    responses(
        (status = 200, description = "Audit trail for the entity", body = AuditLogListResponse),
        (status = 403, description = "Staff access required")
    )
)]
pub async fn list_entity_audit_logs(
    State(state): State<AuditLogsState>,
    auth: Authenticated,
    Path((entity_type, entity_id)): Path<(String, String)>,
) -> Result<Json<AuditLogListResponse>, PlatformError> {
    checks::require_staff(&auth)?;

    let logs = state.audit_repo.find_by_entity(&entity_type, &entity_id).await?;
    let total = logs.len();
    Ok(Json(AuditLogListResponse {
        logs: logs.into_iter().map(Into::into).collect(),
        total,
    }))
}

/// List audit logs for a principal's actions
#[utoipa::path(
    get,
    path = "/principal/{principal_id}",
    tag = "audit-logs",
    params(("principal_id" = String, Path, description = "Principal ID")),
    responses(
        (status = 200, description = "Actions performed by the principal", body = AuditLogListResponse),
        (status = 403, description = "Staff access required")
    )
)]
pub async fn list_principal_audit_logs(
    State(state): State<AuditLogsState>,
    auth: Authenticated,
    Path(principal_id): Path<String>,
) -> Result<Json<AuditLogListResponse>, PlatformError> {
    checks::require_staff(&auth)?;

    let logs = state.audit_repo.find_by_principal(&principal_id).await?;
    let total = logs.len();
    Ok(Json(AuditLogListResponse {
        logs: logs.into_iter().map(Into::into).collect(),
        total,
    }))
}

/// Create audit logs router
pub fn audit_logs_router(state: AuditLogsState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_entity_audit_logs))
        .routes(routes!(list_principal_audit_logs))
        .with_state(state)
}
