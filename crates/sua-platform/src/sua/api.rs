//! Suas API
//!
//! Read/delete endpoints for participation records. Suas are created and
//! rewritten only through the Activity and Application cascades.

use axum::{
    extract::{Path, State},
    Json,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa::ToSchema;
use serde::Serialize;
use std::sync::Arc;

use crate::shared::api_common::SuccessResponse;
use crate::shared::error::PlatformError;
use crate::shared::middleware::{checks, Authenticated};
use crate::sua::entity::Sua;
use crate::sua::repository::SuaRepository;

/// Sua response DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuaResponse {
    pub id: String,
    pub student_id: String,
    pub activity_id: String,
    pub team: String,
    pub suahours: f64,
    pub is_valid: bool,
    pub application_id: Option<String>,
}

impl From<Sua> for SuaResponse {
    fn from(sua: Sua) -> Self {
        Self {
            id: sua.id,
            student_id: sua.student_id,
            activity_id: sua.activity_id,
            team: sua.team,
            suahours: sua.suahours,
            is_valid: sua.is_valid,
            application_id: sua.application_id,
        }
    }
}

/// Sua list response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuaListResponse {
    pub suas: Vec<SuaResponse>,
    pub total: usize,
}

/// Suas service state
#[derive(Clone)]
pub struct SuasState {
    pub sua_repo: Arc<SuaRepository>,
}

/// List all participation records
#[utoipa::path(
    get,
    path = "",
    tag = "suas",
    responses(
        (status = 200, description = "List of suas", body = SuaListResponse),
        (status = 403, description = "Staff access required")
    )
)]
pub async fn list_suas(
    State(state): State<SuasState>,
    auth: Authenticated,
) -> Result<Json<SuaListResponse>, PlatformError> {
    checks::require_staff(&auth)?;

    let suas = state.sua_repo.find_all().await?;
    let total = suas.len();
    Ok(Json(SuaListResponse {
        suas: suas.into_iter().map(Into::into).collect(),
        total,
    }))
}

/// Get a participation record by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "suas",
    params(("id" = String, Path, description = "Sua ID")),
    responses(
        (status = 200, description = "Sua found", body = SuaResponse),
        (status = 404, description = "Sua not found")
    )
)]
pub async fn get_sua(
    State(state): State<SuasState>,
    auth: Authenticated,
    Path(id): Path<String>,
) -> Result<Json<SuaResponse>, PlatformError> {
    let sua = state.sua_repo.find_by_id(&id).await?
        .ok_or_else(|| PlatformError::not_found("Sua", &id))?;

    checks::require_staff_or_student(&auth, &sua.student_id)?;

    Ok(Json(sua.into()))
}

/// Delete a participation record
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "suas",
    params(("id" = String, Path, description = "Sua ID")),
    responses(
        (status = 200, description = "Sua deleted", body = SuccessResponse),
        (status = 404, description = "Sua not found")
    )
)]
pub async fn delete_sua(
    State(state): State<SuasState>,
    auth: Authenticated,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, PlatformError> {
    checks::require_staff(&auth)?;

    if !state.sua_repo.delete(&id).await? {
        return Err(PlatformError::not_found("Sua", &id));
    }

    Ok(Json(SuccessResponse::ok()))
}

/// Create suas router
pub fn suas_router(state: SuasState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_suas))
        .routes(routes!(get_sua, delete_sua))
        .with_state(state)
}
