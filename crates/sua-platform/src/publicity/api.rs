//! Publicities API
//!
//! REST endpoints for published results.

use axum::{
    extract::{Path, State},
    Json,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa::ToSchema;
use serde::Serialize;
use std::sync::Arc;

use crate::publicity::entity::Publicity;
use crate::publicity::operations::{CreatePublicityCommand, CreatePublicityUseCase};
use crate::publicity::repository::PublicityRepository;
use crate::shared::api_common::SuccessResponse;
use crate::shared::error::PlatformError;
use crate::shared::middleware::{checks, Authenticated};
use crate::usecase::{ExecutionContext, MongoUnitOfWork};

/// Publicity response DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicityResponse {
    pub id: String,
    pub activity_id: String,
    pub title: String,
    pub content: String,
    pub contact: Option<String>,
    pub is_published: bool,
    pub begin: String,
    pub end: String,
}

impl From<Publicity> for PublicityResponse {
    fn from(p: Publicity) -> Self {
        Self {
            id: p.id,
            activity_id: p.activity_id,
            title: p.title,
            content: p.content,
            contact: p.contact,
            is_published: p.is_published,
            begin: p.begin.to_rfc3339(),
            end: p.end.to_rfc3339(),
        }
    }
}

/// Publicity list response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicityListResponse {
    pub publicities: Vec<PublicityResponse>,
    pub total: usize,
}

/// Publicities service state
#[derive(Clone)]
pub struct PublicitiesState {
    pub publicity_repo: Arc<PublicityRepository>,
    pub create_use_case: Arc<CreatePublicityUseCase<MongoUnitOfWork>>,
}

/// Publish results for an activity
#[utoipa::path(
    post,
    path = "",
    tag = "publicities",
    request_body = CreatePublicityCommand,
    responses(
        (status = 200, description = "Publicity created", body = PublicityResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Referenced activity not found")
    )
)]
pub async fn create_publicity(
    State(state): State<PublicitiesState>,
    auth: Authenticated,
    Json(command): Json<CreatePublicityCommand>,
) -> Result<Json<PublicityResponse>, PlatformError> {
    checks::require_staff(&auth)?;

    let ctx = ExecutionContext::create(&auth.principal_id);
    let publicity = state.create_use_case.execute(command, ctx).await.into_result()?;

    Ok(Json(publicity.into()))
}

/// List publicities: staff see all, students only published ones
#[utoipa::path(
    get,
    path = "",
    tag = "publicities",
    responses(
        (status = 200, description = "List of publicities", body = PublicityListResponse)
    )
)]
pub async fn list_publicities(
    State(state): State<PublicitiesState>,
    auth: Authenticated,
) -> Result<Json<PublicityListResponse>, PlatformError> {
    let publicities = if auth.is_staff {
        state.publicity_repo.find_all().await?
    } else {
        state.publicity_repo.find_published().await?
    };

    let total = publicities.len();
    Ok(Json(PublicityListResponse {
        publicities: publicities.into_iter().map(Into::into).collect(),
        total,
    }))
}

/// Get a publicity by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "publicities",
    params(("id" = String, Path, description = "Publicity ID")),
    responses(
        (status = 200, description = "Publicity found", body = PublicityResponse),
        (status = 404, description = "Publicity not found")
    )
)]
pub async fn get_publicity(
    State(state): State<PublicitiesState>,
    auth: Authenticated,
    Path(id): Path<String>,
) -> Result<Json<PublicityResponse>, PlatformError> {
    let publicity = state.publicity_repo.find_by_id(&id).await?
        .ok_or_else(|| PlatformError::not_found("Publicity", &id))?;

    if !auth.is_staff && !publicity.is_published {
        return Err(PlatformError::forbidden("Publicity is not published"));
    }

    Ok(Json(publicity.into()))
}

/// Delete a publicity
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "publicities",
    params(("id" = String, Path, description = "Publicity ID")),
    responses(
        (status = 200, description = "Publicity deleted", body = SuccessResponse),
        (status = 404, description = "Publicity not found")
    )
)]
pub async fn delete_publicity(
    State(state): State<PublicitiesState>,
    auth: Authenticated,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, PlatformError> {
    checks::require_staff(&auth)?;

    if !state.publicity_repo.delete(&id).await? {
        return Err(PlatformError::not_found("Publicity", &id));
    }

    Ok(Json(SuccessResponse::ok()))
}

/// Create publicities router
pub fn publicities_router(state: PublicitiesState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(create_publicity, list_publicities))
        .routes(routes!(get_publicity, delete_publicity))
        .with_state(state)
}
