//! Applications API
//!
//! REST endpoints for credit applications. Submission runs the
//! Sua + Proof + Application cascade; review is a staff-only forward
//! transition.

use axum::{
    extract::{Path, State},
    Json,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa::ToSchema;
use serde::Serialize;
use std::sync::Arc;

use crate::application::entity::Application;
use crate::application::operations::{
    CreateApplicationCommand, CreateApplicationUseCase, ReviewApplicationCommand,
    ReviewApplicationUseCase, UpdateApplicationCommand, UpdateApplicationUseCase,
};
use crate::application::repository::ApplicationRepository;
use crate::proof::entity::Proof;
use crate::proof::repository::ProofRepository;
use crate::shared::error::PlatformError;
use crate::shared::middleware::{checks, Authenticated};
use crate::sua::api::SuaResponse;
use crate::sua::repository::SuaRepository;
use crate::usecase::{ExecutionContext, MongoUnitOfWork};

/// Proof response DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProofResponse {
    pub id: String,
    pub proof_file: Option<String>,
    pub is_offline: bool,
}

impl From<Proof> for ProofResponse {
    fn from(p: Proof) -> Self {
        Self {
            id: p.id,
            proof_file: p.proof_file,
            is_offline: p.is_offline,
        }
    }
}

/// Application response DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: String,
    pub contact: String,
    pub is_checked: bool,
    pub status: String,
    pub feedback: Option<String>,
    pub created_at: String,
    pub sua_id: String,
    pub proof_id: String,
}

impl From<Application> for ApplicationResponse {
    fn from(a: Application) -> Self {
        Self {
            id: a.id,
            contact: a.contact,
            is_checked: a.is_checked,
            status: format!("{:?}", a.status).to_uppercase(),
            feedback: a.feedback,
            created_at: a.created_at.to_rfc3339(),
            sua_id: a.sua_id,
            proof_id: a.proof_id,
        }
    }
}

/// Application detail response embedding the nested Sua and Proof
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDetailResponse {
    #[serde(flatten)]
    pub application: ApplicationResponse,
    pub sua: Option<SuaResponse>,
    pub proof: Option<ProofResponse>,
}

/// Application list response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListResponse {
    pub applications: Vec<ApplicationResponse>,
    pub total: usize,
}

/// Applications service state
#[derive(Clone)]
pub struct ApplicationsState {
    pub application_repo: Arc<ApplicationRepository>,
    pub sua_repo: Arc<SuaRepository>,
    pub proof_repo: Arc<ProofRepository>,
    pub create_use_case: Arc<CreateApplicationUseCase<MongoUnitOfWork>>,
    pub update_use_case: Arc<UpdateApplicationUseCase<MongoUnitOfWork>>,
    pub review_use_case: Arc<ReviewApplicationUseCase<MongoUnitOfWork>>,
}

/// Submit a credit application
#[utoipa::path(
    post,
    path = "",
    tag = "applications",
    request_body = CreateApplicationCommand,
    responses(
        (status = 200, description = "Application submitted", body = ApplicationResponse),
        (status = 400, description = "Validation error (including missing proof evidence)"),
        (status = 404, description = "Referenced student or activity not found")
    )
)]
pub async fn create_application(
    State(state): State<ApplicationsState>,
    auth: Authenticated,
    Json(command): Json<CreateApplicationCommand>,
) -> Result<Json<ApplicationResponse>, PlatformError> {
    let ctx = ExecutionContext::create(&auth.principal_id);
    let application = state.create_use_case.execute(command, ctx).await.into_result()?;

    Ok(Json(application.into()))
}

/// List applications: staff see all, students their own
#[utoipa::path(
    get,
    path = "",
    tag = "applications",
    responses(
        (status = 200, description = "List of applications", body = ApplicationListResponse)
    )
)]
pub async fn list_applications(
    State(state): State<ApplicationsState>,
    auth: Authenticated,
) -> Result<Json<ApplicationListResponse>, PlatformError> {
    let applications = if auth.is_staff {
        state.application_repo.find_all().await?
    } else {
        state.application_repo.find_by_owner(&auth.principal_id).await?
    };

    let total = applications.len();
    Ok(Json(ApplicationListResponse {
        applications: applications.into_iter().map(Into::into).collect(),
        total,
    }))
}

/// Get an application with its nested Sua and Proof
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "applications",
    params(("id" = String, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application found", body = ApplicationDetailResponse),
        (status = 404, description = "Application not found")
    )
)]
pub async fn get_application(
    State(state): State<ApplicationsState>,
    auth: Authenticated,
    Path(id): Path<String>,
) -> Result<Json<ApplicationDetailResponse>, PlatformError> {
    let application = state.application_repo.find_by_id(&id).await?
        .ok_or_else(|| PlatformError::not_found("Application", &id))?;

    checks::require_staff_or_owner(&auth, &application.owner_id)?;

    let sua = state.sua_repo.find_by_id(&application.sua_id).await?;
    let proof = state.proof_repo.find_by_id(&application.proof_id).await?;

    Ok(Json(ApplicationDetailResponse {
        application: application.into(),
        sua: sua.map(Into::into),
        proof: proof.map(Into::into),
    }))
}

/// Update an application's own fields
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "applications",
    params(("id" = String, Path, description = "Application ID")),
    request_body = UpdateApplicationCommand,
    responses(
        (status = 200, description = "Application updated", body = ApplicationResponse),
        (status = 404, description = "Application not found")
    )
)]
pub async fn update_application(
    State(state): State<ApplicationsState>,
    auth: Authenticated,
    Path(id): Path<String>,
    Json(mut command): Json<UpdateApplicationCommand>,
) -> Result<Json<ApplicationResponse>, PlatformError> {
    let application = state.application_repo.find_by_id(&id).await?
        .ok_or_else(|| PlatformError::not_found("Application", &id))?;

    checks::require_staff_or_owner(&auth, &application.owner_id)?;

    command.application_id = id;

    let ctx = ExecutionContext::create(&auth.principal_id);
    let application = state.update_use_case.execute(command, ctx).await.into_result()?;

    Ok(Json(application.into()))
}

/// Review an application (staff only, forward-only)
#[utoipa::path(
    post,
    path = "/{id}/review",
    tag = "applications",
    params(("id" = String, Path, description = "Application ID")),
    request_body = ReviewApplicationCommand,
    responses(
        (status = 200, description = "Application reviewed", body = ApplicationResponse),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Already reviewed")
    )
)]
pub async fn review_application(
    State(state): State<ApplicationsState>,
    auth: Authenticated,
    Path(id): Path<String>,
    Json(mut command): Json<ReviewApplicationCommand>,
) -> Result<Json<ApplicationResponse>, PlatformError> {
    checks::require_staff(&auth)?;

    command.application_id = id;

    let ctx = ExecutionContext::create(&auth.principal_id);
    let application = state.review_use_case.execute(command, ctx).await.into_result()?;

    Ok(Json(application.into()))
}

/// Create applications router
pub fn applications_router(state: ApplicationsState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(create_application, list_applications))
        .routes(routes!(get_application, update_application))
        .routes(routes!(review_application))
        .with_state(state)
}
