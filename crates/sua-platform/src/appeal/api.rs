//! Appeals API
//!
//! REST endpoints for appeals against published results.

use axum::{
    extract::{Path, State},
    Json,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa::ToSchema;
use serde::Serialize;
use std::sync::Arc;

use crate::appeal::entity::Appeal;
use crate::appeal::operations::{
    CreateAppealCommand, CreateAppealUseCase, ReviewAppealCommand, ReviewAppealUseCase,
};
use crate::appeal::repository::AppealRepository;
use crate::shared::error::PlatformError;
use crate::shared::middleware::{checks, Authenticated};
use crate::usecase::{ExecutionContext, MongoUnitOfWork};

/// Appeal response DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppealResponse {
    pub id: String,
    pub student_id: String,
    pub publicity_id: String,
    pub content: String,
    pub is_checked: bool,
    pub status: String,
    pub feedback: Option<String>,
    pub created_at: String,
}

impl From<Appeal> for AppealResponse {
    fn from(a: Appeal) -> Self {
        Self {
            id: a.id,
            student_id: a.student_id,
            publicity_id: a.publicity_id,
            content: a.content,
            is_checked: a.is_checked,
            status: format!("{:?}", a.status).to_uppercase(),
            feedback: a.feedback,
            created_at: a.created_at.to_rfc3339(),
        }
    }
}

/// Appeal list response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppealListResponse {
    pub appeals: Vec<AppealResponse>,
    pub total: usize,
}

/// Appeals service state
#[derive(Clone)]
pub struct AppealsState {
    pub appeal_repo: Arc<AppealRepository>,
    pub create_use_case: Arc<CreateAppealUseCase<MongoUnitOfWork>>,
    pub review_use_case: Arc<ReviewAppealUseCase<MongoUnitOfWork>>,
}

/// File an appeal against a publicity
#[utoipa::path(
    post,
    path = "",
    tag = "appeals",
    request_body = CreateAppealCommand,
    responses(
        (status = 200, description = "Appeal filed", body = AppealResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Referenced student or publicity not found")
    )
)]
pub async fn create_appeal(
    State(state): State<AppealsState>,
    auth: Authenticated,
    Json(command): Json<CreateAppealCommand>,
) -> Result<Json<AppealResponse>, PlatformError> {
    // Students file their own appeals; staff may file on a student's
    // behalf
    if !auth.is_staff {
        let own_student_id = checks::require_student(&auth)?;
        if command.student_id != own_student_id {
            return Err(PlatformError::forbidden("Cannot appeal for another student"));
        }
    }

    let ctx = ExecutionContext::create(&auth.principal_id);
    let appeal = state.create_use_case.execute(command, ctx).await.into_result()?;

    Ok(Json(appeal.into()))
}

/// List appeals: staff see all, students their own
#[utoipa::path(
    get,
    path = "",
    tag = "appeals",
    responses(
        (status = 200, description = "List of appeals", body = AppealListResponse)
    )
)]
pub async fn list_appeals(
    State(state): State<AppealsState>,
    auth: Authenticated,
) -> Result<Json<AppealListResponse>, PlatformError> {
    let appeals = if auth.is_staff {
        state.appeal_repo.find_all().await?
    } else {
        let student_id = checks::require_student(&auth)?;
        state.appeal_repo.find_by_student(&student_id).await?
    };

    let total = appeals.len();
    Ok(Json(AppealListResponse {
        appeals: appeals.into_iter().map(Into::into).collect(),
        total,
    }))
}

/// Get an appeal by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "appeals",
    params(("id" = String, Path, description = "Appeal ID")),
    responses(
        (status = 200, description = "Appeal found", body = AppealResponse),
        (status = 404, description = "Appeal not found")
    )
)]
pub async fn get_appeal(
    State(state): State<AppealsState>,
    auth: Authenticated,
    Path(id): Path<String>,
) -> Result<Json<AppealResponse>, PlatformError> {
    let appeal = state.appeal_repo.find_by_id(&id).await?
        .ok_or_else(|| PlatformError::not_found("Appeal", &id))?;

    checks::require_staff_or_student(&auth, &appeal.student_id)?;

    Ok(Json(appeal.into()))
}

/// Review an appeal (staff only, forward-only)
#[utoipa::path(
    post,
    path = "/{id}/review",
    tag = "appeals",
    params(("id" = String, Path, description = "Appeal ID")),
    request_body = ReviewAppealCommand,
    responses(
        (status = 200, description = "Appeal reviewed", body = AppealResponse),
        (status = 404, description = "Appeal not found"),
        (status = 409, description = "Already reviewed")
    )
)]
pub async fn review_appeal(
    State(state): State<AppealsState>,
    auth: Authenticated,
    Path(id): Path<String>,
    Json(mut command): Json<ReviewAppealCommand>,
) -> Result<Json<AppealResponse>, PlatformError> {
    checks::require_staff(&auth)?;

    command.appeal_id = id;

    let ctx = ExecutionContext::create(&auth.principal_id);
    let appeal = state.review_use_case.execute(command, ctx).await.into_result()?;

    Ok(Json(appeal.into()))
}

/// Create appeals router
pub fn appeals_router(state: AppealsState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(create_appeal, list_appeals))
        .routes(routes!(get_appeal))
        .routes(routes!(review_appeal))
        .with_state(state)
}
