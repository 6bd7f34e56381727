//! Activities API
//!
//! REST endpoints for activities. Creation and update run the
//! Activity + Sua cascades.

use axum::{
    extract::{Path, State},
    Json,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa::ToSchema;
use serde::Serialize;
use std::sync::Arc;

use crate::activity::entity::Activity;
use crate::activity::operations::{
    CreateActivityCommand, CreateActivityUseCase, UpdateActivityCommand, UpdateActivityUseCase,
};
use crate::activity::repository::ActivityRepository;
use crate::shared::api_common::SuccessResponse;
use crate::shared::error::PlatformError;
use crate::shared::middleware::{checks, Authenticated};
use crate::sua::api::SuaResponse;
use crate::sua::repository::SuaRepository;
use crate::usecase::{ExecutionContext, MongoUnitOfWork};

/// Activity response DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub id: String,
    pub title: String,
    pub detail: String,
    pub date: String,
    pub group: String,
    pub is_created_by_student: bool,
    pub is_valid: bool,
}

impl From<Activity> for ActivityResponse {
    fn from(a: Activity) -> Self {
        Self {
            id: a.id,
            title: a.title,
            detail: a.detail,
            date: a.date.to_string(),
            group: a.group,
            is_created_by_student: a.is_created_by_student,
            is_valid: a.is_valid,
        }
    }
}

/// Activity detail response embedding the activity's participation
/// records, resolved by relationship
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDetailResponse {
    #[serde(flatten)]
    pub activity: ActivityResponse,
    pub suas: Vec<SuaResponse>,
}

/// Activity list response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityListResponse {
    pub activities: Vec<ActivityResponse>,
    pub total: usize,
}

/// Activities service state
#[derive(Clone)]
pub struct ActivitiesState {
    pub activity_repo: Arc<ActivityRepository>,
    pub sua_repo: Arc<SuaRepository>,
    pub create_use_case: Arc<CreateActivityUseCase<MongoUnitOfWork>>,
    pub update_use_case: Arc<UpdateActivityUseCase<MongoUnitOfWork>>,
}

/// Create a new activity with its participation records
#[utoipa::path(
    post,
    path = "",
    tag = "activities",
    request_body = CreateActivityCommand,
    responses(
        (status = 200, description = "Activity created", body = ActivityResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Referenced student not found")
    )
)]
pub async fn create_activity(
    State(state): State<ActivitiesState>,
    auth: Authenticated,
    Json(command): Json<CreateActivityCommand>,
) -> Result<Json<ActivityResponse>, PlatformError> {
    let ctx = ExecutionContext::create(&auth.principal_id);
    let activity = state.create_use_case.execute(command, ctx).await.into_result()?;

    Ok(Json(activity.into()))
}

/// List activities
#[utoipa::path(
    get,
    path = "",
    tag = "activities",
    responses(
        (status = 200, description = "List of activities", body = ActivityListResponse)
    )
)]
pub async fn list_activities(
    State(state): State<ActivitiesState>,
    _auth: Authenticated,
) -> Result<Json<ActivityListResponse>, PlatformError> {
    let activities = state.activity_repo.find_all().await?;
    let total = activities.len();
    Ok(Json(ActivityListResponse {
        activities: activities.into_iter().map(Into::into).collect(),
        total,
    }))
}

/// Get an activity with its participation records
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "activities",
    params(("id" = String, Path, description = "Activity ID")),
    responses(
        (status = 200, description = "Activity found", body = ActivityDetailResponse),
        (status = 404, description = "Activity not found")
    )
)]
pub async fn get_activity(
    State(state): State<ActivitiesState>,
    _auth: Authenticated,
    Path(id): Path<String>,
) -> Result<Json<ActivityDetailResponse>, PlatformError> {
    let activity = state.activity_repo.find_by_id(&id).await?
        .ok_or_else(|| PlatformError::not_found("Activity", &id))?;

    let suas = state.sua_repo.find_by_activity(&activity.id).await?;

    Ok(Json(ActivityDetailResponse {
        activity: activity.into(),
        suas: suas.into_iter().map(Into::into).collect(),
    }))
}

/// Update an activity and rewrite its participation records
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "activities",
    params(("id" = String, Path, description = "Activity ID")),
    request_body = UpdateActivityCommand,
    responses(
        (status = 200, description = "Activity updated", body = ActivityResponse),
        (status = 400, description = "Validation error or participation list mismatch"),
        (status = 404, description = "Activity not found")
    )
)]
pub async fn update_activity(
    State(state): State<ActivitiesState>,
    auth: Authenticated,
    Path(id): Path<String>,
    Json(mut command): Json<UpdateActivityCommand>,
) -> Result<Json<ActivityResponse>, PlatformError> {
    let activity = state.activity_repo.find_by_id(&id).await?
        .ok_or_else(|| PlatformError::not_found("Activity", &id))?;

    checks::require_staff_or_owner(&auth, &activity.owner_id)?;

    command.activity_id = id;

    let ctx = ExecutionContext::create(&auth.principal_id);
    let activity = state.update_use_case.execute(command, ctx).await.into_result()?;

    Ok(Json(activity.into()))
}

/// Delete an activity
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "activities",
    params(("id" = String, Path, description = "Activity ID")),
    responses(
        (status = 200, description = "Activity deleted", body = SuccessResponse),
        (status = 404, description = "Activity not found")
    )
)]
pub async fn delete_activity(
    State(state): State<ActivitiesState>,
    auth: Authenticated,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, PlatformError> {
    checks::require_staff(&auth)?;

    if !state.activity_repo.delete(&id).await? {
        return Err(PlatformError::not_found("Activity", &id));
    }

    Ok(Json(SuccessResponse::ok()))
}

/// Create activities router
pub fn activities_router(state: ActivitiesState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(create_activity, list_activities))
        .routes(routes!(get_activity, update_activity, delete_activity))
        .with_state(state)
}
