//! Students API
//!
//! REST endpoints for student management. Creation and update run the
//! Principal + Student cascades; the secret hash never appears in any
//! response.

use axum::{
    extract::{Path, State},
    Json,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa::ToSchema;
use serde::Serialize;
use std::sync::Arc;

use crate::principal::repository::PrincipalRepository;
use crate::shared::api_common::SuccessResponse;
use crate::shared::error::PlatformError;
use crate::shared::middleware::{checks, Authenticated};
use crate::student::entity::Student;
use crate::student::operations::{
    CreateStudentCommand, CreateStudentUseCase, UpdateStudentCommand, UpdateStudentUseCase,
};
use crate::student::repository::StudentRepository;
use crate::sua::api::SuaResponse;
use crate::sua::repository::SuaRepository;
use crate::usecase::{ExecutionContext, MongoUnitOfWork};

/// Student response DTO. Credentials are write-only and never projected
/// here.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: String,
    pub number: String,
    pub name: String,
    pub suahours: f64,
    pub grade: i32,
    pub classtype: String,
    pub phone: String,
    pub power: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Student> for StudentResponse {
    fn from(s: Student) -> Self {
        Self {
            id: s.id,
            number: s.number,
            name: s.name,
            suahours: s.suahours,
            grade: s.grade,
            classtype: s.classtype,
            phone: s.phone,
            power: s.power,
            created_at: s.created_at.to_rfc3339(),
            updated_at: s.updated_at.to_rfc3339(),
        }
    }
}

/// Student detail response embedding the student's participation records
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentDetailResponse {
    #[serde(flatten)]
    pub student: StudentResponse,
    pub suas: Vec<SuaResponse>,
}

/// Student list response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentListResponse {
    pub students: Vec<StudentResponse>,
    pub total: usize,
}

/// Students service state
#[derive(Clone)]
pub struct StudentsState {
    pub student_repo: Arc<StudentRepository>,
    pub principal_repo: Arc<PrincipalRepository>,
    pub sua_repo: Arc<SuaRepository>,
    pub create_use_case: Arc<CreateStudentUseCase<MongoUnitOfWork>>,
    pub update_use_case: Arc<UpdateStudentUseCase<MongoUnitOfWork>>,
}

/// Register a new student
#[utoipa::path(
    post,
    path = "",
    tag = "students",
    request_body = CreateStudentCommand,
    responses(
        (status = 200, description = "Student created", body = StudentResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Duplicate student number")
    )
)]
pub async fn create_student(
    State(state): State<StudentsState>,
    auth: Authenticated,
    Json(command): Json<CreateStudentCommand>,
) -> Result<Json<StudentResponse>, PlatformError> {
    checks::require_staff(&auth)?;

    let ctx = ExecutionContext::create(&auth.principal_id);
    let student = state.create_use_case.execute(command, ctx).await.into_result()?;

    Ok(Json(student.into()))
}

/// List students
#[utoipa::path(
    get,
    path = "",
    tag = "students",
    responses(
        (status = 200, description = "List of students", body = StudentListResponse),
        (status = 403, description = "Staff access required")
    )
)]
pub async fn list_students(
    State(state): State<StudentsState>,
    auth: Authenticated,
) -> Result<Json<StudentListResponse>, PlatformError> {
    checks::require_staff(&auth)?;

    let students = state.student_repo.find_all().await?;
    let total = students.len();
    Ok(Json(StudentListResponse {
        students: students.into_iter().map(Into::into).collect(),
        total,
    }))
}

/// Get a student with its participation records
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "students",
    params(("id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student found", body = StudentDetailResponse),
        (status = 404, description = "Student not found")
    )
)]
pub async fn get_student(
    State(state): State<StudentsState>,
    auth: Authenticated,
    Path(id): Path<String>,
) -> Result<Json<StudentDetailResponse>, PlatformError> {
    checks::require_staff_or_student(&auth, &id)?;

    let student = state.student_repo.find_by_id(&id).await?
        .ok_or_else(|| PlatformError::not_found("Student", &id))?;

    let suas = state.sua_repo.find_by_student(&student.id).await?;

    Ok(Json(StudentDetailResponse {
        student: student.into(),
        suas: suas.into_iter().map(Into::into).collect(),
    }))
}

/// Update a student
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "students",
    params(("id" = String, Path, description = "Student ID")),
    request_body = UpdateStudentCommand,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 404, description = "Student not found"),
        (status = 409, description = "Duplicate student number")
    )
)]
pub async fn update_student(
    State(state): State<StudentsState>,
    auth: Authenticated,
    Path(id): Path<String>,
    Json(mut command): Json<UpdateStudentCommand>,
) -> Result<Json<StudentResponse>, PlatformError> {
    checks::require_staff_or_student(&auth, &id)?;

    // Power and accrued hours stay staff-only
    if !auth.is_staff && (command.power.is_some() || command.suahours.is_some()) {
        return Err(PlatformError::forbidden(
            "Only staff may change power or accrued hours",
        ));
    }

    command.student_id = id;

    let ctx = ExecutionContext::create(&auth.principal_id);
    let student = state.update_use_case.execute(command, ctx).await.into_result()?;

    Ok(Json(student.into()))
}

/// Delete a student and its account
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "students",
    params(("id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student deleted", body = SuccessResponse),
        (status = 404, description = "Student not found")
    )
)]
pub async fn delete_student(
    State(state): State<StudentsState>,
    auth: Authenticated,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, PlatformError> {
    checks::require_staff(&auth)?;

    let student = state.student_repo.find_by_id(&id).await?
        .ok_or_else(|| PlatformError::not_found("Student", &id))?;

    state.student_repo.delete(&student.id).await?;
    state.principal_repo.delete(&student.principal_id).await?;

    Ok(Json(SuccessResponse::ok()))
}

/// Create students router
pub fn students_router(state: StudentsState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(create_student, list_students))
        .routes(routes!(get_student, update_student, delete_student))
        .with_state(state)
}
