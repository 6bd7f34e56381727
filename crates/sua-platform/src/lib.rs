//! Suatrack Platform
//!
//! Student activity-hour tracking backend:
//! - Students register participation ("SUA" records) in activities
//! - Students submit proof and apply for credit
//! - Staff review applications and publish results
//! - Students appeal published results
//!
//! The write path is built around composite-aggregate cascades
//! (Principal + Student, Activity + Suas, Sua + Proof + Application),
//! each committed atomically through the unit of work.
//!
//! ## Module Organization (Aggregate-based)
//!
//! Each aggregate contains:
//! - `entity` - Domain entities
//! - `repository` - Data access
//! - `api` - REST endpoints
//! - `operations` - Use case operations (where applicable)

// Core aggregates
pub mod principal;
pub mod student;
pub mod activity;
pub mod sua;
pub mod proof;
pub mod application;
pub mod publicity;
pub mod appeal;

// Credentials & audit trail
pub mod auth;
pub mod audit;
pub mod event;

// Shared infrastructure
pub mod shared;

// Cross-cutting concerns
pub mod usecase;

// Re-export common types from shared
pub use shared::error::{PlatformError, Result};
pub use shared::settings::PlatformSettings;
pub use shared::tsid::TsidGenerator;

// Re-export use case infrastructure
pub use usecase::{
    DomainEvent, ExecutionContext, FieldErrors, MongoUnitOfWork, UnitOfWork,
    UseCaseError, UseCaseResult,
};
// Note: details! and impl_domain_event! macros are exported at the crate
// root via #[macro_export]

// Re-export main entity types for convenience
pub use principal::entity::Principal;
pub use student::entity::Student;
pub use activity::entity::Activity;
pub use sua::entity::Sua;
pub use proof::entity::Proof;
pub use application::entity::{Application, ReviewStatus};
pub use publicity::entity::Publicity;
pub use appeal::entity::Appeal;
pub use audit::entity::AuditLog;
pub use event::entity::{ContextData, Event};

// Re-export repositories
pub use principal::repository::PrincipalRepository;
pub use student::repository::StudentRepository;
pub use activity::repository::ActivityRepository;
pub use sua::repository::SuaRepository;
pub use proof::repository::ProofRepository;
pub use application::repository::ApplicationRepository;
pub use publicity::repository::PublicityRepository;
pub use appeal::repository::AppealRepository;
pub use audit::repository::AuditLogRepository;

// Re-export services
pub use auth::password_service::{Argon2Config, PasswordPolicy, PasswordService};
pub use shared::middleware::{checks, AppState, AuthContext, Authenticated};

/// Use case re-exports, grouped for server wiring
pub mod operations {
    pub use crate::student::operations::{
        CreateStudentCommand, CreateStudentUseCase, UpdateStudentCommand, UpdateStudentUseCase,
    };
    pub use crate::activity::operations::{
        CreateActivityCommand, CreateActivityUseCase, CreateSuaCommand,
        UpdateActivityCommand, UpdateActivityUseCase, UpdateSuaCommand,
    };
    pub use crate::application::operations::{
        ApplicationSuaCommand, CreateApplicationCommand, CreateApplicationUseCase,
        CreateProofCommand, ReviewApplicationCommand, ReviewApplicationUseCase,
        UpdateApplicationCommand, UpdateApplicationUseCase,
    };
    pub use crate::publicity::operations::{CreatePublicityCommand, CreatePublicityUseCase};
    pub use crate::appeal::operations::{
        CreateAppealCommand, CreateAppealUseCase, ReviewAppealCommand, ReviewAppealUseCase,
    };
}

/// Router re-exports, grouped for server wiring
pub mod api {
    pub use crate::student::api::{students_router, StudentsState};
    pub use crate::activity::api::{activities_router, ActivitiesState};
    pub use crate::sua::api::{suas_router, SuasState};
    pub use crate::application::api::{applications_router, ApplicationsState};
    pub use crate::publicity::api::{publicities_router, PublicitiesState};
    pub use crate::appeal::api::{appeals_router, AppealsState};
    pub use crate::audit::api::{audit_logs_router, AuditLogsState};
}
