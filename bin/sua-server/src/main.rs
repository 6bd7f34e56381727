//! Suatrack Server
//!
//! Production server for the student activity-hour REST APIs.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SUA_API_PORT` | `8080` | HTTP API port |
//! | `SUA_MONGO_URL` | `mongodb://localhost:27017` | MongoDB connection URL |
//! | `SUA_MONGO_DB` | `suatrack` | MongoDB database name |
//! | `SUA_DEFAULT_PASSWORD` | `12345678` | Secret for new student accounts |
//! | `RUST_LOG` | `info` | Log level |

use std::sync::Arc;
use axum::{response::Json, routing::get, Extension};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use anyhow::Result;
use tracing::info;
use tokio::{net::TcpListener, signal};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use sua_platform::api::{
    activities_router, appeals_router, applications_router, audit_logs_router,
    publicities_router, students_router, suas_router, ActivitiesState, AppealsState,
    ApplicationsState, AuditLogsState, PublicitiesState, StudentsState, SuasState,
};
use sua_platform::operations::{
    CreateActivityUseCase, CreateAppealUseCase, CreateApplicationUseCase,
    CreatePublicityUseCase, CreateStudentUseCase, ReviewAppealUseCase,
    ReviewApplicationUseCase, UpdateActivityUseCase, UpdateApplicationUseCase,
    UpdateStudentUseCase,
};
use sua_platform::{
    ActivityRepository, AppState, AppealRepository, ApplicationRepository,
    AuditLogRepository, MongoUnitOfWork, PasswordService, PlatformSettings,
    PrincipalRepository, ProofRepository, PublicityRepository, StudentRepository,
    SuaRepository,
};

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> Result<()> {
    sua_common::logging::init_logging("sua-server");

    info!("Starting Suatrack Server");

    // Configuration from environment
    let api_port: u16 = env_or_parse("SUA_API_PORT", 8080);
    let mongo_url = env_or("SUA_MONGO_URL", "mongodb://localhost:27017");
    let mongo_db = env_or("SUA_MONGO_DB", "suatrack");
    let settings = PlatformSettings::from_env();

    // Connect to MongoDB
    info!("Connecting to MongoDB: {}/{}", mongo_url, mongo_db);
    let mongo_client = mongodb::Client::with_uri_str(&mongo_url).await?;
    let db = mongo_client.database(&mongo_db);

    // Initialize repositories
    let principal_repo = Arc::new(PrincipalRepository::new(&db));
    let student_repo = Arc::new(StudentRepository::new(&db));
    let activity_repo = Arc::new(ActivityRepository::new(&db));
    let sua_repo = Arc::new(SuaRepository::new(&db));
    let proof_repo = Arc::new(ProofRepository::new(&db));
    let application_repo = Arc::new(ApplicationRepository::new(&db));
    let publicity_repo = Arc::new(PublicityRepository::new(&db));
    let appeal_repo = Arc::new(AppealRepository::new(&db));
    let audit_repo = Arc::new(AuditLogRepository::new(&db));
    info!("Repositories initialized");

    // Services
    let password_service = Arc::new(PasswordService::default());
    let unit_of_work = Arc::new(MongoUnitOfWork::new(mongo_client.clone(), db.clone()));

    // Use cases
    let create_student = Arc::new(CreateStudentUseCase::new(
        principal_repo.clone(),
        password_service.clone(),
        settings.clone(),
        unit_of_work.clone(),
    ));
    let update_student = Arc::new(UpdateStudentUseCase::new(
        student_repo.clone(),
        principal_repo.clone(),
        password_service.clone(),
        unit_of_work.clone(),
    ));
    let create_activity = Arc::new(CreateActivityUseCase::new(
        principal_repo.clone(),
        student_repo.clone(),
        unit_of_work.clone(),
    ));
    let update_activity = Arc::new(UpdateActivityUseCase::new(
        activity_repo.clone(),
        sua_repo.clone(),
        unit_of_work.clone(),
    ));
    let create_application = Arc::new(CreateApplicationUseCase::new(
        student_repo.clone(),
        activity_repo.clone(),
        unit_of_work.clone(),
    ));
    let update_application = Arc::new(UpdateApplicationUseCase::new(
        application_repo.clone(),
        sua_repo.clone(),
        proof_repo.clone(),
        unit_of_work.clone(),
    ));
    let review_application = Arc::new(ReviewApplicationUseCase::new(
        application_repo.clone(),
        unit_of_work.clone(),
    ));
    let create_publicity = Arc::new(CreatePublicityUseCase::new(
        activity_repo.clone(),
        unit_of_work.clone(),
    ));
    let create_appeal = Arc::new(CreateAppealUseCase::new(
        student_repo.clone(),
        publicity_repo.clone(),
        unit_of_work.clone(),
    ));
    let review_appeal = Arc::new(ReviewAppealUseCase::new(
        appeal_repo.clone(),
        unit_of_work.clone(),
    ));

    // Router states
    let students_state = StudentsState {
        student_repo: student_repo.clone(),
        principal_repo: principal_repo.clone(),
        sua_repo: sua_repo.clone(),
        create_use_case: create_student,
        update_use_case: update_student,
    };
    let activities_state = ActivitiesState {
        activity_repo: activity_repo.clone(),
        sua_repo: sua_repo.clone(),
        create_use_case: create_activity,
        update_use_case: update_activity,
    };
    let suas_state = SuasState {
        sua_repo: sua_repo.clone(),
    };
    let applications_state = ApplicationsState {
        application_repo: application_repo.clone(),
        sua_repo: sua_repo.clone(),
        proof_repo: proof_repo.clone(),
        create_use_case: create_application,
        update_use_case: update_application,
        review_use_case: review_application,
    };
    let publicities_state = PublicitiesState {
        publicity_repo: publicity_repo.clone(),
        create_use_case: create_publicity,
    };
    let appeals_state = AppealsState {
        appeal_repo: appeal_repo.clone(),
        create_use_case: create_appeal,
        review_use_case: review_appeal,
    };
    let audit_logs_state = AuditLogsState {
        audit_repo: audit_repo.clone(),
    };

    // Principal resolution state for the Authenticated extractor
    let app_state = AppState {
        principal_repo: principal_repo.clone(),
        student_repo: student_repo.clone(),
    };

    let (router, api) = OpenApiRouter::new()
        .nest("/api/students", students_router(students_state))
        .nest("/api/activities", activities_router(activities_state))
        .nest("/api/suas", suas_router(suas_state))
        .nest("/api/applications", applications_router(applications_state))
        .nest("/api/publicities", publicities_router(publicities_state))
        .nest("/api/appeals", appeals_router(appeals_state))
        .nest("/api/audit-logs", audit_logs_router(audit_logs_state))
        .split_for_parts();

    let app = router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .route("/health", get(health))
        .layer(Extension(app_state))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let addr = format!("0.0.0.0:{}", api_port);
    info!("Listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "UP" }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
