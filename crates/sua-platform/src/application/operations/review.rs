//! Review Application Use Case
//!
//! The review transition moves forward only: an unchecked application
//! becomes checked with its status set exactly once. Re-reviewing is a
//! conflict.

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::entity::{Application, ReviewStatus};
use crate::application::repository::ApplicationRepository;
use crate::usecase::{ExecutionContext, UnitOfWork, UseCaseError, UseCaseResult};
use super::events::ApplicationReviewed;

/// Command for reviewing an application.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewApplicationCommand {
    /// Application ID to review
    #[serde(default)]
    pub application_id: String,

    /// The decision; PENDING is not a decision
    pub status: ReviewStatus,

    #[serde(default)]
    pub feedback: Option<String>,
}

/// Use case for reviewing an application.
pub struct ReviewApplicationUseCase<U: UnitOfWork> {
    application_repo: Arc<ApplicationRepository>,
    unit_of_work: Arc<U>,
}

impl<U: UnitOfWork> ReviewApplicationUseCase<U> {
    pub fn new(application_repo: Arc<ApplicationRepository>, unit_of_work: Arc<U>) -> Self {
        Self {
            application_repo,
            unit_of_work,
        }
    }

    pub async fn execute(
        &self,
        command: ReviewApplicationCommand,
        ctx: ExecutionContext,
    ) -> UseCaseResult<Application> {
        if command.application_id.trim().is_empty() {
            return UseCaseResult::failure(UseCaseError::validation(
                "APPLICATION_ID_REQUIRED",
                "Application ID is required",
            ));
        }

        if command.status == ReviewStatus::Pending {
            return UseCaseResult::failure(UseCaseError::validation(
                "STATUS_REQUIRED",
                "Review status must be APPROVED or REJECTED",
            ));
        }

        let mut application = match self.application_repo.find_by_id(&command.application_id).await {
            Ok(Some(a)) => a,
            Ok(None) => {
                return UseCaseResult::failure(UseCaseError::not_found(
                    "APPLICATION_NOT_FOUND",
                    format!("Application with ID '{}' not found", command.application_id),
                ));
            }
            Err(e) => {
                return UseCaseResult::failure(UseCaseError::integrity(format!(
                    "Failed to fetch application: {}",
                    e
                )));
            }
        };

        // Forward-only: unchecked -> checked, never back
        if application.is_checked {
            return UseCaseResult::failure(UseCaseError::conflict(
                "ALREADY_REVIEWED",
                format!("Application '{}' has already been reviewed", application.id),
            ));
        }

        application.mark_checked(command.status, command.feedback.clone());

        let status = format!("{:?}", command.status).to_uppercase();
        let event = ApplicationReviewed::new(&ctx, &application.id, &status);

        self.unit_of_work
            .commit(&application, event, &command)
            .await
            .map(|_| application)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::unit_of_work::InMemoryUnitOfWork;

    #[test]
    fn test_command_deserialization() {
        let json = r#"{"status": "APPROVED", "feedback": "verified"}"#;
        let command: ReviewApplicationCommand = serde_json::from_str(json).unwrap();
        assert_eq!(command.status, ReviewStatus::Approved);
        assert_eq!(command.feedback.as_deref(), Some("verified"));
    }

    #[tokio::test]
    async fn test_pending_is_not_a_decision() {
        let uow = Arc::new(InMemoryUnitOfWork::new());
        // Repository never reached: validation fails first, so a dummy
        // connection string is never dialed
        let client = mongodb::Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        let repo = Arc::new(ApplicationRepository::new(&client.database("suatrack_test")));
        let use_case = ReviewApplicationUseCase::new(repo, uow);

        let result = use_case
            .execute(
                ReviewApplicationCommand {
                    application_id: "app-1".to_string(),
                    status: ReviewStatus::Pending,
                    feedback: None,
                },
                ExecutionContext::create("p-staff"),
            )
            .await;

        assert_eq!(result.unwrap_err().code(), "STATUS_REQUIRED");
    }
}
