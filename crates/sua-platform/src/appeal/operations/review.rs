//! Review Appeal Use Case
//!
//! Same forward-only transition as application review.

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::appeal::entity::Appeal;
use crate::appeal::repository::AppealRepository;
use crate::application::entity::ReviewStatus;
use crate::usecase::{ExecutionContext, UnitOfWork, UseCaseError, UseCaseResult};
use super::events::AppealReviewed;

/// Command for reviewing an appeal.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAppealCommand {
    /// Appeal ID to review
    #[serde(default)]
    pub appeal_id: String,

    /// The decision; PENDING is not a decision
    pub status: ReviewStatus,

    #[serde(default)]
    pub feedback: Option<String>,
}

/// Use case for reviewing an appeal.
pub struct ReviewAppealUseCase<U: UnitOfWork> {
    appeal_repo: Arc<AppealRepository>,
    unit_of_work: Arc<U>,
}

impl<U: UnitOfWork> ReviewAppealUseCase<U> {
    pub fn new(appeal_repo: Arc<AppealRepository>, unit_of_work: Arc<U>) -> Self {
        Self {
            appeal_repo,
            unit_of_work,
        }
    }

    pub async fn execute(
        &self,
        command: ReviewAppealCommand,
        ctx: ExecutionContext,
    ) -> UseCaseResult<Appeal> {
        if command.appeal_id.trim().is_empty() {
            return UseCaseResult::failure(UseCaseError::validation(
                "APPEAL_ID_REQUIRED",
                "Appeal ID is required",
            ));
        }

        if command.status == ReviewStatus::Pending {
            return UseCaseResult::failure(UseCaseError::validation(
                "STATUS_REQUIRED",
                "Review status must be APPROVED or REJECTED",
            ));
        }

        let mut appeal = match self.appeal_repo.find_by_id(&command.appeal_id).await {
            Ok(Some(a)) => a,
            Ok(None) => {
                return UseCaseResult::failure(UseCaseError::not_found(
                    "APPEAL_NOT_FOUND",
                    format!("Appeal with ID '{}' not found", command.appeal_id),
                ));
            }
            Err(e) => {
                return UseCaseResult::failure(UseCaseError::integrity(format!(
                    "Failed to fetch appeal: {}",
                    e
                )));
            }
        };

        if appeal.is_checked {
            return UseCaseResult::failure(UseCaseError::conflict(
                "ALREADY_REVIEWED",
                format!("Appeal '{}' has already been reviewed", appeal.id),
            ));
        }

        appeal.mark_checked(command.status, command.feedback.clone());

        let status = format!("{:?}", command.status).to_uppercase();
        let event = AppealReviewed::new(&ctx, &appeal.id, &status);

        self.unit_of_work
            .commit(&appeal, event, &command)
            .await
            .map(|_| appeal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_deserialization() {
        let json = r#"{"status": "REJECTED", "feedback": "records confirm the published hours"}"#;
        let command: ReviewAppealCommand = serde_json::from_str(json).unwrap();
        assert_eq!(command.status, ReviewStatus::Rejected);
    }
}
