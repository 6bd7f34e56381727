//! Create Appeal Use Case
//!
//! Files an objection against a published result. The referenced Student
//! and Publicity are looked up, never created, from the payload
//! identifiers.

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::appeal::entity::Appeal;
use crate::publicity::repository::PublicityRepository;
use crate::student::repository::StudentRepository;
use crate::usecase::{
    ExecutionContext, FieldErrors, UnitOfWork, UseCaseError, UseCaseResult,
};
use super::events::AppealCreated;

/// Command for filing a new appeal.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppealCommand {
    /// Objecting student (must exist)
    pub student_id: String,

    /// The publicity being contested (must exist)
    pub publicity_id: String,

    /// Objection text
    pub content: String,
}

impl CreateAppealCommand {
    pub fn validate(&self) -> Result<(), UseCaseError> {
        let mut errors = FieldErrors::new();
        errors.require_str("studentId", &self.student_id);
        errors.require_str("publicityId", &self.publicity_id);
        errors.require_str("content", &self.content);
        errors.into_result("INVALID_APPEAL", "Appeal payload is invalid")
    }
}

/// Use case for filing a new appeal.
pub struct CreateAppealUseCase<U: UnitOfWork> {
    student_repo: Arc<StudentRepository>,
    publicity_repo: Arc<PublicityRepository>,
    unit_of_work: Arc<U>,
}

impl<U: UnitOfWork> CreateAppealUseCase<U> {
    pub fn new(
        student_repo: Arc<StudentRepository>,
        publicity_repo: Arc<PublicityRepository>,
        unit_of_work: Arc<U>,
    ) -> Self {
        Self {
            student_repo,
            publicity_repo,
            unit_of_work,
        }
    }

    pub async fn execute(
        &self,
        command: CreateAppealCommand,
        ctx: ExecutionContext,
    ) -> UseCaseResult<Appeal> {
        if let Err(e) = command.validate() {
            return UseCaseResult::failure(e);
        }

        match self.student_repo.find_by_id(&command.student_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return UseCaseResult::failure(UseCaseError::not_found(
                    "STUDENT_NOT_FOUND",
                    format!("Student with ID '{}' not found", command.student_id),
                ));
            }
            Err(e) => {
                return UseCaseResult::failure(UseCaseError::integrity(format!(
                    "Failed to fetch student: {}",
                    e
                )));
            }
        }

        match self.publicity_repo.find_by_id(&command.publicity_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return UseCaseResult::failure(UseCaseError::not_found(
                    "PUBLICITY_NOT_FOUND",
                    format!("Publicity with ID '{}' not found", command.publicity_id),
                ));
            }
            Err(e) => {
                return UseCaseResult::failure(UseCaseError::integrity(format!(
                    "Failed to fetch publicity: {}",
                    e
                )));
            }
        }

        let appeal = Appeal::new(
            &command.student_id,
            &command.publicity_id,
            &ctx.principal_id,
            command.content.trim(),
        );

        let event = AppealCreated::new(
            &ctx,
            &appeal.id,
            &appeal.student_id,
            &appeal.publicity_id,
        );

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
    fn test_missing_fields_collected() {
        let command = CreateAppealCommand {
            student_id: "".to_string(),
            publicity_id: "".to_string(),
            content: " ".to_string(),
        };

        let err = command.validate().unwrap_err();
        let details = err.details();
        assert_eq!(details.len(), 3);
        assert!(details.contains_key("studentId"));
        assert!(details.contains_key("publicityId"));
        assert!(details.contains_key("content"));
    }

    #[test]
    fn test_valid_command_passes() {
        let command = CreateAppealCommand {
            student_id: "s-1".to_string(),
            publicity_id: "pub-1".to_string(),
            content: "My hours are missing".to_string(),
        };
        assert!(command.validate().is_ok());
    }
}
