//! Create Publicity Use Case
//!
//! Single-entity creation with the owner attached; the published
//! activity must already exist.

use std::sync::Arc;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::activity::repository::ActivityRepository;
use crate::publicity::entity::Publicity;
use crate::usecase::{
    ExecutionContext, FieldErrors, UnitOfWork, UseCaseError, UseCaseResult,
};
use super::events::PublicityCreated;

/// Command for creating a new publicity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePublicityCommand {
    /// The activity being published
    pub activity_id: String,

    pub title: String,

    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub contact: Option<String>,

    #[serde(default)]
    pub is_published: bool,

    /// Visibility window
    pub begin: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl CreatePublicityCommand {
    pub fn validate(&self) -> Result<(), UseCaseError> {
        let mut errors = FieldErrors::new();

        errors.require_str("activityId", &self.activity_id);
        errors.require_str("title", &self.title);

        if self.end <= self.begin {
            errors.push("end", "must be after begin");
        }

        errors.into_result("INVALID_PUBLICITY", "Publicity payload is invalid")
    }
}

/// Use case for creating a new publicity.
pub struct CreatePublicityUseCase<U: UnitOfWork> {
    activity_repo: Arc<ActivityRepository>,
    unit_of_work: Arc<U>,
}

impl<U: UnitOfWork> CreatePublicityUseCase<U> {
    pub fn new(activity_repo: Arc<ActivityRepository>, unit_of_work: Arc<U>) -> Self {
        Self {
            activity_repo,
            unit_of_work,
        }
    }

    pub async fn execute(
        &self,
        command: CreatePublicityCommand,
        ctx: ExecutionContext,
    ) -> UseCaseResult<Publicity> {
        if let Err(e) = command.validate() {
            return UseCaseResult::failure(e);
        }

        match self.activity_repo.find_by_id(&command.activity_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return UseCaseResult::failure(UseCaseError::not_found(
                    "ACTIVITY_NOT_FOUND",
                    format!("Activity with ID '{}' not found", command.activity_id),
                ));
            }
            Err(e) => {
                return UseCaseResult::failure(UseCaseError::integrity(format!(
                    "Failed to fetch activity: {}",
                    e
                )));
            }
        }

        let publicity = Publicity::new(
            &command.activity_id,
            &ctx.principal_id,
            command.title.trim(),
            command.content.trim(),
            command.contact.clone().filter(|c| !c.trim().is_empty()),
            command.is_published,
            command.begin,
            command.end,
        );

        let event = PublicityCreated::new(
            &ctx,
            &publicity.id,
            &publicity.activity_id,
            publicity.is_published,
        );

        self.unit_of_work
            .commit(&publicity, event, &command)
            .await
            .map(|_| publicity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_command() -> CreatePublicityCommand {
        let begin = Utc::now();
        CreatePublicityCommand {
            activity_id: "a-1".to_string(),
            title: "March results".to_string(),
            content: "Hours awarded".to_string(),
            contact: None,
            is_published: true,
            begin,
            end: begin + chrono::Duration::days(7),
        }
    }

    #[test]
    fn test_valid_command_passes() {
        assert!(valid_command().validate().is_ok());
    }

    #[test]
    fn test_inverted_window_rejected() {
        let mut command = valid_command();
        command.end = command.begin - chrono::Duration::hours(1);

        let err = command.validate().unwrap_err();
        assert!(err.details().contains_key("end"));
    }

    #[test]
    fn test_missing_fields_collected() {
        let mut command = valid_command();
        command.activity_id = "".to_string();
        command.title = " ".to_string();

        let err = command.validate().unwrap_err();
        let details = err.details();
        assert!(details.contains_key("activityId"));
        assert!(details.contains_key("title"));
    }
}
