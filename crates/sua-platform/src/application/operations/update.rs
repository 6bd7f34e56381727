//! Update Application Use Case
//!
//! Re-persists the application's existing Sua and Proof unchanged, then
//! applies absent-unchanged updates to the Application's own scalars.
//! Creation timestamps are immutable.

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::entity::Application;
use crate::application::repository::ApplicationRepository;
use crate::proof::repository::ProofRepository;
use crate::sua::repository::SuaRepository;
use crate::usecase::{
    ExecutionContext, FieldErrors, UnitOfWork, UseCaseError, UseCaseResult,
    unit_of_work::SerializableAggregate,
};
use super::events::ApplicationUpdated;

/// Command for updating an existing application.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationCommand {
    /// Application ID to update
    #[serde(default)]
    pub application_id: String,

    #[serde(default)]
    pub contact: Option<String>,
}

impl UpdateApplicationCommand {
    pub fn validate(&self) -> Result<(), UseCaseError> {
        let mut errors = FieldErrors::new();
        if self.application_id.trim().is_empty() {
            errors.push("applicationId", "is required");
        }
        errors.into_result("INVALID_APPLICATION", "Application payload is invalid")
    }
}

/// Use case for updating an existing application.
pub struct UpdateApplicationUseCase<U: UnitOfWork> {
    application_repo: Arc<ApplicationRepository>,
    sua_repo: Arc<SuaRepository>,
    proof_repo: Arc<ProofRepository>,
    unit_of_work: Arc<U>,
}

impl<U: UnitOfWork> UpdateApplicationUseCase<U> {
    pub fn new(
        application_repo: Arc<ApplicationRepository>,
        sua_repo: Arc<SuaRepository>,
        proof_repo: Arc<ProofRepository>,
        unit_of_work: Arc<U>,
    ) -> Self {
        Self {
            application_repo,
            sua_repo,
            proof_repo,
            unit_of_work,
        }
    }

    pub async fn execute(
        &self,
        command: UpdateApplicationCommand,
        ctx: ExecutionContext,
    ) -> UseCaseResult<Application> {
        if let Err(e) = command.validate() {
            return UseCaseResult::failure(e);
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

        // The nested Sua and Proof are re-persisted as they are; the
        // update path never overwrites their fields from the payload
        let sua = match self.sua_repo.find_by_id(&application.sua_id).await {
            Ok(Some(s)) => s,
            Ok(None) => {
                return UseCaseResult::failure(UseCaseError::not_found(
                    "SUA_NOT_FOUND",
                    format!("Participation record '{}' not found", application.sua_id),
                ));
            }
            Err(e) => {
                return UseCaseResult::failure(UseCaseError::integrity(format!(
                    "Failed to fetch participation record: {}",
                    e
                )));
            }
        };
        let proof = match self.proof_repo.find_by_id(&application.proof_id).await {
            Ok(Some(p)) => p,
            Ok(None) => {
                return UseCaseResult::failure(UseCaseError::not_found(
                    "PROOF_NOT_FOUND",
                    format!("Proof '{}' not found", application.proof_id),
                ));
            }
            Err(e) => {
                return UseCaseResult::failure(UseCaseError::integrity(format!(
                    "Failed to fetch proof: {}",
                    e
                )));
            }
        };

        application.apply_update(command.contact.clone());

        let event = ApplicationUpdated::new(&ctx, &application.id);

        let aggregates: Vec<Box<dyn SerializableAggregate>> = vec![
            Box::new(sua),
            Box::new(proof),
            Box::new(application.clone()),
        ];

        self.unit_of_work
            .commit_all(aggregates, event, &command)
            .await
            .map(|_| application)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_id_rejected() {
        let command = UpdateApplicationCommand {
            application_id: "".to_string(),
            contact: None,
        };
        let err = command.validate().unwrap_err();
        assert!(err.details().contains_key("applicationId"));
    }

    #[test]
    fn test_contact_only_update_is_valid() {
        let command = UpdateApplicationCommand {
            application_id: "app-1".to_string(),
            contact: Some("13911111111".to_string()),
        };
        assert!(command.validate().is_ok());
    }
}
