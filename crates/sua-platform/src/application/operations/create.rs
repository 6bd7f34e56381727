//! Create Application Use Case
//!
//! Submits a credit application: the nested Sua is created first, then
//! the Proof, then the Application referencing both. All three share one
//! transaction, so a failure at any step leaves no dangling Sua or Proof.

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::activity::repository::ActivityRepository;
use crate::application::entity::Application;
use crate::proof::entity::Proof;
use crate::student::repository::StudentRepository;
use crate::sua::entity::Sua;
use crate::usecase::{
    ExecutionContext, FieldErrors, UnitOfWork, UseCaseError, UseCaseResult,
    unit_of_work::SerializableAggregate,
};
use super::events::ApplicationSubmitted;

/// Nested participation payload inside an application.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSuaCommand {
    /// Student asking for credit
    pub student_id: String,

    /// Activity the hours were earned in
    pub activity_id: String,

    /// Team label
    #[serde(default)]
    pub team: String,

    /// Hours claimed
    pub suahours: f64,
}

/// Nested evidence payload inside an application.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProofCommand {
    /// Stored file reference (upload path or URL)
    #[serde(default)]
    pub proof_file: Option<String>,

    /// Evidence was handed in offline
    #[serde(default)]
    pub is_offline: bool,
}

impl CreateProofCommand {
    /// The proof-specific validity rule layered on top of generic field
    /// validation: an uploaded file or the offline flag must be present.
    pub fn has_evidence(&self) -> bool {
        self.proof_file.as_deref().map(|f| !f.trim().is_empty()).unwrap_or(false)
            || self.is_offline
    }
}

/// Command for submitting a credit application.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationCommand {
    /// Contact for follow-up questions
    #[serde(default)]
    pub contact: String,

    /// The participation being credited
    pub sua: ApplicationSuaCommand,

    /// Evidence of participation
    pub proof: CreateProofCommand,
}

impl CreateApplicationCommand {
    pub fn validate(&self) -> Result<(), UseCaseError> {
        let mut errors = FieldErrors::new();

        if self.sua.student_id.trim().is_empty() {
            errors.push("sua.studentId", "is required");
        }
        if self.sua.activity_id.trim().is_empty() {
            errors.push("sua.activityId", "is required");
        }
        if !(self.sua.suahours > 0.0) {
            errors.push("sua.suahours", "must be greater than zero");
        }

        if !self.proof.has_evidence() {
            errors.push("proof", "missing evidence");
        }

        errors.into_result("INVALID_APPLICATION", "Application payload is invalid")
    }
}

/// Use case for submitting a credit application.
pub struct CreateApplicationUseCase<U: UnitOfWork> {
    student_repo: Arc<StudentRepository>,
    activity_repo: Arc<ActivityRepository>,
    unit_of_work: Arc<U>,
}

impl<U: UnitOfWork> CreateApplicationUseCase<U> {
    pub fn new(
        student_repo: Arc<StudentRepository>,
        activity_repo: Arc<ActivityRepository>,
        unit_of_work: Arc<U>,
    ) -> Self {
        Self {
            student_repo,
            activity_repo,
            unit_of_work,
        }
    }

    pub async fn execute(
        &self,
        command: CreateApplicationCommand,
        ctx: ExecutionContext,
    ) -> UseCaseResult<Application> {
        if let Err(e) = command.validate() {
            return UseCaseResult::failure(e);
        }

        // Referenced student and activity must exist
        match self.student_repo.find_by_id(&command.sua.student_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return UseCaseResult::failure(UseCaseError::not_found(
                    "STUDENT_NOT_FOUND",
                    format!("Student with ID '{}' not found", command.sua.student_id),
                ));
            }
            Err(e) => {
                return UseCaseResult::failure(UseCaseError::integrity(format!(
                    "Failed to fetch student: {}",
                    e
                )));
            }
        }
        match self.activity_repo.find_by_id(&command.sua.activity_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return UseCaseResult::failure(UseCaseError::not_found(
                    "ACTIVITY_NOT_FOUND",
                    format!("Activity with ID '{}' not found", command.sua.activity_id),
                ));
            }
            Err(e) => {
                return UseCaseResult::failure(UseCaseError::integrity(format!(
                    "Failed to fetch activity: {}",
                    e
                )));
            }
        }

        // Sua and Proof first, then the Application referencing both
        let mut sua = Sua::new(
            &command.sua.student_id,
            &command.sua.activity_id,
            command.sua.team.trim(),
            command.sua.suahours,
            &ctx.principal_id,
        );
        let proof = Proof::new(
            &ctx.principal_id,
            command.proof.proof_file.clone().filter(|f| !f.trim().is_empty()),
            command.proof.is_offline,
        );
        let application = Application::new(
            &sua.id,
            &proof.id,
            &ctx.principal_id,
            command.contact.trim(),
        );
        sua.application_id = Some(application.id.clone());

        let event = ApplicationSubmitted::new(
            &ctx,
            &application.id,
            &sua.id,
            &proof.id,
            &sua.student_id,
        );

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

    fn valid_command() -> CreateApplicationCommand {
        CreateApplicationCommand {
            contact: "13800000000".to_string(),
            sua: ApplicationSuaCommand {
                student_id: "s-1".to_string(),
                activity_id: "a-1".to_string(),
                team: "A".to_string(),
                suahours: 2.0,
            },
            proof: CreateProofCommand {
                proof_file: Some("uploads/receipt.pdf".to_string()),
                is_offline: false,
            },
        }
    }

    #[test]
    fn test_valid_command_passes() {
        assert!(valid_command().validate().is_ok());
    }

    #[test]
    fn test_proof_without_evidence_rejected() {
        let mut command = valid_command();
        command.proof = CreateProofCommand {
            proof_file: None,
            is_offline: false,
        };

        let err = command.validate().unwrap_err();
        assert_eq!(
            err.details().get("proof"),
            Some(&serde_json::json!("missing evidence"))
        );
    }

    #[test]
    fn test_offline_proof_is_evidence() {
        let mut command = valid_command();
        command.proof = CreateProofCommand {
            proof_file: None,
            is_offline: true,
        };
        assert!(command.validate().is_ok());
    }

    #[test]
    fn test_blank_file_is_not_evidence() {
        let proof = CreateProofCommand {
            proof_file: Some("   ".to_string()),
            is_offline: false,
        };
        assert!(!proof.has_evidence());
    }

    #[test]
    fn test_sua_and_proof_errors_reported_together() {
        let command = CreateApplicationCommand {
            contact: "".to_string(),
            sua: ApplicationSuaCommand {
                student_id: "".to_string(),
                activity_id: "a-1".to_string(),
                team: "".to_string(),
                suahours: 0.0,
            },
            proof: CreateProofCommand {
                proof_file: None,
                is_offline: false,
            },
        };

        let err = command.validate().unwrap_err();
        let details = err.details();
        assert!(details.contains_key("sua.studentId"));
        assert!(details.contains_key("sua.suahours"));
        assert!(details.contains_key("proof"));
    }
}
