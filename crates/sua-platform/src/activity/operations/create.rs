//! Create Activity Use Case
//!
//! Creates the Activity, then each child Sua with the acting principal as
//! owner, in one transaction. Whether the activity counts as
//! student-created is derived once here from the creator's privileges.

use std::sync::Arc;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::activity::entity::Activity;
use crate::principal::repository::PrincipalRepository;
use crate::student::repository::StudentRepository;
use crate::sua::entity::Sua;
use crate::usecase::{
    ExecutionContext, FieldErrors, UnitOfWork, UseCaseError, UseCaseResult,
    unit_of_work::SerializableAggregate,
};
use super::events::ActivityCreated;

/// Nested participation payload inside an activity creation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSuaCommand {
    /// Participating student
    pub student_id: String,

    /// Team label
    #[serde(default)]
    pub team: String,

    /// Hours claimed
    pub suahours: f64,
}

/// Command for creating a new activity with its participation records.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityCommand {
    pub title: String,

    #[serde(default)]
    pub detail: String,

    /// Day the activity takes place
    pub date: NaiveDate,

    /// Organizing group label
    pub group: String,

    /// Child participation records, created with the activity
    #[serde(default)]
    pub suas: Vec<CreateSuaCommand>,
}

impl CreateActivityCommand {
    /// Exhaustive field validation; nested entries are reported as
    /// `suas[i].field`.
    pub fn validate(&self) -> Result<(), UseCaseError> {
        let mut errors = FieldErrors::new();

        errors.require_str("title", &self.title);
        errors.require_str("group", &self.group);

        for (i, sua) in self.suas.iter().enumerate() {
            if sua.student_id.trim().is_empty() {
                errors.push(format!("suas[{}].studentId", i), "is required");
            }
            if !(sua.suahours > 0.0) {
                errors.push(format!("suas[{}].suahours", i), "must be greater than zero");
            }
        }

        errors.into_result("INVALID_ACTIVITY", "Activity payload is invalid")
    }
}

/// Whether an activity created by this principal counts as
/// student-created. Staff and elevated students (power 1) self-approve,
/// so their activities do not.
pub(crate) fn derive_student_created(is_staff: bool, power: i32) -> bool {
    !(is_staff || power == 1)
}

/// Use case for creating a new activity.
pub struct CreateActivityUseCase<U: UnitOfWork> {
    principal_repo: Arc<PrincipalRepository>,
    student_repo: Arc<StudentRepository>,
    unit_of_work: Arc<U>,
}

impl<U: UnitOfWork> CreateActivityUseCase<U> {
    pub fn new(
        principal_repo: Arc<PrincipalRepository>,
        student_repo: Arc<StudentRepository>,
        unit_of_work: Arc<U>,
    ) -> Self {
        Self {
            principal_repo,
            student_repo,
            unit_of_work,
        }
    }

    pub async fn execute(
        &self,
        command: CreateActivityCommand,
        ctx: ExecutionContext,
    ) -> UseCaseResult<Activity> {
        if let Err(e) = command.validate() {
            return UseCaseResult::failure(e);
        }

        // The creator's privileges fix is_created_by_student for the
        // lifetime of the record
        let principal = match self.principal_repo.find_by_id(&ctx.principal_id).await {
            Ok(Some(p)) => p,
            Ok(None) => {
                return UseCaseResult::failure(UseCaseError::not_found(
                    "PRINCIPAL_NOT_FOUND",
                    format!("Acting principal '{}' not found", ctx.principal_id),
                ));
            }
            Err(e) => {
                return UseCaseResult::failure(UseCaseError::integrity(format!(
                    "Failed to fetch acting principal: {}",
                    e
                )));
            }
        };

        let power = match self.student_repo.find_by_principal(&principal.id).await {
            Ok(profile) => profile.map(|s| s.power).unwrap_or(0),
            Err(e) => {
                return UseCaseResult::failure(UseCaseError::integrity(format!(
                    "Failed to fetch student profile: {}",
                    e
                )));
            }
        };

        // Referenced students must exist before their Suas are written
        for sua in &command.suas {
            match self.student_repo.find_by_id(&sua.student_id).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    return UseCaseResult::failure(UseCaseError::not_found(
                        "STUDENT_NOT_FOUND",
                        format!("Student with ID '{}' not found", sua.student_id),
                    ));
                }
                Err(e) => {
                    return UseCaseResult::failure(UseCaseError::integrity(format!(
                        "Failed to fetch student: {}",
                        e
                    )));
                }
            }
        }

        let activity = Activity::new(
            command.title.trim(),
            command.detail.trim(),
            command.date,
            command.group.trim(),
            &ctx.principal_id,
            derive_student_created(principal.is_staff, power),
        );

        // Parent first, then each child referencing it
        let mut aggregates: Vec<Box<dyn SerializableAggregate>> =
            vec![Box::new(activity.clone())];
        for sua in &command.suas {
            aggregates.push(Box::new(Sua::new(
                &sua.student_id,
                &activity.id,
                sua.team.trim(),
                sua.suahours,
                &ctx.principal_id,
            )));
        }

        let event = ActivityCreated::new(
            &ctx,
            &activity.id,
            &activity.title,
            activity.is_created_by_student,
            command.suas.len(),
        );

        self.unit_of_work
            .commit_all(aggregates, event, &command)
            .await
            .map(|_| activity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_command() -> CreateActivityCommand {
        CreateActivityCommand {
            title: "Cleanup Day".to_string(),
            detail: "".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            group: "G1".to_string(),
            suas: vec![CreateSuaCommand {
                student_id: "s-1".to_string(),
                team: "A".to_string(),
                suahours: 2.0,
            }],
        }
    }

    #[test]
    fn test_valid_command_passes() {
        assert!(valid_command().validate().is_ok());
    }

    #[test]
    fn test_derivation_matrix() {
        // staff -> not student-created
        assert!(!derive_student_created(true, 0));
        // elevated student -> not student-created
        assert!(!derive_student_created(false, 1));
        // regular student -> student-created
        assert!(derive_student_created(false, 0));
        // staff trumps power either way
        assert!(!derive_student_created(true, 1));
    }

    #[test]
    fn test_nested_sua_errors_are_indexed() {
        let mut command = valid_command();
        command.suas.push(CreateSuaCommand {
            student_id: "".to_string(),
            team: "B".to_string(),
            suahours: 0.0,
        });

        let err = command.validate().unwrap_err();
        let details = err.details();
        assert!(details.contains_key("suas[1].studentId"));
        assert!(details.contains_key("suas[1].suahours"));
        // The valid first entry produced no report
        assert!(!details.contains_key("suas[0].studentId"));
    }

    #[test]
    fn test_empty_sua_list_is_allowed() {
        let mut command = valid_command();
        command.suas.clear();
        assert!(command.validate().is_ok());
    }

    #[test]
    fn test_command_deserializes_wire_example() {
        let json = r#"{
            "title": "Cleanup Day",
            "group": "G1",
            "date": "2024-03-01",
            "suas": [{"studentId": "s-1", "team": "A", "suahours": 2}]
        }"#;
        let command: CreateActivityCommand = serde_json::from_str(json).unwrap();
        assert_eq!(command.suas.len(), 1);
        assert_eq!(command.suas[0].suahours, 2.0);
        assert_eq!(command.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }
}
