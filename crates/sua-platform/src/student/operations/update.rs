//! Update Student Use Case
//!
//! Partial update with absent-unchanged semantics for every field. The
//! account secret is re-hashed only when a new one is supplied; a number
//! change keeps the Principal's login name in sync.

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::password_service::PasswordService;
use crate::principal::repository::PrincipalRepository;
use crate::student::entity::Student;
use crate::student::repository::StudentRepository;
use crate::usecase::{
    ExecutionContext, FieldErrors, UnitOfWork, UseCaseError, UseCaseResult,
};
use super::create::number_pattern;
use super::events::StudentUpdated;

/// Command for updating an existing student. Absent fields leave the
/// stored values unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentCommand {
    /// Student ID to update
    #[serde(default)]
    pub student_id: String,

    #[serde(default)]
    pub number: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub suahours: Option<f64>,

    #[serde(default)]
    pub grade: Option<i32>,

    #[serde(default)]
    pub classtype: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub power: Option<i32>,

    /// New secret; absent means the stored hash is kept.
    /// Never serialized: the audit log must not record secrets.
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
}

impl UpdateStudentCommand {
    pub fn validate(&self) -> Result<(), UseCaseError> {
        let mut errors = FieldErrors::new();

        if self.student_id.trim().is_empty() {
            errors.push("studentId", "is required");
        }

        if let Some(ref number) = self.number {
            if !number_pattern().is_match(number.trim()) {
                errors.push("number", "must be 4-20 digits");
            }
        }

        if let Some(hours) = self.suahours {
            if hours < 0.0 {
                errors.push("suahours", "must not be negative");
            }
        }

        if let Some(power) = self.power {
            if !(0..=1).contains(&power) {
                errors.push("power", "must be 0 or 1");
            }
        }

        errors.into_result("INVALID_STUDENT", "Student payload is invalid")
    }
}

/// Use case for updating an existing student.
pub struct UpdateStudentUseCase<U: UnitOfWork> {
    student_repo: Arc<StudentRepository>,
    principal_repo: Arc<PrincipalRepository>,
    password_service: Arc<PasswordService>,
    unit_of_work: Arc<U>,
}

impl<U: UnitOfWork> UpdateStudentUseCase<U> {
    pub fn new(
        student_repo: Arc<StudentRepository>,
        principal_repo: Arc<PrincipalRepository>,
        password_service: Arc<PasswordService>,
        unit_of_work: Arc<U>,
    ) -> Self {
        Self {
            student_repo,
            principal_repo,
            password_service,
            unit_of_work,
        }
    }

    pub async fn execute(
        &self,
        command: UpdateStudentCommand,
        ctx: ExecutionContext,
    ) -> UseCaseResult<Student> {
        if let Err(e) = command.validate() {
            return UseCaseResult::failure(e);
        }

        let mut student = match self.student_repo.find_by_id(&command.student_id).await {
            Ok(Some(s)) => s,
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
        };

        let mut principal = match self.principal_repo.find_by_id(&student.principal_id).await {
            Ok(Some(p)) => p,
            Ok(None) => {
                return UseCaseResult::failure(UseCaseError::not_found(
                    "ACCOUNT_NOT_FOUND",
                    format!("Account for student '{}' not found", student.id),
                ));
            }
            Err(e) => {
                return UseCaseResult::failure(UseCaseError::integrity(format!(
                    "Failed to fetch account: {}",
                    e
                )));
            }
        };

        // Secret rotation only when a new one is supplied
        let password_changed = match command.password.as_deref() {
            Some(secret) => {
                let hash = match self.password_service.hash_password(secret) {
                    Ok(h) => h,
                    Err(e) => {
                        return UseCaseResult::failure(UseCaseError::validation(
                            "INVALID_PASSWORD",
                            e.to_string(),
                        ));
                    }
                };
                principal.set_password_hash(hash);
                true
            }
            None => false,
        };

        // A number change renames the login; uniqueness is re-checked
        let mut changed_number: Option<String> = None;
        if let Some(ref number) = command.number {
            let number = number.trim();
            if number != student.number {
                match self.principal_repo.find_by_username(number).await {
                    Ok(Some(_)) => {
                        return UseCaseResult::failure(UseCaseError::conflict_with_details(
                            "STUDENT_NUMBER_EXISTS",
                            format!("Student number '{}' is already registered", number),
                            crate::details! { "number" => number },
                        ));
                    }
                    Ok(None) => {}
                    Err(e) => {
                        return UseCaseResult::failure(UseCaseError::integrity(format!(
                            "Failed to check student number: {}",
                            e
                        )));
                    }
                }
                principal.rename(number);
                changed_number = Some(number.to_string());
            }
        }

        student.apply_update(
            changed_number.clone(),
            command.name.clone(),
            command.suahours,
            command.grade,
            command.classtype.clone(),
            command.phone.clone(),
            command.power,
        );

        let event = StudentUpdated::new(
            &ctx,
            &student.id,
            changed_number.as_deref(),
            password_changed,
        );

        self.unit_of_work
            .commit_all(
                vec![Box::new(principal), Box::new(student.clone())],
                event,
                &command,
            )
            .await
            .map(|_| student)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_update_is_valid() {
        let command = UpdateStudentCommand {
            student_id: "s-1".to_string(),
            number: None,
            name: None,
            suahours: None,
            grade: None,
            classtype: None,
            phone: None,
            power: None,
            password: None,
        };
        assert!(command.validate().is_ok());
    }

    #[test]
    fn test_bad_fields_collected() {
        let command = UpdateStudentCommand {
            student_id: "".to_string(),
            number: Some("xyz".to_string()),
            name: None,
            suahours: Some(-2.0),
            grade: None,
            classtype: None,
            phone: None,
            power: Some(9),
            password: None,
        };
        let err = command.validate().unwrap_err();
        let details = err.details();
        assert!(details.contains_key("studentId"));
        assert!(details.contains_key("number"));
        assert!(details.contains_key("suahours"));
        assert!(details.contains_key("power"));
    }

    #[test]
    fn test_password_never_serialized() {
        let command = UpdateStudentCommand {
            student_id: "s-1".to_string(),
            number: None,
            name: None,
            suahours: None,
            grade: None,
            classtype: None,
            phone: None,
            power: None,
            password: Some("rotated-secret".to_string()),
        };

        let json = serde_json::to_string(&command).unwrap();
        assert!(!json.contains("rotated-secret"));
    }
}
