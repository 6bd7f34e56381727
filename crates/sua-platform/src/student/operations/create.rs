//! Create Student Use Case
//!
//! Signup cascade: the Principal account is created first (secret hashed
//! before storage), then the Student referencing it. Both commit in one
//! transaction.

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use regex::Regex;
use utoipa::ToSchema;

use crate::auth::password_service::PasswordService;
use crate::principal::entity::Principal;
use crate::principal::repository::PrincipalRepository;
use crate::shared::settings::PlatformSettings;
use crate::student::entity::Student;
use crate::usecase::{
    ExecutionContext, FieldErrors, UnitOfWork, UseCaseError, UseCaseResult,
};
use super::events::StudentCreated;

/// Student number pattern: digits only, 4-20 characters
pub(crate) fn number_pattern() -> &'static Regex {
    static PATTERN: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{4,20}$").unwrap())
}

/// Command for creating a new student together with its account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentCommand {
    /// Student number (unique, becomes the login name)
    pub number: String,

    /// Display name
    pub name: String,

    /// Initial accrued hours (defaults to 0)
    #[serde(default)]
    pub suahours: Option<f64>,

    /// Grade/year
    pub grade: i32,

    /// Class type label
    pub classtype: String,

    /// Contact phone
    pub phone: String,

    /// Power level (defaults to 0)
    #[serde(default)]
    pub power: Option<i32>,

    /// Initial secret. When absent the configured default is used.
    /// Never serialized: the audit log must not record secrets.
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
}

impl CreateStudentCommand {
    /// Exhaustive field validation: every offending field is reported.
    pub fn validate(&self) -> Result<(), UseCaseError> {
        let mut errors = FieldErrors::new();

        let number = self.number.trim();
        if number.is_empty() {
            errors.push("number", "is required");
        } else if !number_pattern().is_match(number) {
            errors.push("number", "must be 4-20 digits");
        }

        errors.require_str("name", &self.name);
        errors.require_str("classtype", &self.classtype);
        errors.require_str("phone", &self.phone);

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

/// Use case for creating a new student.
pub struct CreateStudentUseCase<U: UnitOfWork> {
    principal_repo: Arc<PrincipalRepository>,
    password_service: Arc<PasswordService>,
    settings: PlatformSettings,
    unit_of_work: Arc<U>,
}

impl<U: UnitOfWork> CreateStudentUseCase<U> {
    pub fn new(
        principal_repo: Arc<PrincipalRepository>,
        password_service: Arc<PasswordService>,
        settings: PlatformSettings,
        unit_of_work: Arc<U>,
    ) -> Self {
        Self {
            principal_repo,
            password_service,
            settings,
            unit_of_work,
        }
    }

    pub async fn execute(
        &self,
        command: CreateStudentCommand,
        ctx: ExecutionContext,
    ) -> UseCaseResult<Student> {
        if let Err(e) = command.validate() {
            return UseCaseResult::failure(e);
        }

        let number = command.number.trim().to_string();

        // Business rule: the student number must not already exist as a
        // login name
        match self.principal_repo.find_by_username(&number).await {
            Ok(Some(_)) => {
                return UseCaseResult::failure(UseCaseError::conflict_with_details(
                    "STUDENT_NUMBER_EXISTS",
                    format!("Student number '{}' is already registered", number),
                    crate::details! { "number" => &number },
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

        // Hash the secret before anything is stored; the configured
        // default applies when the payload carries none
        let secret = command
            .password
            .as_deref()
            .unwrap_or(&self.settings.default_password);
        let password_hash = match self.password_service.hash_password(secret) {
            Ok(h) => h,
            Err(e) => {
                return UseCaseResult::failure(UseCaseError::validation(
                    "INVALID_PASSWORD",
                    e.to_string(),
                ));
            }
        };

        // Parent first: the Student references the Principal
        let principal = Principal::new(&number, password_hash, false);
        let student = Student::new(
            &principal.id,
            &number,
            command.name.trim(),
            command.suahours.unwrap_or(0.0),
            command.grade,
            command.classtype.trim(),
            command.phone.trim(),
            command.power.unwrap_or(0),
        );

        let event = StudentCreated::new(
            &ctx,
            &student.id,
            &principal.id,
            &student.number,
            &student.name,
        );

        // Atomic commit of the whole cascade
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

    fn valid_command() -> CreateStudentCommand {
        CreateStudentCommand {
            number: "2016011234".to_string(),
            name: "Zhang San".to_string(),
            suahours: None,
            grade: 2016,
            classtype: "normal".to_string(),
            phone: "13800000000".to_string(),
            power: None,
            password: None,
        }
    }

    #[test]
    fn test_valid_command_passes() {
        assert!(valid_command().validate().is_ok());
    }

    #[test]
    fn test_number_pattern() {
        assert!(number_pattern().is_match("2016011234"));
        assert!(!number_pattern().is_match("abc123"));
        assert!(!number_pattern().is_match("123"));
        assert!(!number_pattern().is_match(""));
    }

    #[test]
    fn test_validation_is_exhaustive() {
        let command = CreateStudentCommand {
            number: "abc".to_string(),
            name: "".to_string(),
            suahours: Some(-1.0),
            grade: 2016,
            classtype: "normal".to_string(),
            phone: "".to_string(),
            power: Some(3),
            password: None,
        };

        let err = command.validate().unwrap_err();
        let details = err.details();
        // Every offending field is reported, not just the first
        assert!(details.contains_key("number"));
        assert!(details.contains_key("name"));
        assert!(details.contains_key("suahours"));
        assert!(details.contains_key("phone"));
        assert!(details.contains_key("power"));
    }

    #[test]
    fn test_password_never_serialized() {
        let mut command = valid_command();
        command.password = Some("topsecret".to_string());

        let json = serde_json::to_string(&command).unwrap();
        assert!(!json.contains("topsecret"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_command_deserializes_camel_case() {
        let json = r#"{
            "number": "2016011234",
            "name": "Zhang San",
            "grade": 2016,
            "classtype": "normal",
            "phone": "13800000000",
            "password": "mysecret"
        }"#;
        let command: CreateStudentCommand = serde_json::from_str(json).unwrap();
        assert_eq!(command.password.as_deref(), Some("mysecret"));
        assert!(command.power.is_none());
    }
}
