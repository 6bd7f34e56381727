//! Platform Integration Tests
//!
//! Tests for domain models, the cascade building blocks, and
//! authorization checks.

use sua_platform::{
    Activity, Appeal, Application, Principal, Proof, ReviewStatus, Student, Sua,
    TsidGenerator,
};

// Unit tests for domain models
mod domain_tests {
    use super::*;
    use chrono::NaiveDate;

    fn student() -> Student {
        Student::new(
            "p-1",
            "2016011234",
            "Zhang San",
            0.0,
            2016,
            "normal",
            "13800000000",
            0,
        )
    }

    #[test]
    fn test_student_and_principal_share_number() {
        let principal = Principal::new("2016011234", "$argon2id$fake", false);
        let student = student();
        assert_eq!(principal.username, student.number);
    }

    #[test]
    fn test_student_absent_unchanged_policy() {
        let mut student = student();
        let original_phone = student.phone.clone();

        // Omitting phone leaves the stored value unchanged
        student.apply_update(None, Some("Li Si".to_string()), None, None, None, None, None);
        assert_eq!(student.phone, original_phone);

        // Supplying a new phone overwrites it
        student.apply_update(None, None, None, None, None, Some("13911111111".to_string()), None);
        assert_eq!(student.phone, "13911111111");
    }

    #[test]
    fn test_activity_creator_flag_is_immutable() {
        let mut activity = Activity::new(
            "Cleanup Day",
            "",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            "G1",
            "p-staff",
            false,
        );

        activity.apply_update(Some("Renamed".to_string()), None, None, None);
        assert!(!activity.is_created_by_student);
    }

    #[test]
    fn test_sua_owner_recorded() {
        let sua = Sua::new("s-1", "a-1", "A", 2.0, "p-staff");
        assert_eq!(sua.owner_id, "p-staff");
    }

    #[test]
    fn test_proof_evidence_rule() {
        assert!(Proof::new("p-1", Some("uploads/f.pdf".to_string()), false).has_evidence());
        assert!(Proof::new("p-1", None, true).has_evidence());
        assert!(!Proof::new("p-1", None, false).has_evidence());
    }

    #[test]
    fn test_application_review_is_forward_only_state() {
        let mut application = Application::new("sua-1", "proof-1", "p-1", "contact");
        assert!(!application.is_checked);
        assert_eq!(application.status, ReviewStatus::Pending);

        application.mark_checked(ReviewStatus::Approved, None);
        assert!(application.is_checked);
        assert_eq!(application.status, ReviewStatus::Approved);
    }

    #[test]
    fn test_appeal_defaults() {
        let appeal = Appeal::new("s-1", "pub-1", "p-1", "content");
        assert!(!appeal.is_checked);
        assert_eq!(appeal.status, ReviewStatus::Pending);
        assert_eq!(appeal.owner_id, "p-1");
    }

    #[test]
    fn test_tsid_shape() {
        let id = TsidGenerator::generate();
        assert_eq!(id.len(), 13);
    }
}

// Codec (encode) tests: responses never leak credentials and round-trip
// every non-secret field
mod codec_tests {
    use super::*;
    use sua_platform::student::api::StudentResponse;

    #[test]
    fn test_student_encode_round_trips_non_secret_fields() {
        let student = Student::new(
            "p-1",
            "2016011234",
            "Zhang San",
            3.5,
            2016,
            "normal",
            "13800000000",
            1,
        );
        let expected_id = student.id.clone();

        let response = StudentResponse::from(student);
        assert_eq!(response.id, expected_id);
        assert_eq!(response.number, "2016011234");
        assert_eq!(response.name, "Zhang San");
        assert_eq!(response.suahours, 3.5);
        assert_eq!(response.grade, 2016);
        assert_eq!(response.classtype, "normal");
        assert_eq!(response.phone, "13800000000");
        assert_eq!(response.power, 1);
    }

    #[test]
    fn test_student_response_has_no_credential_field() {
        let student = Student::new(
            "p-1",
            "2016011234",
            "Zhang San",
            0.0,
            2016,
            "normal",
            "13800000000",
            0,
        );
        let json = serde_json::to_string(&StudentResponse::from(student)).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("hash"));
    }
}

// Authorization context tests
mod authorization_tests {
    use sua_platform::{checks, AuthContext};

    fn staff() -> AuthContext {
        AuthContext {
            principal_id: "p-admin".to_string(),
            username: "admin".to_string(),
            is_staff: true,
            student_id: None,
            power: 0,
        }
    }

    fn student(power: i32) -> AuthContext {
        AuthContext {
            principal_id: "p-1".to_string(),
            username: "2016011234".to_string(),
            is_staff: false,
            student_id: Some("s-1".to_string()),
            power,
        }
    }

    #[test]
    fn test_staff_writes_anything() {
        assert!(checks::require_staff(&staff()).is_ok());
        assert!(checks::require_staff_or_owner(&staff(), "someone-else").is_ok());
        assert!(checks::require_staff_or_student(&staff(), "s-99").is_ok());
    }

    #[test]
    fn test_student_limited_to_own_resources() {
        let ctx = student(0);
        assert!(checks::require_staff(&ctx).is_err());
        assert!(checks::require_staff_or_owner(&ctx, "p-1").is_ok());
        assert!(checks::require_staff_or_owner(&ctx, "p-2").is_err());
        assert!(checks::require_staff_or_student(&ctx, "s-1").is_ok());
        assert!(checks::require_staff_or_student(&ctx, "s-2").is_err());
    }

    #[test]
    fn test_elevation() {
        assert!(staff().is_elevated());
        assert!(student(1).is_elevated());
        assert!(!student(0).is_elevated());
    }
}
