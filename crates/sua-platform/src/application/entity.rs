//! Application Entity
//!
//! A request to credit a Sua, bundling the Sua with its Proof. Review
//! state moves forward only: unchecked -> checked, status set exactly
//! once when checking occurs.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use utoipa::ToSchema;

use crate::usecase::unit_of_work::HasId;

/// Review outcome for applications and appeals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    /// Awaiting review
    Pending,
    /// Credited / upheld
    Approved,
    /// Declined
    Rejected,
}

impl Default for ReviewStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Application entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// TSID as Crockford Base32 string
    #[serde(rename = "_id")]
    pub id: String,

    /// The Sua this application asks credit for
    pub sua_id: String,

    /// Evidence of participation
    pub proof_id: String,

    /// Principal that submitted the application
    pub owner_id: String,

    /// Contact information for follow-up questions
    #[serde(default)]
    pub contact: String,

    /// Whether a reviewer has checked the application
    #[serde(default)]
    pub is_checked: bool,

    /// Review outcome, PENDING until checked
    #[serde(default)]
    pub status: ReviewStatus,

    /// Reviewer feedback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,

    /// Audit fields
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Application {
    pub fn new(
        sua_id: impl Into<String>,
        proof_id: impl Into<String>,
        owner_id: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: crate::TsidGenerator::generate(),
            sua_id: sua_id.into(),
            proof_id: proof_id.into(),
            owner_id: owner_id.into(),
            contact: contact.into(),
            is_checked: false,
            status: ReviewStatus::Pending,
            feedback: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record the review decision. Callers reject re-reviewing a checked
    /// application before getting here.
    pub fn mark_checked(&mut self, status: ReviewStatus, feedback: Option<String>) {
        self.is_checked = true;
        self.status = status;
        self.feedback = feedback;
        self.updated_at = Utc::now();
    }

    /// Partial update with absent-unchanged semantics.
    pub fn apply_update(&mut self, contact: Option<String>) {
        if let Some(contact) = contact {
            self.contact = contact;
        }
        self.updated_at = Utc::now();
    }
}

impl HasId for Application {
    fn id(&self) -> &str {
        &self.id
    }

    fn collection_name() -> &'static str {
        "applications"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_application_is_unchecked() {
        let application = Application::new("sua-1", "proof-1", "p-1", "13800000000");
        assert!(!application.is_checked);
        assert_eq!(application.status, ReviewStatus::Pending);
        assert!(application.feedback.is_none());
        assert_eq!(Application::collection_name(), "applications");
    }

    #[test]
    fn test_mark_checked() {
        let mut application = Application::new("sua-1", "proof-1", "p-1", "13800000000");
        application.mark_checked(ReviewStatus::Approved, Some("ok".to_string()));

        assert!(application.is_checked);
        assert_eq!(application.status, ReviewStatus::Approved);
        assert_eq!(application.feedback.as_deref(), Some("ok"));
    }

    #[test]
    fn test_apply_update_absent_unchanged() {
        let mut application = Application::new("sua-1", "proof-1", "p-1", "13800000000");
        application.apply_update(None);
        assert_eq!(application.contact, "13800000000");

        application.apply_update(Some("13911111111".to_string()));
        assert_eq!(application.contact, "13911111111");
    }

    #[test]
    fn test_review_status_serialization() {
        assert_eq!(
            serde_json::to_string(&ReviewStatus::Approved).unwrap(),
            "\"APPROVED\""
        );
        let status: ReviewStatus = serde_json::from_str("\"REJECTED\"").unwrap();
        assert_eq!(status, ReviewStatus::Rejected);
    }
}
