//! Appeal Entity
//!
//! A student's objection to a published result. References an existing
//! Student and Publicity; reviewed with the same forward-only transition
//! as applications.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use bson::serde_helpers::chrono_datetime_as_bson_datetime;

use crate::application::entity::ReviewStatus;
use crate::usecase::unit_of_work::HasId;

/// Appeal entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appeal {
    /// TSID as Crockford Base32 string
    #[serde(rename = "_id")]
    pub id: String,

    /// Objecting student
    pub student_id: String,

    /// The publicity being contested
    pub publicity_id: String,

    /// Principal that filed the appeal
    pub owner_id: String,

    /// Objection text
    pub content: String,

    /// Whether a reviewer has checked the appeal
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

impl Appeal {
    pub fn new(
        student_id: impl Into<String>,
        publicity_id: impl Into<String>,
        owner_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: crate::TsidGenerator::generate(),
            student_id: student_id.into(),
            publicity_id: publicity_id.into(),
            owner_id: owner_id.into(),
            content: content.into(),
            is_checked: false,
            status: ReviewStatus::Pending,
            feedback: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record the review decision. Callers reject re-reviewing a checked
    /// appeal before getting here.
    pub fn mark_checked(&mut self, status: ReviewStatus, feedback: Option<String>) {
        self.is_checked = true;
        self.status = status;
        self.feedback = feedback;
        self.updated_at = Utc::now();
    }
}

impl HasId for Appeal {
    fn id(&self) -> &str {
        &self.id
    }

    fn collection_name() -> &'static str {
        "appeals"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_appeal_is_unchecked() {
        let appeal = Appeal::new("s-1", "pub-1", "p-1", "My hours are missing");
        assert!(!appeal.is_checked);
        assert_eq!(appeal.status, ReviewStatus::Pending);
        assert_eq!(Appeal::collection_name(), "appeals");
    }

    #[test]
    fn test_mark_checked() {
        let mut appeal = Appeal::new("s-1", "pub-1", "p-1", "My hours are missing");
        appeal.mark_checked(ReviewStatus::Rejected, Some("records confirm".to_string()));

        assert!(appeal.is_checked);
        assert_eq!(appeal.status, ReviewStatus::Rejected);
    }
}
