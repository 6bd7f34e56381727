//! Activity Entity
//!
//! An event students accrue hours for. Whether the record was
//! student-created is fixed at creation from the creator's privileges and
//! never recomputed afterwards.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use bson::serde_helpers::chrono_datetime_as_bson_datetime;

use crate::usecase::unit_of_work::HasId;

/// Activity entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// TSID as Crockford Base32 string
    #[serde(rename = "_id")]
    pub id: String,

    /// Title shown to students
    pub title: String,

    /// Free-form description
    #[serde(default)]
    pub detail: String,

    /// Day the activity takes place
    pub date: NaiveDate,

    /// Organizing group label
    pub group: String,

    /// Principal that created the activity
    pub owner_id: String,

    /// Set once at creation: false when the creator was staff or an
    /// elevated student, true otherwise
    pub is_created_by_student: bool,

    /// Validity flag
    #[serde(default = "default_valid")]
    pub is_valid: bool,

    /// Audit fields
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

fn default_valid() -> bool {
    true
}

impl Activity {
    pub fn new(
        title: impl Into<String>,
        detail: impl Into<String>,
        date: NaiveDate,
        group: impl Into<String>,
        owner_id: impl Into<String>,
        is_created_by_student: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: crate::TsidGenerator::generate(),
            title: title.into(),
            detail: detail.into(),
            date,
            group: group.into(),
            owner_id: owner_id.into(),
            is_created_by_student,
            is_valid: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Partial update with absent-unchanged semantics.
    /// `is_created_by_student` is deliberately not updatable.
    pub fn apply_update(
        &mut self,
        title: Option<String>,
        detail: Option<String>,
        date: Option<NaiveDate>,
        group: Option<String>,
    ) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(detail) = detail {
            self.detail = detail;
        }
        if let Some(date) = date {
            self.date = date;
        }
        if let Some(group) = group {
            self.group = group;
        }
        self.updated_at = Utc::now();
    }
}

impl HasId for Activity {
    fn id(&self) -> &str {
        &self.id
    }

    fn collection_name() -> &'static str {
        "activities"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Activity {
        Activity::new(
            "Cleanup Day",
            "Campus cleanup",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            "G1",
            "p-staff",
            false,
        )
    }

    #[test]
    fn test_new_activity() {
        let activity = sample();
        assert_eq!(activity.title, "Cleanup Day");
        assert!(!activity.is_created_by_student);
        assert!(activity.is_valid);
        assert_eq!(Activity::collection_name(), "activities");
    }

    #[test]
    fn test_apply_update_absent_unchanged() {
        let mut activity = sample();
        activity.apply_update(Some("Tree Planting".to_string()), None, None, None);

        assert_eq!(activity.title, "Tree Planting");
        assert_eq!(activity.detail, "Campus cleanup");
        assert_eq!(activity.group, "G1");
    }

    #[test]
    fn test_creator_flag_survives_update() {
        let mut activity = sample();
        activity.apply_update(None, None, None, Some("G2".to_string()));
        assert!(!activity.is_created_by_student);
    }
}
