//! Sua Entity
//!
//! An activity participation record linking one Student to one Activity.
//! Suas are only ever created inside an Activity or Application cascade.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use bson::serde_helpers::chrono_datetime_as_bson_datetime;

use crate::usecase::unit_of_work::HasId;

/// Sua entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sua {
    /// TSID as Crockford Base32 string
    #[serde(rename = "_id")]
    pub id: String,

    /// Participating student
    pub student_id: String,

    /// The activity participated in
    pub activity_id: String,

    /// Team label within the activity
    pub team: String,

    /// Hours claimed
    pub suahours: f64,

    /// Principal that created the record
    pub owner_id: String,

    /// Validity flag
    #[serde(default = "default_valid")]
    pub is_valid: bool,

    /// Back-link to the credit application bundling this Sua, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,

    /// Audit fields
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

fn default_valid() -> bool {
    true
}

impl Sua {
    pub fn new(
        student_id: impl Into<String>,
        activity_id: impl Into<String>,
        team: impl Into<String>,
        suahours: f64,
        owner_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: crate::TsidGenerator::generate(),
            student_id: student_id.into(),
            activity_id: activity_id.into(),
            team: team.into(),
            suahours,
            owner_id: owner_id.into(),
            is_valid: true,
            application_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Partial update with absent-unchanged semantics. Ownership and the
    /// activity link are never retargeted here.
    pub fn apply_update(
        &mut self,
        student_id: Option<String>,
        team: Option<String>,
        suahours: Option<f64>,
    ) {
        if let Some(student_id) = student_id {
            self.student_id = student_id;
        }
        if let Some(team) = team {
            self.team = team;
        }
        if let Some(suahours) = suahours {
            self.suahours = suahours;
        }
        self.updated_at = Utc::now();
    }
}

impl HasId for Sua {
    fn id(&self) -> &str {
        &self.id
    }

    fn collection_name() -> &'static str {
        "suas"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sua() {
        let sua = Sua::new("s-1", "a-1", "A", 2.0, "p-staff");
        assert_eq!(sua.student_id, "s-1");
        assert_eq!(sua.activity_id, "a-1");
        assert!(sua.is_valid);
        assert!(sua.application_id.is_none());
        assert_eq!(Sua::collection_name(), "suas");
    }

    #[test]
    fn test_apply_update_absent_unchanged() {
        let mut sua = Sua::new("s-1", "a-1", "A", 2.0, "p-staff");
        sua.apply_update(None, Some("B".to_string()), None);

        assert_eq!(sua.team, "B");
        assert_eq!(sua.student_id, "s-1");
        assert_eq!(sua.suahours, 2.0);
        assert_eq!(sua.activity_id, "a-1");
    }
}
