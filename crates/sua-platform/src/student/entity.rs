//! Student Entity
//!
//! A student profile owning accrued activity hours. Created together with
//! its Principal account; `number` is unique and equals the Principal's
//! username.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use bson::serde_helpers::chrono_datetime_as_bson_datetime;

use crate::usecase::unit_of_work::HasId;

/// Student entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// TSID as Crockford Base32 string
    #[serde(rename = "_id")]
    pub id: String,

    /// Owning principal (1:1)
    pub principal_id: String,

    /// Student number (unique, used as login name)
    pub number: String,

    /// Display name
    pub name: String,

    /// Accrued activity hours
    #[serde(default)]
    pub suahours: f64,

    /// Grade/year
    pub grade: i32,

    /// Class type label
    pub classtype: String,

    /// Contact phone
    pub phone: String,

    /// Power level: 0 regular, 1 elevated (may self-approve activity
    /// creation)
    #[serde(default)]
    pub power: i32,

    /// Audit fields
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Student {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        principal_id: impl Into<String>,
        number: impl Into<String>,
        name: impl Into<String>,
        suahours: f64,
        grade: i32,
        classtype: impl Into<String>,
        phone: impl Into<String>,
        power: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: crate::TsidGenerator::generate(),
            principal_id: principal_id.into(),
            number: number.into(),
            name: name.into(),
            suahours,
            grade,
            classtype: classtype.into(),
            phone: phone.into(),
            power,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this student may self-approve activity creation.
    pub fn is_elevated(&self) -> bool {
        self.power == 1
    }

    /// Partial update: an absent field leaves the existing value
    /// unchanged, never clears it. This is the update policy for every
    /// partial update in this system.
    pub fn apply_update(
        &mut self,
        number: Option<String>,
        name: Option<String>,
        suahours: Option<f64>,
        grade: Option<i32>,
        classtype: Option<String>,
        phone: Option<String>,
        power: Option<i32>,
    ) {
        if let Some(number) = number {
            self.number = number;
        }
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(suahours) = suahours {
            self.suahours = suahours;
        }
        if let Some(grade) = grade {
            self.grade = grade;
        }
        if let Some(classtype) = classtype {
            self.classtype = classtype;
        }
        if let Some(phone) = phone {
            self.phone = phone;
        }
        if let Some(power) = power {
            self.power = power;
        }
        self.updated_at = Utc::now();
    }
}

impl HasId for Student {
    fn id(&self) -> &str {
        &self.id
    }

    fn collection_name() -> &'static str {
        "students"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Student {
        Student::new("p-1", "2016011234", "Zhang San", 0.0, 2016, "normal", "13800000000", 0)
    }

    #[test]
    fn test_new_student() {
        let student = sample();
        assert_eq!(student.number, "2016011234");
        assert_eq!(student.suahours, 0.0);
        assert!(!student.is_elevated());
        assert_eq!(Student::collection_name(), "students");
    }

    #[test]
    fn test_elevation() {
        let mut student = sample();
        student.power = 1;
        assert!(student.is_elevated());
    }

    #[test]
    fn test_apply_update_absent_fields_unchanged() {
        let mut student = sample();
        student.apply_update(
            None,
            Some("Li Si".to_string()),
            None,
            None,
            None,
            None,
            None,
        );

        // Supplied field overwritten, absent fields untouched
        assert_eq!(student.name, "Li Si");
        assert_eq!(student.number, "2016011234");
        assert_eq!(student.phone, "13800000000");
        assert_eq!(student.grade, 2016);
    }

    #[test]
    fn test_apply_update_phone_overwrite() {
        let mut student = sample();
        student.apply_update(None, None, None, None, None, Some("13911111111".to_string()), None);
        assert_eq!(student.phone, "13911111111");
    }
}
