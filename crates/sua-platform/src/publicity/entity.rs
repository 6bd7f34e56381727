//! Publicity Entity
//!
//! A published announcement tied to an Activity, visible inside a
//! begin/end window. Students appeal against publicities.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use bson::serde_helpers::chrono_datetime_as_bson_datetime;

use crate::usecase::unit_of_work::HasId;

/// Publicity entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publicity {
    /// TSID as Crockford Base32 string
    #[serde(rename = "_id")]
    pub id: String,

    /// The activity being published
    pub activity_id: String,

    /// Principal that published the announcement
    pub owner_id: String,

    /// Announcement title
    pub title: String,

    /// Announcement body
    #[serde(default)]
    pub content: String,

    /// Contact for objections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,

    /// Publish flag
    #[serde(default)]
    pub is_published: bool,

    /// Visibility window
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub begin: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub end: DateTime<Utc>,

    /// Audit fields
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Publicity {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        activity_id: impl Into<String>,
        owner_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        contact: Option<String>,
        is_published: bool,
        begin: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: crate::TsidGenerator::generate(),
            activity_id: activity_id.into(),
            owner_id: owner_id.into(),
            title: title.into(),
            content: content.into(),
            contact,
            is_published,
            begin,
            end,
            created_at: now,
            updated_at: now,
        }
    }
}

impl HasId for Publicity {
    fn id(&self) -> &str {
        &self.id
    }

    fn collection_name() -> &'static str {
        "publicities"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_publicity() {
        let begin = Utc::now();
        let end = begin + chrono::Duration::days(7);
        let publicity = Publicity::new(
            "a-1", "p-staff", "March results", "Hours awarded", None, true, begin, end,
        );

        assert_eq!(publicity.activity_id, "a-1");
        assert!(publicity.is_published);
        assert_eq!(Publicity::collection_name(), "publicities");
    }
}
