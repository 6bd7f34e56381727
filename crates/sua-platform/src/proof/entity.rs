//! Proof Entity
//!
//! Evidence of participation: an uploaded file reference, or an explicit
//! offline flag. At least one must be present for the proof to be valid.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use bson::serde_helpers::chrono_datetime_as_bson_datetime;

use crate::usecase::unit_of_work::HasId;

/// Proof entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proof {
    /// TSID as Crockford Base32 string
    #[serde(rename = "_id")]
    pub id: String,

    /// Principal that submitted the proof
    pub owner_id: String,

    /// Stored file reference (upload path or URL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_file: Option<String>,

    /// Evidence was handed in offline
    #[serde(default)]
    pub is_offline: bool,

    /// Audit fields
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Proof {
    pub fn new(
        owner_id: impl Into<String>,
        proof_file: Option<String>,
        is_offline: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: crate::TsidGenerator::generate(),
            owner_id: owner_id.into(),
            proof_file,
            is_offline,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the proof actually carries evidence.
    pub fn has_evidence(&self) -> bool {
        self.proof_file.is_some() || self.is_offline
    }
}

impl HasId for Proof {
    fn id(&self) -> &str {
        &self.id
    }

    fn collection_name() -> &'static str {
        "proofs"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evidence_rule() {
        let with_file = Proof::new("p-1", Some("uploads/receipt.pdf".to_string()), false);
        assert!(with_file.has_evidence());

        let offline = Proof::new("p-1", None, true);
        assert!(offline.has_evidence());

        let neither = Proof::new("p-1", None, false);
        assert!(!neither.has_evidence());

        let both = Proof::new("p-1", Some("uploads/receipt.pdf".to_string()), true);
        assert!(both.has_evidence());
    }
}
