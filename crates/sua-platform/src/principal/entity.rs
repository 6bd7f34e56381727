//! Principal Entity
//!
//! An authenticated identity. A student principal's username always
//! equals the owned Student's number; the two are created and updated
//! together in one cascade.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use bson::serde_helpers::chrono_datetime_as_bson_datetime;

use crate::usecase::unit_of_work::HasId;

/// Principal entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// TSID as Crockford Base32 string
    #[serde(rename = "_id")]
    pub id: String,

    /// Login name (unique). Student accounts use the student number.
    pub username: String,

    /// Argon2id hash in PHC format. Write-only: persisted, but never
    /// projected into any API response.
    pub password_hash: String,

    /// Staff accounts may write any resource
    #[serde(default)]
    pub is_staff: bool,

    /// Whether the principal is active
    #[serde(default = "default_active")]
    pub active: bool,

    /// Audit fields
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Principal {
    /// Create a new principal with an already-hashed secret.
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        is_staff: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: crate::TsidGenerator::generate(),
            username: username.into(),
            password_hash: password_hash.into(),
            is_staff,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the stored secret with a new hash.
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
        self.updated_at = Utc::now();
    }

    /// Change the login name. Callers keep this in sync with the owned
    /// Student's number.
    pub fn rename(&mut self, username: impl Into<String>) {
        self.username = username.into();
        self.updated_at = Utc::now();
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.updated_at = Utc::now();
    }

    pub fn activate(&mut self) {
        self.active = true;
        self.updated_at = Utc::now();
    }
}

impl HasId for Principal {
    fn id(&self) -> &str {
        &self.id
    }

    fn collection_name() -> &'static str {
        "principals"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_principal() {
        let principal = Principal::new("2016011234", "$argon2id$fake", false);
        assert_eq!(principal.username, "2016011234");
        assert!(!principal.is_staff);
        assert!(principal.active);
        assert_eq!(Principal::collection_name(), "principals");
    }

    #[test]
    fn test_set_password_hash() {
        let mut principal = Principal::new("2016011234", "$argon2id$old", false);
        principal.set_password_hash("$argon2id$new");
        assert_eq!(principal.password_hash, "$argon2id$new");
    }

    #[test]
    fn test_activation() {
        let mut principal = Principal::new("2016011234", "$argon2id$fake", false);
        principal.deactivate();
        assert!(!principal.active);
        principal.activate();
        assert!(principal.active);
    }
}
