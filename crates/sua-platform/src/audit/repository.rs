//! Audit Log Repository

use mongodb::{Collection, Database, bson::doc};
use futures::TryStreamExt;
use crate::audit::entity::AuditLog;
use crate::shared::error::Result;

pub struct AuditLogRepository {
    collection: Collection<AuditLog>,
}

impl AuditLogRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("audit_logs"),
        }
    }

    pub async fn find_by_entity(&self, entity_type: &str, entity_id: &str) -> Result<Vec<AuditLog>> {
        let cursor = self.collection
            .find(doc! { "entityType": entity_type, "entityId": entity_id })
            .sort(doc! { "performedAt": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn find_by_principal(&self, principal_id: &str) -> Result<Vec<AuditLog>> {
        let cursor = self.collection
            .find(doc! { "principalId": principal_id })
            .sort(doc! { "performedAt": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }
}
