//! Proof Repository

use mongodb::{Collection, Database, bson::doc};
use crate::proof::entity::Proof;
use crate::shared::error::Result;

pub struct ProofRepository {
    collection: Collection<Proof>,
}

impl ProofRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("proofs"),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Proof>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
