//! Principal Repository

use mongodb::{Collection, Database, bson::doc};
use futures::TryStreamExt;
use crate::principal::entity::Principal;
use crate::shared::error::Result;

pub struct PrincipalRepository {
    collection: Collection<Principal>,
}

impl PrincipalRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("principals"),
        }
    }

    pub async fn insert(&self, principal: &Principal) -> Result<()> {
        self.collection.insert_one(principal).await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Principal>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<Principal>> {
        Ok(self.collection.find_one(doc! { "username": username }).await?)
    }

    pub async fn find_active(&self) -> Result<Vec<Principal>> {
        let cursor = self.collection
            .find(doc! { "active": true })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn update(&self, principal: &Principal) -> Result<()> {
        self.collection
            .replace_one(doc! { "_id": &principal.id }, principal)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
