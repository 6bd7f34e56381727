//! Publicity Repository

use mongodb::{Collection, Database, bson::doc};
use futures::TryStreamExt;
use crate::publicity::entity::Publicity;
use crate::shared::error::Result;

pub struct PublicityRepository {
    collection: Collection<Publicity>,
}

impl PublicityRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("publicities"),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Publicity>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    pub async fn find_all(&self) -> Result<Vec<Publicity>> {
        let cursor = self.collection
            .find(doc! {})
            .sort(doc! { "begin": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn find_published(&self) -> Result<Vec<Publicity>> {
        let cursor = self.collection
            .find(doc! { "isPublished": true })
            .sort(doc! { "begin": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn find_by_activity(&self, activity_id: &str) -> Result<Vec<Publicity>> {
        let cursor = self.collection
            .find(doc! { "activityId": activity_id })
            .sort(doc! { "begin": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
