//! Activity Repository

use mongodb::{Collection, Database, bson::doc};
use futures::TryStreamExt;
use crate::activity::entity::Activity;
use crate::shared::error::Result;

pub struct ActivityRepository {
    collection: Collection<Activity>,
}

impl ActivityRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("activities"),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Activity>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    pub async fn find_all(&self) -> Result<Vec<Activity>> {
        let cursor = self.collection
            .find(doc! {})
            .sort(doc! { "date": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn find_valid(&self) -> Result<Vec<Activity>> {
        let cursor = self.collection
            .find(doc! { "isValid": true })
            .sort(doc! { "date": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
