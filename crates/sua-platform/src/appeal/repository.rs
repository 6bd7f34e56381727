//! Appeal Repository

use mongodb::{Collection, Database, bson::doc};
use futures::TryStreamExt;
use crate::appeal::entity::Appeal;
use crate::shared::error::Result;

pub struct AppealRepository {
    collection: Collection<Appeal>,
}

impl AppealRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("appeals"),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Appeal>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    pub async fn find_all(&self) -> Result<Vec<Appeal>> {
        let cursor = self.collection
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn find_by_student(&self, student_id: &str) -> Result<Vec<Appeal>> {
        let cursor = self.collection
            .find(doc! { "studentId": student_id })
            .sort(doc! { "createdAt": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn find_by_publicity(&self, publicity_id: &str) -> Result<Vec<Appeal>> {
        let cursor = self.collection
            .find(doc! { "publicityId": publicity_id })
            .sort(doc! { "createdAt": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
