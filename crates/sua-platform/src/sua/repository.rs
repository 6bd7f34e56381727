//! Sua Repository

use mongodb::{Collection, Database, bson::doc};
use futures::TryStreamExt;
use crate::shared::error::Result;
use crate::sua::entity::Sua;

pub struct SuaRepository {
    collection: Collection<Sua>,
}

impl SuaRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("suas"),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Sua>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    pub async fn find_all(&self) -> Result<Vec<Sua>> {
        let cursor = self.collection
            .find(doc! {})
            .sort(doc! { "createdAt": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    /// Existing Suas of an activity in creation order. Update cascades
    /// pair their payload entries against this list by id.
    pub async fn find_by_activity(&self, activity_id: &str) -> Result<Vec<Sua>> {
        let cursor = self.collection
            .find(doc! { "activityId": activity_id })
            .sort(doc! { "createdAt": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn find_by_student(&self, student_id: &str) -> Result<Vec<Sua>> {
        let cursor = self.collection
            .find(doc! { "studentId": student_id })
            .sort(doc! { "createdAt": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
