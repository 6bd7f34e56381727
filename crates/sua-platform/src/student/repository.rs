//! Student Repository

use mongodb::{Collection, Database, bson::doc};
use futures::TryStreamExt;
use crate::shared::error::Result;
use crate::student::entity::Student;

pub struct StudentRepository {
    collection: Collection<Student>,
}

impl StudentRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("students"),
        }
    }

    pub async fn insert(&self, student: &Student) -> Result<()> {
        self.collection.insert_one(student).await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Student>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    pub async fn find_by_number(&self, number: &str) -> Result<Option<Student>> {
        Ok(self.collection.find_one(doc! { "number": number }).await?)
    }

    pub async fn find_by_principal(&self, principal_id: &str) -> Result<Option<Student>> {
        Ok(self.collection.find_one(doc! { "principalId": principal_id }).await?)
    }

    pub async fn find_all(&self) -> Result<Vec<Student>> {
        let cursor = self.collection
            .find(doc! {})
            .sort(doc! { "number": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn update(&self, student: &Student) -> Result<()> {
        self.collection
            .replace_one(doc! { "_id": &student.id }, student)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
