use super::store::{DocumentStore, Filter, Record};
use crate::utils::error::AppError;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::ReturnDocument,
    Collection,
};

/// `DocumentStore` backed by one MongoDB collection
pub struct MongoStore<T: Record> {
    collection: Collection<T>,
}

impl<T: Record> MongoStore<T> {
    pub fn new(collection: Collection<T>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl<T: Record> DocumentStore<T> for MongoStore<T> {
    async fn insert(&self, mut record: T) -> Result<T, AppError> {
        record.stamp_created(ObjectId::new(), chrono::Utc::now().timestamp_millis());
        self.collection.insert_one(&record).await?;
        Ok(record)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<T>, AppError> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<T>, AppError> {
        Ok(self.collection.find_one(filter.to_document()).await?)
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<T>, AppError> {
        let cursor = self
            .collection
            .find(filter.to_document())
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn update_by_id(&self, id: ObjectId, mut record: T) -> Result<Option<T>, AppError> {
        record.stamp_updated(chrono::Utc::now().timestamp_millis());

        Ok(self
            .collection
            .find_one_and_replace(doc! { "_id": id }, &record)
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<Option<T>, AppError> {
        Ok(self.collection.find_one_and_delete(doc! { "_id": id }).await?)
    }
}
