use super::store::{Clause, DocumentStore, Filter, Record};
use crate::utils::error::AppError;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use tokio::sync::RwLock;

/// In-process `DocumentStore` used by the handler tests
pub struct MemoryStore<T: Record> {
    records: RwLock<Vec<T>>,
}

impl<T: Record> MemoryStore<T> {
    pub fn new() -> Self {
        Self { records: RwLock::new(Vec::new()) }
    }
}

fn field<'a>(value: &'a Value, path: &str) -> Option<&'a str> {
    path.split('.')
        .try_fold(value, |current, key| current.get(key))
        .and_then(Value::as_str)
}

fn clause_matches(clause: &Clause, value: &Value) -> bool {
    match clause {
        Clause::Equals(path, expected) => field(value, path) == Some(expected.as_str()),
        Clause::ContainsIgnoreCase(path, needle) => field(value, path)
            .map(|actual| actual.to_lowercase().contains(&needle.to_lowercase()))
            .unwrap_or(false),
        Clause::AnyOf(clauses) => clauses.iter().any(|c| clause_matches(c, value)),
    }
}

fn matches<T: Record>(filter: &Filter, record: &T) -> bool {
    match serde_json::to_value(record) {
        Ok(value) => filter.clauses.iter().all(|c| clause_matches(c, &value)),
        Err(_) => false,
    }
}

fn sort_key<T: Record>(record: &T) -> (i64, [u8; 12]) {
    (record.created_at(), record.id().map(|id| id.bytes()).unwrap_or_default())
}

#[async_trait]
impl<T: Record> DocumentStore<T> for MemoryStore<T> {
    async fn insert(&self, mut record: T) -> Result<T, AppError> {
        record.stamp_created(ObjectId::new(), chrono::Utc::now().timestamp_millis());
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<T>, AppError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == Some(id)).cloned())
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<T>, AppError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| matches(filter, *r)).cloned())
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<T>, AppError> {
        let records = self.records.read().await;
        let mut found: Vec<T> = records.iter().filter(|r| matches(filter, *r)).cloned().collect();
        found.sort_by(|a, b| sort_key(b).cmp(&sort_key(a)));
        Ok(found)
    }

    async fn update_by_id(&self, id: ObjectId, mut record: T) -> Result<Option<T>, AppError> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.id() == Some(id)) {
            Some(slot) => {
                record.stamp_updated(chrono::Utc::now().timestamp_millis());
                *slot = record.clone();
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<Option<T>, AppError> {
        let mut records = self.records.write().await;
        let index = records.iter().position(|r| r.id() == Some(id));
        Ok(index.map(|index| records.remove(index)))
    }
}
