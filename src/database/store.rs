use crate::utils::error::AppError;
use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use serde::{de::DeserializeOwned, Serialize};

/// A document persisted in one collection. The store owns `_id` and the timestamps.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    fn id(&self) -> Option<ObjectId>;

    fn created_at(&self) -> i64;

    /// Called once by `insert`
    fn stamp_created(&mut self, id: ObjectId, now: i64);

    /// Called by every `update_by_id`
    fn stamp_updated(&mut self, now: i64);
}

/// Collection-style CRUD over one record type.
///
/// `find` returns matches newest first (`createdAt` desc, `_id` desc on ties).
/// Updates replace the whole document; callers load, merge and write back.
#[async_trait]
pub trait DocumentStore<T: Record>: Send + Sync {
    async fn insert(&self, record: T) -> Result<T, AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<T>, AppError>;

    async fn find_one(&self, filter: &Filter) -> Result<Option<T>, AppError>;

    async fn find(&self, filter: &Filter) -> Result<Vec<T>, AppError>;

    async fn update_by_id(&self, id: ObjectId, record: T) -> Result<Option<T>, AppError>;

    async fn delete_by_id(&self, id: ObjectId) -> Result<Option<T>, AppError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Equals(String, String),
    /// Substring match ignoring case; the needle is literal text, not a pattern
    ContainsIgnoreCase(String, String),
    AnyOf(Vec<Clause>),
}

/// Conjunction of clauses. Field names are dotted paths (`location.city`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub clauses: Vec<Clause>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<String>) -> Self {
        self.clauses.push(Clause::Equals(field.to_string(), value.into()));
        self
    }

    pub fn contains_ignore_case(mut self, field: &str, value: impl Into<String>) -> Self {
        self.clauses
            .push(Clause::ContainsIgnoreCase(field.to_string(), value.into()));
        self
    }

    pub fn any_of(mut self, clauses: Vec<Clause>) -> Self {
        self.clauses.push(Clause::AnyOf(clauses));
        self
    }

    pub fn to_document(&self) -> Document {
        match self.clauses.as_slice() {
            [] => doc! {},
            [single] => clause_to_document(single),
            many => {
                let parts: Vec<Document> = many.iter().map(clause_to_document).collect();
                doc! { "$and": parts }
            }
        }
    }
}

fn clause_to_document(clause: &Clause) -> Document {
    match clause {
        Clause::Equals(field, value) => {
            let mut d = Document::new();
            d.insert(field.as_str(), Bson::String(value.clone()));
            d
        }
        Clause::ContainsIgnoreCase(field, value) => {
            let mut d = Document::new();
            d.insert(
                field.as_str(),
                doc! { "$regex": regex::escape(value), "$options": "i" },
            );
            d
        }
        Clause::AnyOf(clauses) => {
            let parts: Vec<Document> = clauses.iter().map(clause_to_document).collect();
            doc! { "$or": parts }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_matches_everything() {
        assert_eq!(Filter::new().to_document(), doc! {});
    }

    #[test]
    fn test_single_clause_is_not_wrapped() {
        let filter = Filter::new().eq("privyWallet", "0xabc");
        assert_eq!(filter.to_document(), doc! { "privyWallet": "0xabc" });
    }

    #[test]
    fn test_list_filter_translation() {
        let filter = Filter::new()
            .eq("status", "Verified")
            .contains_ignore_case("location.city", "cdmx");

        assert_eq!(
            filter.to_document(),
            doc! {
                "$and": [
                    { "status": "Verified" },
                    { "location.city": { "$regex": "cdmx", "$options": "i" } },
                ]
            }
        );
    }

    #[test]
    fn test_any_of_translation() {
        let filter = Filter::new().any_of(vec![
            Clause::Equals("accountIdentifier".into(), "alice.near".into()),
            Clause::Equals("privyWallet".into(), "alice.near".into()),
        ]);

        assert_eq!(
            filter.to_document(),
            doc! {
                "$or": [
                    { "accountIdentifier": "alice.near" },
                    { "privyWallet": "alice.near" },
                ]
            }
        );
    }

    #[test]
    fn test_substring_needle_is_escaped() {
        let filter = Filter::new().contains_ignore_case("specialty", "c++ (adult)");
        assert_eq!(
            filter.to_document(),
            doc! { "specialty": { "$regex": "c\\+\\+ \\(adult\\)", "$options": "i" } }
        );

        let filter = Filter::new().contains_ignore_case("location.city", "a.b");
        assert_eq!(
            filter.to_document(),
            doc! { "location.city": { "$regex": "a\\.b", "$options": "i" } }
        );
    }
}
