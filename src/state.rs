use crate::database::{DocumentStore, MongoDB, MongoStore, CONSULTATIONS, SPECIALISTS};
use crate::models::{Consultation, Specialist};
use std::sync::Arc;

/// Stores shared by every worker; handlers keep no other state
#[derive(Clone)]
pub struct AppState {
    pub specialists: Arc<dyn DocumentStore<Specialist>>,
    pub consultations: Arc<dyn DocumentStore<Consultation>>,
}

impl AppState {
    pub fn new(
        specialists: Arc<dyn DocumentStore<Specialist>>,
        consultations: Arc<dyn DocumentStore<Consultation>>,
    ) -> Self {
        Self { specialists, consultations }
    }

    pub fn from_mongo(db: &MongoDB) -> Self {
        Self::new(
            Arc::new(MongoStore::new(db.collection::<Specialist>(SPECIALISTS))),
            Arc::new(MongoStore::new(db.collection::<Consultation>(CONSULTATIONS))),
        )
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        use crate::database::memory_store::MemoryStore;

        Self::new(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()))
    }
}
