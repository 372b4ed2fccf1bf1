pub mod store;
pub mod mongo_store;
#[cfg(test)]
pub mod memory_store;

pub use store::*;
pub use mongo_store::MongoStore;

use crate::utils::error::AppError;
use mongodb::{bson::doc, options::IndexOptions, Client, Collection, Database, IndexModel};

pub const SPECIALISTS: &str = "specialists";
pub const CONSULTATIONS: &str = "consultations";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, AppError> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes backing the wallet lookups and the per-account listings
    async fn ensure_indexes(&self) -> Result<(), AppError> {
        log::info!("🔧 Creating database indexes...");

        let specialists = self.collection::<mongodb::bson::Document>(SPECIALISTS);
        let consultations = self.collection::<mongodb::bson::Document>(CONSULTATIONS);

        // Unique among non-empty wallets; profiles without a wallet are left out of the index
        let unique_wallet = IndexOptions::builder()
            .unique(true)
            .partial_filter_expression(doc! { "privyWallet": { "$gt": "" } })
            .build();

        let indexes = [
            (&specialists, doc! { "privyWallet": 1 }, Some(unique_wallet), "specialists(privyWallet) unique"),
            (&specialists, doc! { "accountIdentifier": 1 }, None, "specialists(accountIdentifier)"),
            (&specialists, doc! { "status": 1, "createdAt": -1 }, None, "specialists(status, createdAt)"),
            (
                &consultations,
                doc! { "specialistAccount": 1, "createdAt": -1 },
                None,
                "consultations(specialistAccount, createdAt)",
            ),
            (
                &consultations,
                doc! { "patientAccount": 1, "createdAt": -1 },
                None,
                "consultations(patientAccount, createdAt)",
            ),
        ];

        for (collection, keys, options, label) in indexes {
            let model = IndexModel::builder().keys(keys).options(options).build();
            match collection.create_index(model).await {
                Ok(_) => log::info!("   ✅ Index created: {}", label),
                Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
            }
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}
