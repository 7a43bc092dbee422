pub mod accounts;
pub mod interviews;
#[cfg(test)]
pub mod memory;
pub mod users;

pub use accounts::AccountStore;
pub use interviews::InterviewStore;
pub use users::UserStore;

use mongodb::bson::{doc, Document};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use std::time::Duration;

use crate::utils::AppError;

pub const USERS: &str = "users";
pub const ACCOUNTS: &str = "accounts";
pub const INTERVIEWS: &str = "interviews";
pub const FEEDBACK: &str = "feedback";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, AppError> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(Duration::from_secs(300));

        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        let db_name = database_name_from_uri(uri);
        let db = client.database(&db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes the stores rely on. `accounts.email` must be unique.
    async fn ensure_indexes(&self) -> Result<(), AppError> {
        log::info!("🔧 Creating database indexes...");

        let accounts = self.collection::<Document>(ACCOUNTS);
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        // A unique index that fails to build would leave duplicate emails possible.
        accounts.create_index(email_index).await?;
        log::info!("   ✅ Index created: accounts(email) unique");

        let interviews = self.collection::<Document>(INTERVIEWS);

        let by_user = IndexModel::builder()
            .keys(doc! { "userId": 1, "createdAt": -1 })
            .build();
        match interviews.create_index(by_user).await {
            Ok(_) => log::info!("   ✅ Index created: interviews(userId, createdAt)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        let latest = IndexModel::builder()
            .keys(doc! { "finalized": 1, "createdAt": -1 })
            .build();
        match interviews.create_index(latest).await {
            Ok(_) => log::info!("   ✅ Index created: interviews(finalized, createdAt)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        let feedback = self.collection::<Document>(FEEDBACK);
        let by_interview = IndexModel::builder()
            .keys(doc! { "interviewId": 1, "userId": 1 })
            .build();
        match feedback.create_index(by_interview).await {
            Ok(_) => log::info!("   ✅ Index created: feedback(interviewId, userId)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    /// Round-trips a `ping` to the server.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

/// Database name from the URI path, e.g. `mongodb://host:27017/prep?x=y` -> `prep`.
fn database_name_from_uri(uri: &str) -> String {
    let without_scheme = uri.split_once("://").map(|(_, rest)| rest).unwrap_or(uri);
    without_scheme
        .split_once('/')
        .map(|(_, path)| path.split('?').next().unwrap_or(""))
        .filter(|name| !name.is_empty())
        .unwrap_or("interview_prep")
        .to_string()
}
