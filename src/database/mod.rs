pub mod repository;
pub mod user_repository;

pub use repository::UserRepository;
pub use user_repository::MongoUserRepository;

use mongodb::{bson::doc, options::ClientOptions, Client, Database, IndexModel};
use std::time::Duration;

/// Used when neither `MONGODB_DATABASE` nor the URI names a database.
pub const DEFAULT_DATABASE: &str = "crud_api";
pub const USERS_COLLECTION: &str = "users";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    /// Opens the long-lived connection handle shared by every request.
    pub async fn new(uri: &str, database_name: Option<&str>) -> mongodb::error::Result<Self> {
        let mut client_options = ClientOptions::parse(uri).await?;

        client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(Duration::from_secs(300));
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let db_name = resolve_database_name(database_name, client_options.default_database.as_deref());
        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        // Test connection
        db.run_command(doc! { "ping": 1 }).await?;
        log::info!("✅ Connected to MongoDB database: {}", db_name);

        let mongodb = Self { db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// The name lookup on create filters on `name`; the index is not unique,
    /// so duplicate protection stays a best-effort lookup.
    async fn ensure_indexes(&self) -> mongodb::error::Result<()> {
        let users = self.db.collection::<mongodb::bson::Document>(USERS_COLLECTION);

        let name_index = IndexModel::builder().keys(doc! { "name": 1 }).build();

        match users.create_index(name_index).await {
            Ok(_) => log::info!("   ✅ Index ready: {}(name)", USERS_COLLECTION),
            Err(e) => log::warn!("   ⚠️  Could not create index {}(name): {}", USERS_COLLECTION, e),
        }

        Ok(())
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

fn resolve_database_name(configured: Option<&str>, from_uri: Option<&str>) -> String {
    configured
        .or(from_uri)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_DATABASE)
        .to_string()
}
