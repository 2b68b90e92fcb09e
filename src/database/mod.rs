use mongodb::{options::ClientOptions, Client, Collection, Database};
use std::error::Error;

/// Shared MongoDB connection, created once at startup and cloned into workers.
#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let client_options = ClientOptions::parse(uri).await?;
        let db_name = database_name(&client_options);
        let client = Client::with_options(client_options)?;

        let db = client.database(&db_name);

        // Test connection
        db.list_collection_names().await?;

        log::info!("📊 Using database '{}'", db_name);

        Ok(Self { client, db })
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    /// Closes the client once the HTTP server has stopped.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
        log::info!("🔌 MongoDB connection closed");
    }
}

/// Database named in the URI path, or `test` like the MongoDB drivers.
fn database_name(options: &ClientOptions) -> String {
    options
        .default_database
        .clone()
        .unwrap_or_else(|| "test".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_name_from_uri() {
        let options = ClientOptions::parse("mongodb://localhost:27017/proj5").await.unwrap();
        assert_eq!(database_name(&options), "proj5");

        let options = ClientOptions::parse("mongodb://localhost:27017").await.unwrap();
        assert_eq!(database_name(&options), "test");
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_connection() {
        let db = MongoDB::new(crate::config::DATABASE_URL).await;
        assert!(db.is_ok());
    }
}
