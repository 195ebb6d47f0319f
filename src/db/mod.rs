use std::time::Duration;

use mongodb::{bson::doc, options::ClientOptions, Client, Collection};

use crate::{config::Config, errors::AppResult};

/// Handle to the configured Mongo database. Collections are typed views
/// over the domain structs; repositories own one collection each.
#[derive(Clone)]
pub struct Database {
    database: mongodb::Database,
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut options = ClientOptions::parse(&config.mongo_conn_string).await?;
        options.app_name = Some("quizdeck".to_string());
        options.max_pool_size = Some(10);
        options.connect_timeout = Some(Duration::from_secs(5));
        options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(options)?;
        let database = client.database(&config.mongo_db_name);

        // Fail at startup rather than on the first request.
        database.run_command(doc! { "ping": 1 }).await?;
        log::info!("Connected to MongoDB database '{}'", config.mongo_db_name);

        Ok(Self { database })
    }

    pub fn get_collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.database.collection(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_is_shareable_across_workers() {
        fn assert_send_sync_clone<T: Send + Sync + Clone>() {}
        assert_send_sync_clone::<Database>();
    }
}
