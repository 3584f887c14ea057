use std::time::Duration;

use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection};

use crate::config::DatabaseConfig;

/// Shared sea-orm connection pool.
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let mut options = ConnectOptions::new(config.url().to_owned());
        options
            .connect_timeout(Duration::from_secs(*config.connect_timeout_secs()))
            .acquire_timeout(Duration::from_secs(*config.connect_timeout_secs()))
            .sqlx_logging(false);
        let connection = SeaDatabase::connect(options).await?;
        Ok(Self { connection })
    }

    pub fn get_connection(&self) -> &DatabaseConnection {
        &self.connection
    }
}
