pub mod entities;
pub mod repositories;
pub mod schema;
pub mod seeds;

pub use repositories::AccountRepository;
pub use schema::create_schema;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./auth_control.db?mode=rwc")
    pub url: String,
    /// Pool size cap. `None` keeps the driver default.
    pub max_connections: Option<u32>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./auth_control.db?mode=rwc".to_string(),
            max_connections: None,
        }
    }
}

impl DatabaseConfig {
    /// Private in-memory SQLite database. Pinned to one connection so every
    /// query sees the same database.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: Some(1),
        }
    }
}

/// Initialize the connection pool
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);

    let mut options = ConnectOptions::new(config.url.clone());
    options
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    if let Some(max) = config.max_connections {
        options.max_connections(max).min_connections(1);
    }

    let db = Database::connect(options).await?;
    info!("Database connected successfully");
    Ok(db)
}
