use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use tracing::{error, info};

use crate::{domain::food_entry::errors::StoreError, entity::food_entries};

#[derive(Debug, Clone)]
pub struct SqliteConfig {
    pub database_url: String,
}

/// Single-connection SQLite pool with the journal schema in place.
#[derive(Debug, Clone)]
pub struct Sqlite {
    db: DatabaseConnection,
}

impl Sqlite {
    pub async fn new(config: SqliteConfig) -> Result<Self, StoreError> {
        let mut options = ConnectOptions::new(config.database_url.clone());
        options.max_connections(1).min_connections(1).sqlx_logging(false);

        let db = Database::connect(options).await.map_err(|e| {
            error!("Failed to connect to {}: {}", config.database_url, e);
            StoreError::Connection(e.to_string())
        })?;

        create_schema(&db).await.map_err(|e| {
            error!("Failed to create food_entries schema: {}", e);
            StoreError::Connection(e.to_string())
        })?;

        info!(url = %config.database_url, "sqlite store ready");
        Ok(Self { db })
    }

    pub fn get_db(&self) -> DatabaseConnection {
        self.db.clone()
    }
}

async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut table = schema.create_table_from_entity(food_entries::Entity);
    table.if_not_exists();
    db.execute(backend.build(&table)).await?;

    for mut index in schema.create_index_from_entity(food_entries::Entity) {
        index.if_not_exists();
        db.execute(backend.build(&index)).await?;
    }

    Ok(())
}
