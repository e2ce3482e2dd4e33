//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations and the startup schema initializer

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::ReconciliationRepository;

use conciliacion_shared::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, EntityName};
use sea_orm_migration::{MigratorTrait, SchemaManager};
use tracing::{info, warn};

use crate::entities::reconciliation_records;
use crate::migration::Migrator;

/// Establishes a pooled connection to the configured store.
///
/// An in-memory store lives inside a single connection, so its pool is
/// pinned to exactly one.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url());
    if config.is_in_memory() {
        options.max_connections(1).min_connections(1);
    } else {
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections);
    }
    Database::connect(options).await
}

/// Opens the store, creating its schema if the store does not exist yet.
///
/// An existing store file is used as-is. Otherwise the file is created and
/// every migration is applied.
///
/// # Errors
///
/// Returns an error if connecting or creating the schema fails.
pub async fn init_store(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let provisioned = config.is_provisioned();
    let db = connect(config).await?;

    if provisioned {
        info!(path = %config.path, "Using existing database");
        if !has_schema(&db).await? {
            warn!(
                path = %config.path,
                table = reconciliation_records::Entity.table_name(),
                "Existing database has no reconciliation table; uploads and queries will fail"
            );
        }
    } else {
        info!(path = %config.path, "Creating database schema");
        Migrator::up(&db, None).await?;
        info!("Database schema created");
    }

    Ok(db)
}

/// Whether the reconciliation table exists in the connected store.
///
/// # Errors
///
/// Returns an error if the catalog cannot be queried.
pub async fn has_schema(db: &DatabaseConnection) -> Result<bool, DbErr> {
    SchemaManager::new(db)
        .has_table(reconciliation_records::Entity.table_name())
        .await
}
