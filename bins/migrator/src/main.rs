//! Database migration runner for the reconciliation store.
//!
//! The server creates the schema on its first start; this tool is for
//! inspecting or rebuilding a store by hand. It reads `DATABASE_URL`, e.g.
//! `sqlite://conciliacion.db?mode=rwc`.
//!
//! Usage:
//!   migrator up      - Run all pending migrations
//!   migrator down    - Rollback last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations

use conciliacion_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Run the migrator CLI (it sets up its own tracing)
    cli::run_cli(Migrator).await;
}
