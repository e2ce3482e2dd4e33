//! Reconciliation records migration.
//!
//! Creates the single table holding one row per (month, collective).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(RECONCILIATION_RECORDS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS reconciliation_records;")
            .await?;
        Ok(())
    }
}

const RECONCILIATION_RECORDS_SQL: &str = r"
CREATE TABLE reconciliation_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date DATE NOT NULL,
    collective TEXT NOT NULL,
    bank TEXT,
    account TEXT,
    withdrawals_bank_not_accounting REAL,
    deposits_accounting_not_bank REAL,
    deposits_bank_not_accounting REAL,
    accounting_balance REAL,
    reconciled_balance REAL,
    account_type TEXT,
    UNIQUE (date, collective)
);
";
