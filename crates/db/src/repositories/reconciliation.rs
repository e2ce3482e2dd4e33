//! Reconciliation repository for database operations.

use chrono::NaiveDate;
use conciliacion_core::reconciliation::{BalancePoint, ReconciliationRow};
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait, sea_query::OnConflict,
};

use crate::entities::reconciliation_records::{self, Column};

/// Reconciliation repository for upserts and balance history.
///
/// The HTTP handlers only use [`Self::upsert_month`] and
/// [`Self::balance_history`]. [`Self::find_by_key`] and
/// [`Self::count_for_collective`] are point lookups for verifying what an
/// upload stored.
#[derive(Debug, Clone)]
pub struct ReconciliationRepository {
    db: DatabaseConnection,
}

impl ReconciliationRepository {
    /// Creates a new reconciliation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Writes every row of one upload under `date`.
    ///
    /// All rows go through a single transaction. A row whose
    /// (date, collective) already exists has all of its other columns
    /// replaced. The first failing row aborts the upload and the transaction
    /// is rolled back when dropped, so either every row lands or none does.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement or the commit fails.
    pub async fn upsert_month(
        &self,
        date: NaiveDate,
        rows: &[ReconciliationRow],
    ) -> Result<u64, DbErr> {
        let txn = self.db.begin().await?;
        let on_conflict = OnConflict::columns([Column::Date, Column::Collective])
            .update_columns([
                Column::Bank,
                Column::Account,
                Column::WithdrawalsBankNotAccounting,
                Column::DepositsAccountingNotBank,
                Column::DepositsBankNotAccounting,
                Column::AccountingBalance,
                Column::ReconciledBalance,
                Column::AccountType,
            ])
            .to_owned();

        let mut written = 0;
        for row in rows {
            reconciliation_records::Entity::insert(to_active_model(date, row))
                .on_conflict(on_conflict.clone())
                .exec_without_returning(&txn)
                .await?;
            written += 1;
        }

        txn.commit().await?;
        Ok(written)
    }

    /// Balance history of a collective, oldest month first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn balance_history(&self, collective: &str) -> Result<Vec<BalancePoint>, DbErr> {
        let points = reconciliation_records::Entity::find()
            .select_only()
            .columns([Column::Date, Column::AccountingBalance, Column::ReconciledBalance])
            .filter(Column::Collective.eq(collective))
            .order_by_asc(Column::Date)
            .into_tuple::<(NaiveDate, Option<f64>, Option<f64>)>()
            .all(&self.db)
            .await?;

        Ok(points
            .into_iter()
            .map(|(date, accounting_balance, reconciled_balance)| BalancePoint {
                date,
                accounting_balance,
                reconciled_balance,
            })
            .collect())
    }

    /// Finds the record for a (date, collective) key. Verification only.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_key(
        &self,
        date: NaiveDate,
        collective: &str,
    ) -> Result<Option<reconciliation_records::Model>, DbErr> {
        reconciliation_records::Entity::find()
            .filter(Column::Date.eq(date))
            .filter(Column::Collective.eq(collective))
            .one(&self.db)
            .await
    }

    /// Counts the records stored for a collective. Verification only.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_for_collective(&self, collective: &str) -> Result<u64, DbErr> {
        reconciliation_records::Entity::find()
            .filter(Column::Collective.eq(collective))
            .count(&self.db)
            .await
    }
}

fn to_active_model(date: NaiveDate, row: &ReconciliationRow) -> reconciliation_records::ActiveModel {
    reconciliation_records::ActiveModel {
        id: NotSet,
        date: Set(date),
        collective: Set(row.collective.clone()),
        bank: Set(row.bank.clone()),
        account: Set(row.account.clone()),
        withdrawals_bank_not_accounting: Set(row.withdrawals_bank_not_accounting),
        deposits_accounting_not_bank: Set(row.deposits_accounting_not_bank),
        deposits_bank_not_accounting: Set(row.deposits_bank_not_accounting),
        accounting_balance: Set(row.accounting_balance),
        reconciled_balance: Set(row.reconciled_balance),
        account_type: Set(row.account_type.clone()),
    }
}
