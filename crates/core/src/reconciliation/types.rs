//! Reconciliation domain types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::month::ReportMonth;

/// One collective's figures for a month, as read from the spreadsheet.
///
/// Numeric fields are `Some(0.0)` when their column is absent from the
/// sheet and `None` when the column exists but the cell is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationRow {
    /// Collective account identifier (`Colectiva`).
    pub collective: String,
    /// Bank name (`Banco`).
    pub bank: Option<String>,
    /// Account identifier (`Cuenta`).
    pub account: Option<String>,
    /// `Retiros banco no conta`.
    pub withdrawals_bank_not_accounting: Option<f64>,
    /// `Depositos conta no Banco`.
    pub deposits_accounting_not_bank: Option<f64>,
    /// `Depositos banco no conta`.
    pub deposits_bank_not_accounting: Option<f64>,
    /// `Saldo Contabilidad`.
    pub accounting_balance: Option<f64>,
    /// `Saldo Conciliado`.
    pub reconciled_balance: Option<f64>,
    /// Account classification (`Tipo de Cuenta`).
    pub account_type: Option<String>,
}

/// A parsed upload ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyUpload {
    /// Month every row is filed under.
    pub month: ReportMonth,
    /// Rows in sheet order.
    pub rows: Vec<ReconciliationRow>,
}

/// Stored balances of a collective for one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalancePoint {
    /// First day of the month.
    pub date: NaiveDate,
    /// Balance per accounting books.
    pub accounting_balance: Option<f64>,
    /// Balance after reconciliation.
    pub reconciled_balance: Option<f64>,
}

/// Chart-ready balance history: three parallel sequences of equal length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSeries {
    /// Dates, ascending.
    pub labels: Vec<NaiveDate>,
    /// Accounting balance per date.
    pub accounting: Vec<Option<f64>>,
    /// Reconciled balance per date.
    pub reconciled: Vec<Option<f64>>,
}

impl BalanceSeries {
    /// Number of points in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl FromIterator<BalancePoint> for BalanceSeries {
    fn from_iter<I: IntoIterator<Item = BalancePoint>>(iter: I) -> Self {
        let mut series = Self::default();
        for point in iter {
            series.labels.push(point.date);
            series.accounting.push(point.accounting_balance);
            series.reconciled.push(point.reconciled_balance);
        }
        series
    }
}
