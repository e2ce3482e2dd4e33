//! Spreadsheet schema mapping.
//!
//! The header row is resolved once into a [`SheetLayout`]; every data row is
//! then mapped through it into a typed [`ReconciliationRow`]. Whether a
//! column is absent from the sheet or merely empty in a row is decided here
//! and nowhere else.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

use super::error::IngestError;
use super::types::ReconciliationRow;

/// Expected header names (exact, case- and accent-sensitive).
pub mod headers {
    /// Collective identifier. Required.
    pub const COLLECTIVE: &str = "Colectiva";
    /// Bank name.
    pub const BANK: &str = "Banco";
    /// Account identifier.
    pub const ACCOUNT: &str = "Cuenta";
    /// Withdrawals in the bank but not in the books.
    pub const WITHDRAWALS_BANK_NOT_ACCOUNTING: &str = "Retiros banco no conta";
    /// Deposits in the books but not in the bank.
    pub const DEPOSITS_ACCOUNTING_NOT_BANK: &str = "Depositos conta no Banco";
    /// Deposits in the bank but not in the books.
    pub const DEPOSITS_BANK_NOT_ACCOUNTING: &str = "Depositos banco no conta";
    /// Balance per accounting books.
    pub const ACCOUNTING_BALANCE: &str = "Saldo Contabilidad";
    /// Balance after reconciliation.
    pub const RECONCILED_BALANCE: &str = "Saldo Conciliado";
    /// Account classification.
    pub const ACCOUNT_TYPE: &str = "Tipo de Cuenta";
}

/// Value stored for a numeric column the sheet does not have at all.
const ABSENT_NUMERIC_DEFAULT: f64 = 0.0;

/// Column positions resolved from a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    collective: usize,
    bank: Option<usize>,
    account: Option<usize>,
    withdrawals_bank_not_accounting: Option<usize>,
    deposits_accounting_not_bank: Option<usize>,
    deposits_bank_not_accounting: Option<usize>,
    accounting_balance: Option<usize>,
    reconciled_balance: Option<usize>,
    account_type: Option<usize>,
}

impl SheetLayout {
    /// Resolve column positions from the header row.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::MissingColumn` if `Colectiva` is not present.
    pub fn from_header(header: &[Data]) -> Result<Self, IngestError> {
        let find = |name: &str| {
            header
                .iter()
                .position(|cell| matches!(cell, Data::String(s) if s == name))
        };

        Ok(Self {
            collective: find(headers::COLLECTIVE)
                .ok_or(IngestError::MissingColumn(headers::COLLECTIVE))?,
            bank: find(headers::BANK),
            account: find(headers::ACCOUNT),
            withdrawals_bank_not_accounting: find(headers::WITHDRAWALS_BANK_NOT_ACCOUNTING),
            deposits_accounting_not_bank: find(headers::DEPOSITS_ACCOUNTING_NOT_BANK),
            deposits_bank_not_accounting: find(headers::DEPOSITS_BANK_NOT_ACCOUNTING),
            accounting_balance: find(headers::ACCOUNTING_BALANCE),
            reconciled_balance: find(headers::RECONCILED_BALANCE),
            account_type: find(headers::ACCOUNT_TYPE),
        })
    }

    /// Map one data row.
    ///
    /// `row_num` is the 1-based sheet row used in error messages. Returns
    /// `Ok(None)` for a row with no content at all.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::MissingCollective` when `Colectiva` is empty and
    /// `IngestError::InvalidNumber` when a numeric cell cannot be read as a
    /// number.
    pub fn map_row(
        &self,
        row: &[Data],
        row_num: usize,
    ) -> Result<Option<ReconciliationRow>, IngestError> {
        if row.iter().all(is_blank) {
            return Ok(None);
        }

        let collective = cell_text(row.get(self.collective))
            .ok_or(IngestError::MissingCollective { row: row_num })?;

        let text = |index: Option<usize>| index.and_then(|i| cell_text(row.get(i)));
        let number = |index: Option<usize>, column: &'static str| match index {
            None => Ok(Some(ABSENT_NUMERIC_DEFAULT)),
            Some(i) => cell_number(row.get(i), row_num, column),
        };

        Ok(Some(ReconciliationRow {
            collective,
            bank: text(self.bank),
            account: text(self.account),
            withdrawals_bank_not_accounting: number(
                self.withdrawals_bank_not_accounting,
                headers::WITHDRAWALS_BANK_NOT_ACCOUNTING,
            )?,
            deposits_accounting_not_bank: number(
                self.deposits_accounting_not_bank,
                headers::DEPOSITS_ACCOUNTING_NOT_BANK,
            )?,
            deposits_bank_not_accounting: number(
                self.deposits_bank_not_accounting,
                headers::DEPOSITS_BANK_NOT_ACCOUNTING,
            )?,
            accounting_balance: number(self.accounting_balance, headers::ACCOUNTING_BALANCE)?,
            reconciled_balance: number(self.reconciled_balance, headers::RECONCILED_BALANCE)?,
            account_type: text(self.account_type),
        }))
    }
}

/// Decode a workbook and map every row of its first worksheet.
///
/// # Errors
///
/// Returns `IngestError::Workbook` if the bytes are not a spreadsheet
/// calamine understands, `IngestError::NoWorksheet` for a workbook without
/// sheets, and any layout or row error.
pub fn read_workbook(bytes: &[u8]) -> Result<Vec<ReconciliationRow>, IngestError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| IngestError::Workbook(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(IngestError::NoWorksheet)?
        .map_err(|e| IngestError::Workbook(e.to_string()))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    let layout = SheetLayout::from_header(header)?;

    // Row numbers are relative to the sheet, not the used range.
    let first_row = range.start().map_or(0, |(row, _)| row as usize);

    let mut records = Vec::new();
    for (offset, row) in rows.enumerate() {
        let row_num = first_row + offset + 2;
        if let Some(record) = layout.map_row(row, row_num)? {
            records.push(record);
        }
    }
    Ok(records)
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Text form of a cell, `None` when there is nothing in it.
fn cell_text(cell: Option<&Data>) -> Option<String> {
    match cell? {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        // Display drops the fractional part of integral floats: 100.0 -> "100".
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Numeric form of a cell in a column the sheet has.
fn cell_number(
    cell: Option<&Data>,
    row: usize,
    column: &'static str,
) -> Result<Option<f64>, IngestError> {
    let invalid = |value: String| IngestError::InvalidNumber { row, column, value };

    match cell {
        None | Some(Data::Empty | Data::Error(_)) => Ok(None),
        Some(Data::Float(f)) => Ok(Some(*f)),
        #[allow(clippy::cast_precision_loss)]
        Some(Data::Int(i)) => Ok(Some(*i as f64)),
        Some(Data::Bool(b)) => Ok(Some(if *b { 1.0 } else { 0.0 })),
        Some(Data::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            // `f64::from_str` also accepts "inf" and "NaN"; neither is a balance.
            match trimmed.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(Some(v)),
                _ => Err(invalid(s.clone())),
            }
        }
        Some(other) => Err(invalid(other.to_string())),
    }
}
