//! Monthly reconciliation uploads and balance history.

pub mod error;
pub mod month;
pub mod service;
pub mod sheet;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::IngestError;
pub use month::ReportMonth;
pub use service::ReconciliationService;
pub use sheet::{SheetLayout, read_workbook};
pub use types::{BalancePoint, BalanceSeries, MonthlyUpload, ReconciliationRow};
