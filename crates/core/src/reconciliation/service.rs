//! Reconciliation service tying month parsing, sheet mapping and charting
//! together.

use super::error::IngestError;
use super::month::ReportMonth;
use super::sheet::read_workbook;
use super::types::{BalancePoint, BalanceSeries, MonthlyUpload};

/// Reconciliation service for business logic.
pub struct ReconciliationService;

impl ReconciliationService {
    /// Parse an upload: the month first, then every row of the workbook.
    ///
    /// The whole sheet is validated here, so a failure means nothing should
    /// be written.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::InvalidMonth` for a malformed month and any
    /// workbook or row error from [`read_workbook`].
    pub fn parse_upload(month: &str, workbook: &[u8]) -> Result<MonthlyUpload, IngestError> {
        let month = ReportMonth::parse(month)?;
        let rows = read_workbook(workbook)?;
        Ok(MonthlyUpload { month, rows })
    }

    /// Split stored points into the chart's parallel sequences, keeping
    /// their order.
    #[must_use]
    pub fn balance_series(points: impl IntoIterator<Item = BalancePoint>) -> BalanceSeries {
        points.into_iter().collect()
    }
}
