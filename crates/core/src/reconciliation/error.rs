//! Ingestion error types.

use conciliacion_shared::AppError;
use thiserror::Error;

/// Errors raised while turning an upload into reconciliation rows.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Month is not in `YYYY-MM` form.
    #[error("invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    /// The spreadsheet could not be decoded.
    #[error("unable to read spreadsheet: {0}")]
    Workbook(String),

    /// The workbook has no worksheets.
    #[error("spreadsheet has no worksheets")]
    NoWorksheet,

    /// A required header is missing from the first row.
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    /// A data row has no collective identifier.
    #[error("row {row}: 'Colectiva' is empty")]
    MissingCollective {
        /// 1-based sheet row.
        row: usize,
    },

    /// A numeric column holds something that is not a number.
    #[error("row {row}: '{column}' is not a number: {value}")]
    InvalidNumber {
        /// 1-based sheet row.
        row: usize,
        /// Header of the offending column.
        column: &'static str,
        /// Cell content as read.
        value: String,
    },
}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        Self::Processing(err.to_string())
    }
}
