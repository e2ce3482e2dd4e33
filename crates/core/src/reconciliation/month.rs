//! Reporting month parsing.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::IngestError;

/// The month an upload reports on, pinned to its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReportMonth(NaiveDate);

impl ReportMonth {
    /// Parses a `YYYY-MM` string.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::InvalidMonth` if `YYYY-MM-01` is not a date.
    pub fn parse(input: &str) -> Result<Self, IngestError> {
        NaiveDate::parse_from_str(&format!("{input}-01"), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| IngestError::InvalidMonth(input.to_string()))
    }

    /// First calendar day of the month.
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for ReportMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}
