//! Application-wide error types.
//!
//! Display text is what clients see in the `error` field of a JSON
//! response, so it is written for the Spanish-speaking UI.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Caller-supplied input is missing or empty.
    #[error("{0}")]
    BadRequest(String),

    /// Month parsing, spreadsheet decoding or the ingestion write failed.
    #[error("Error al procesar el archivo: {0}")]
    Processing(String),

    /// Database error outside of an ingestion.
    #[error("Error de base de datos: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Error interno: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::Processing(_) | Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code used in logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Processing(_) => "PROCESSING_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the failure is the caller's to fix.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::BadRequest(_))
    }
}
