//! Reconciliation upload and chart data routes.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Multipart, Query, State, multipart::MultipartRejection},
    routing::{get, post},
};
use chrono::NaiveDate;
use conciliacion_core::reconciliation::{BalanceSeries, ReconciliationService};
use conciliacion_db::ReconciliationRepository;
use conciliacion_shared::AppError;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppState, error::ApiError};

const MISSING_FILE: &str = "No se encontró el archivo";
const MISSING_FILE_OR_DATE: &str = "Falta el archivo o la fecha";
const MISSING_COLLECTIVE: &str = "Se requiere una 'Colectiva'";

/// Creates the reconciliation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload))
        .route("/get_data", get(get_data))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Response for a stored upload.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Confirmation naming the month.
    pub message: String,
}

/// Query parameters for the chart data.
#[derive(Debug, Deserialize)]
pub struct ChartDataQuery {
    /// Collective identifier.
    pub colectiva: Option<String>,
}

/// Chart-ready balance history of one collective.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataResponse {
    /// Dates, ascending.
    pub labels: Vec<NaiveDate>,
    /// Accounting balance per date.
    pub saldo_contabilidad: Vec<Option<f64>>,
    /// Reconciled balance per date.
    pub saldo_conciliado: Vec<Option<f64>>,
}

impl From<BalanceSeries> for ChartDataResponse {
    fn from(series: BalanceSeries) -> Self {
        Self {
            labels: series.labels,
            saldo_contabilidad: series.accounting,
            saldo_conciliado: series.reconciled,
        }
    }
}

/// The parts of the upload form we care about.
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<UploadedFile>,
    month_date: Option<String>,
}

#[derive(Debug)]
struct UploadedFile {
    filename: String,
    contents: Bytes,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Drain the multipart stream, keeping the `file` and `month_date` fields.
async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let contents = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                form.file = Some(UploadedFile { filename, contents });
            }
            Some("month_date") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                form.month_date = Some(value);
            }
            _ => {}
        }
    }

    Ok(form)
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/upload` - Store a month of reconciliation figures from a spreadsheet.
///
/// The whole upload is written in one transaction: any bad row or store
/// failure leaves the store untouched.
async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let form = read_upload_form(multipart).await?;

    let Some(file) = form.file else {
        return Err(AppError::BadRequest(MISSING_FILE.to_string()).into());
    };
    let month_date = form.month_date.unwrap_or_default();
    if file.filename.is_empty() || month_date.is_empty() {
        return Err(AppError::BadRequest(MISSING_FILE_OR_DATE.to_string()).into());
    }

    let parsed = {
        let month_date = month_date.clone();
        tokio::task::spawn_blocking(move || {
            ReconciliationService::parse_upload(&month_date, &file.contents)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(AppError::from)?
    };

    let repo = ReconciliationRepository::new((*state.db).clone());
    let written = repo
        .upsert_month(parsed.month.first_day(), &parsed.rows)
        .await
        .map_err(|e| AppError::Processing(e.to_string()))?;

    info!(month = %parsed.month, rows = written, "Reconciliation upload stored");

    Ok(Json(UploadResponse {
        message: format!("Datos del {month_date} guardados correctamente."),
    }))
}

/// GET `/get_data?colectiva=...` - Balance history of a collective for charting.
async fn get_data(
    State(state): State<AppState>,
    Query(query): Query<ChartDataQuery>,
) -> Result<Json<ChartDataResponse>, ApiError> {
    let Some(collective) = query.colectiva.filter(|c| !c.is_empty()) else {
        return Err(AppError::BadRequest(MISSING_COLLECTIVE.to_string()).into());
    };

    let repo = ReconciliationRepository::new((*state.db).clone());
    let points = repo
        .balance_history(&collective)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    info!(collective = %collective, points = points.len(), "Chart data served");

    Ok(Json(ReconciliationService::balance_series(points).into()))
}
