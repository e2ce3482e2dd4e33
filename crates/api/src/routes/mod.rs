//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod health;
pub mod index;
pub mod reconciliation;

/// Creates the router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(index::routes())
        .merge(health::routes())
        .merge(reconciliation::routes())
}
