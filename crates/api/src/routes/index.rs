//! Index page with the upload form and the balance chart.

use axum::{Router, response::Html, routing::get};

use crate::AppState;

const INDEX_HTML: &str = include_str!("../../templates/index.html");

/// GET `/` - Serve the index page.
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Creates the index route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}
