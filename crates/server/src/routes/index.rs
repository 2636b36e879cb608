//! Root page handler

use axum::response::Html;

/// GET / - Serve the embedded front-end page
pub async fn page() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
