//! Axum router wiring.
//!
//! Exposes `/metrics` in the Prometheus text format.

use axum::{extract::State, http::header, response::IntoResponse, routing::get, Router};

use crate::app_state::AppState;

const TEXT_FORMAT: &str = "text/plain; version=0.0.4; charset=utf-8";

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .with_state(state)
}

async fn metrics(State(app): State<AppState>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, TEXT_FORMAT)], app.metrics().render())
}
