//! Readiness endpoint

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct ReadyResponse {
    ready: bool,
    database: &'static str,
}

async fn ready(state: AppState) -> impl IntoResponse {
    match database::postgres::check_health(&state.db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadyResponse {
                ready: true,
                database: "connected",
            }),
        ),
        Err(e) => {
            tracing::error!("Readiness check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyResponse {
                    ready: false,
                    database: "disconnected",
                }),
            )
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(move || ready(state)))
}
