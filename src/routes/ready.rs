//! Readiness: the book table answers a count through the record store.

use crate::model::Book;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};

async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.store.count::<Book>().await {
        Ok(books) => (StatusCode::OK, Json(json!({ "ready": true, "books": books }))),
        Err(e) => {
            tracing::warn!(error = %e, "not ready");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "ready": false, "error": e.to_string() })),
            )
        }
    }
}

pub fn ready_routes(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}
