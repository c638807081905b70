//! Common routes: index, health, readiness.

use crate::handlers::common::{health, index, ready};
use crate::state::AppState;
use axum::{routing::get, Router};

/// GET /, GET /health, GET /ready. Only readiness touches the store.
pub fn common_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/ready", get(ready))
}
