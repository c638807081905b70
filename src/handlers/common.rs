//! Service-level handlers: index, health, readiness, and the unmatched-route fallback.

use crate::error::AppError;
use crate::routes::ACCOUNTS_PATH;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{StatusCode, Uri},
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
pub struct ReadyBody {
    status: &'static str,
    store: &'static str,
}

#[derive(Serialize)]
pub struct IndexBody {
    name: &'static str,
    version: &'static str,
    paths: &'static str,
}

pub async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "OK" })
}

/// Readiness: like health, but also checks that the store answers.
pub async fn ready(
    State(state): State<AppState>,
) -> Result<Json<ReadyBody>, (StatusCode, Json<ReadyBody>)> {
    if let Err(e) = state.store.ping().await {
        tracing::error!(error = %e, "store unavailable");
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody { status: "DEGRADED", store: "unavailable" }),
        ));
    }
    Ok(Json(ReadyBody { status: "OK", store: "ok" }))
}

pub async fn index() -> Json<IndexBody> {
    Json(IndexBody {
        name: "Account REST API Service",
        version: env!("CARGO_PKG_VERSION"),
        paths: ACCOUNTS_PATH,
    })
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
