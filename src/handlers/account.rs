//! Account CRUD handlers: create, list, read, update, delete.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::model::{Account, AccountPayload};
use crate::routes::ACCOUNTS_PATH;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

fn not_found(id: impl std::fmt::Display) -> AppError {
    AppError::NotFound(format!("Account with id [{}] could not be found.", id))
}

/// Ids are SERIAL; a segment that is not an integer cannot name an account.
fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str.trim().parse().map_err(|_| not_found(id_str))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("Request to create an Account");
    let payload = AccountPayload::from_json(body)?;
    let account = state.store.create(payload).await?;
    let location = format!("{}/{}", ACCOUNTS_PATH, account.id);
    tracing::info!(id = account.id, "Account created");
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(account)))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Account>>, AppError> {
    tracing::info!("Request to list Accounts");
    let accounts = state.store.list().await?;
    tracing::info!(count = accounts.len(), "Returning accounts");
    Ok(Json(accounts))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Account>, AppError> {
    tracing::info!(id = %id_str, "Request to read an Account");
    let id = parse_id(&id_str)?;
    let account = state.store.find(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(account))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<JsonBody, AppError>,
) -> Result<Json<Account>, AppError> {
    tracing::info!(id = %id_str, "Request to update an Account");
    let id = parse_id(&id_str)?;
    // Existence is checked before the body is looked at.
    if state.store.find(id).await?.is_none() {
        return Err(not_found(id));
    }
    let JsonBody(body) = body?;
    let payload = AccountPayload::from_json(body)?;
    let account = state.store.update(id, payload).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(account))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, AppError> {
    tracing::info!(id = %id_str, "Request to delete an Account");
    // A segment that is not an id names nothing, so there is nothing to delete.
    if let Ok(id) = id_str.trim().parse::<i32>() {
        let removed = state.store.delete(id).await?;
        tracing::debug!(id, removed, "delete finished");
    }
    Ok(StatusCode::NO_CONTENT)
}
