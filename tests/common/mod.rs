#![allow(dead_code)]

use account_service::{
    app, security::CONTENT_SECURITY_POLICY, Account, AccountPayload, AccountStore, AppError,
    AppState, MemoryAccountStore, ServiceConfig,
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

pub const BASE_URL: &str = "/accounts";

pub fn test_config() -> ServiceConfig {
    ServiceConfig {
        force_https: false,
        ..ServiceConfig::default()
    }
}

pub fn test_app() -> Router {
    app_with(test_config())
}

pub fn app_with(config: ServiceConfig) -> Router {
    app(AppState::new(Arc::new(MemoryAccountStore::new()), config))
}

/// Store whose backend is always down. `list` panics instead of failing so the
/// panic path is exercised too.
pub struct BrokenStore;

fn unavailable() -> AppError {
    AppError::Db(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl AccountStore for BrokenStore {
    async fn create(&self, _payload: AccountPayload) -> Result<Account, AppError> {
        Err(unavailable())
    }

    async fn list(&self) -> Result<Vec<Account>, AppError> {
        panic!("password=hunter2 leaked from the driver");
    }

    async fn find(&self, _id: i32) -> Result<Option<Account>, AppError> {
        Err(unavailable())
    }

    async fn update(&self, _id: i32, _payload: AccountPayload) -> Result<Option<Account>, AppError> {
        Err(unavailable())
    }

    async fn delete(&self, _id: i32) -> Result<bool, AppError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(unavailable())
    }
}

pub fn broken_app() -> Router {
    app(AppState::new(Arc::new(BrokenStore), test_config()))
}

pub fn assert_security_headers(response: &Response<Body>) {
    let headers = response.headers();
    assert_eq!(headers.get("x-frame-options").unwrap(), "SAMEORIGIN");
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(
        headers.get("content-security-policy").unwrap(),
        CONTENT_SECURITY_POLICY
    );
    assert_eq!(
        headers.get("referrer-policy").unwrap(),
        "strict-origin-when-cross-origin"
    );
}

pub fn account_body(n: usize) -> Value {
    json!({
        "name": format!("Account {}", n),
        "email": format!("account{}@example.com", n),
        "address": format!("{} Main St", n),
        "phone_number": format!("555-01{:02}", n % 100),
    })
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn create_account(app: &Router, body: &Value) -> Value {
    let response = send(app, json_request("POST", BASE_URL, body)).await;
    assert_eq!(response.status(), 201, "could not create test account");
    body_json(response).await
}
