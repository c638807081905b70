//! JSON body extractor that enforces the `application/json` media type.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap, StatusCode},
};
use serde_json::Value;

pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Parsed JSON request body. Rejects with 415 when the content type is not
/// `application/json`, with 413 when the body is over the size limit and with
/// 400 when the body is not valid JSON.
#[derive(Clone, Debug)]
pub struct JsonBody(pub Value);

fn check_content_type(headers: &HeaderMap) -> Result<(), AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let essence = content_type.split(';').next().unwrap_or("").trim();
    if essence.eq_ignore_ascii_case(JSON_MEDIA_TYPE) {
        return Ok(());
    }
    let shown = if content_type.is_empty() { "none" } else { content_type };
    Err(AppError::UnsupportedMediaType(format!(
        "Content-Type must be {}, got {}",
        JSON_MEDIA_TYPE, shown
    )))
}

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        check_content_type(req.headers())?;
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| match e.status() {
                StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(e.body_text()),
                _ => AppError::Validation(e.body_text()),
            })?;
        let value = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::Validation(format!("body is not valid JSON: {}", e)))?;
        Ok(JsonBody(value))
    }
}
