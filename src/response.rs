//! Error envelope shared by handler errors and framework-level failures.

use crate::error::AppError;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Largest framework error body read back into the envelope message.
const MAX_ERROR_BODY: usize = 64 * 1024;

#[derive(Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
    pub message: String,
}

/// Label used in the `error` field for a status code.
pub fn error_label(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "Bad Request",
        StatusCode::NOT_FOUND => "Not Found",
        StatusCode::METHOD_NOT_ALLOWED => "Method not Allowed",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "Unsupported media type",
        StatusCode::INTERNAL_SERVER_ERROR => "Internal Server Error",
        other => other.canonical_reason().unwrap_or("Error"),
    }
}

pub fn error_body(status: StatusCode, message: String) -> ErrorBody {
    ErrorBody {
        status: status.as_u16(),
        error: error_label(status).to_string(),
        message,
    }
}

pub fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(error_body(status, message))).into_response()
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v: &HeaderValue| v.to_str().ok())
        .map(|ct| ct.starts_with("application/json"))
        .unwrap_or(false)
}

/// Rewrites error responses produced outside the handlers (unmatched method,
/// rejected body, caught panic) into the JSON envelope. Responses that are
/// already JSON pass through untouched.
pub async fn envelope_errors(response: Response) -> Response {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) || is_json(&response) {
        return response;
    }
    let (parts, body) = response.into_parts();
    let text = match axum::body::to_bytes(body, MAX_ERROR_BODY).await {
        Ok(bytes) => String::from_utf8_lossy(&bytes).trim().to_string(),
        Err(_) => String::new(),
    };
    let message = if text.is_empty() { error_label(status).to_string() } else { text };

    let mut rewritten = match AppError::from_status(status, message.clone()) {
        Some(err) => err.into_response(),
        None => {
            tracing::warn!(status = status.as_u16(), "{}", message);
            error_response(status, message)
        }
    };
    // Keep framework headers such as `Allow` on a 405.
    for (name, value) in parts.headers.iter() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            rewritten.headers_mut().insert(name.clone(), value.clone());
        }
    }
    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn wraps_empty_method_not_allowed() {
        let response = StatusCode::METHOD_NOT_ALLOWED.into_response();
        let response = envelope_errors(response).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = body_json(response).await;
        assert_eq!(body["status"], 405);
        assert_eq!(body["error"], "Method not Allowed");
        assert_eq!(body["message"], "Method not Allowed");
    }

    #[tokio::test]
    async fn keeps_allow_header_on_method_not_allowed() {
        let response = (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, HeaderValue::from_static("GET,HEAD"))],
        )
            .into_response();
        let response = envelope_errors(response).await;
        assert_eq!(response.headers().get(header::ALLOW).unwrap(), "GET,HEAD");
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn payload_too_large_keeps_its_status() {
        let response = (StatusCode::PAYLOAD_TOO_LARGE, "length limit exceeded").into_response();
        let response = envelope_errors(response).await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = body_json(response).await;
        assert_eq!(body["status"], 413);
        assert_eq!(body["error"], "Payload Too Large");
    }

    #[tokio::test]
    async fn plain_text_message_is_kept_for_client_errors() {
        let response = (StatusCode::BAD_REQUEST, "body is not valid JSON").into_response();
        let body = body_json(envelope_errors(response).await).await;
        assert_eq!(body["error"], "Bad Request");
        assert_eq!(body["message"], "body is not valid JSON");
    }

    #[tokio::test]
    async fn server_error_detail_is_replaced() {
        let response = (StatusCode::INTERNAL_SERVER_ERROR, "Service panicked").into_response();
        let body = body_json(envelope_errors(response).await).await;
        assert_eq!(body["message"], "Internal Server Error");
    }

    #[tokio::test]
    async fn success_and_json_errors_pass_through() {
        let ok = envelope_errors(StatusCode::NO_CONTENT.into_response()).await;
        assert_eq!(ok.status(), StatusCode::NO_CONTENT);

        let json = error_response(StatusCode::NOT_FOUND, "gone".into());
        let body = body_json(envelope_errors(json).await).await;
        assert_eq!(body["message"], "gone");
    }
}
