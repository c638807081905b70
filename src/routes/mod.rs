//! Router assembly: routes plus the middleware stack.

mod account;
mod common;

pub use account::account_routes;
pub use common::common_routes;

use crate::handlers::common::not_found;
use crate::response::envelope_errors;
use crate::security::{cors_layer, enforce_https, security_header_layers};
use crate::state::AppState;
use axum::{middleware, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub const ACCOUNTS_PATH: &str = "/accounts";

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Full application. Layers, innermost first: panic catching, error envelope,
/// HTTPS enforcement (when enabled), CORS (when enabled), request tracing,
/// and finally the security headers so that every response carries them.
pub fn app(state: AppState) -> Router {
    let force_https = state.config.force_https;
    let cors_enabled = state.config.cors_enabled;

    let mut router = Router::new()
        .merge(common_routes())
        .merge(account_routes())
        .fallback(not_found)
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::new())
        .layer(middleware::map_response(envelope_errors));

    if force_https {
        router = router.layer(middleware::from_fn(enforce_https));
    }
    if cors_enabled {
        router = router.layer(cors_layer());
    }
    router = router.layer(TraceLayer::new_for_http());
    for layer in security_header_layers() {
        router = router.layer(layer);
    }
    router
}
