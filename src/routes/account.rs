//! Account CRUD routes.

use super::ACCOUNTS_PATH;
use crate::handlers::account::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route(ACCOUNTS_PATH, get(list).post(create))
        .route(
            &format!("{}/:id", ACCOUNTS_PATH),
            get(read).put(update).delete(delete_handler),
        )
}
