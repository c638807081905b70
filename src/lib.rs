//! Account service: CRUD REST API for accounts backed by PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod security;
pub mod service;
pub mod state;
pub mod store;

pub use config::{ServiceConfig, StoreBackend};
pub use error::{AppError, ConfigError};
pub use model::{Account, AccountPayload};
pub use response::{error_body, envelope_errors};
pub use routes::{account_routes, app, common_routes, ACCOUNTS_PATH};
pub use state::AppState;
pub use store::{
    ensure_accounts_table, ensure_database_exists, AccountStore, MemoryAccountStore, PgAccountStore,
};
