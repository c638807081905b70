//! Account persistence: the `AccountStore` seam and its PostgreSQL and in-memory backends.

mod memory;
mod postgres;

pub use memory::MemoryAccountStore;
pub use postgres::{ensure_accounts_table, ensure_database_exists, PgAccountStore};

use crate::error::AppError;
use crate::model::{Account, AccountPayload};
use async_trait::async_trait;

/// Storage operations for accounts. Each mutation commits on its own.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persist a new account; the store assigns `id` and `date_joined`.
    async fn create(&self, payload: AccountPayload) -> Result<Account, AppError>;

    /// All accounts in ascending id order.
    async fn list(&self) -> Result<Vec<Account>, AppError>;

    async fn find(&self, id: i32) -> Result<Option<Account>, AppError>;

    /// Replace every mutable field. Returns `None` when no account has this id.
    async fn update(&self, id: i32, payload: AccountPayload) -> Result<Option<Account>, AppError>;

    /// Remove the account if present. Returns whether a row was removed.
    async fn delete(&self, id: i32) -> Result<bool, AppError>;

    /// Cheap liveness check of the backing store.
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
