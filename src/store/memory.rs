//! Process-local account store. Used by tests and `STORE_BACKEND=memory`.

use super::AccountStore;
use crate::error::AppError;
use crate::model::{Account, AccountPayload};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryAccountStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    accounts: BTreeMap<i32, Account>,
    last_id: i32,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn create(&self, payload: AccountPayload) -> Result<Account, AppError> {
        let mut inner = self.inner.write().await;
        let id = inner
            .last_id
            .checked_add(1)
            .ok_or_else(|| AppError::Internal("account id sequence exhausted".into()))?;
        inner.last_id = id;
        let account = Account::new(id, payload, chrono::Utc::now().date_naive());
        inner.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn list(&self) -> Result<Vec<Account>, AppError> {
        Ok(self.inner.read().await.accounts.values().cloned().collect())
    }

    async fn find(&self, id: i32) -> Result<Option<Account>, AppError> {
        Ok(self.inner.read().await.accounts.get(&id).cloned())
    }

    async fn update(&self, id: i32, payload: AccountPayload) -> Result<Option<Account>, AppError> {
        let mut inner = self.inner.write().await;
        Ok(inner.accounts.get_mut(&id).map(|account| {
            account.apply(payload);
            account.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        Ok(self.inner.write().await.accounts.remove(&id).is_some())
    }
}
