//! Account entity and its wire-format mapping.

use crate::error::AppError;
use crate::service::{RequestValidator, ACCOUNT_RULES};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

/// A stored account. Serializes to the wire format with `date_joined` as `YYYY-MM-DD`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Account {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: String,
    pub date_joined: NaiveDate,
}

/// Client-supplied account fields. `id` and `date_joined` are assigned by the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountPayload {
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: String,
}

impl AccountPayload {
    /// Deserialize and validate a request body. Unknown fields are ignored.
    pub fn from_json(value: Value) -> Result<Self, AppError> {
        let mut body = match value {
            Value::Object(m) => m,
            _ => {
                return Err(AppError::Validation(
                    "Invalid Account: body of request contained bad or no data".into(),
                ))
            }
        };
        RequestValidator::validate(&body, ACCOUNT_RULES)?;
        let mut take = |field: &str| match body.remove(field) {
            Some(Value::String(s)) => Ok(s),
            _ => Err(AppError::Validation(format!("Invalid Account: missing {}", field))),
        };
        Ok(AccountPayload {
            name: take("name")?,
            email: take("email")?,
            address: take("address")?,
            phone_number: take("phone_number")?,
        })
    }
}

impl Account {
    /// Build the stored form of a new account.
    pub fn new(id: i32, payload: AccountPayload, date_joined: NaiveDate) -> Self {
        Account {
            id,
            name: payload.name,
            email: payload.email,
            address: payload.address,
            phone_number: payload.phone_number,
            date_joined,
        }
    }

    /// Overwrite every mutable field; `id` and `date_joined` are kept.
    pub fn apply(&mut self, payload: AccountPayload) {
        self.name = payload.name;
        self.email = payload.email;
        self.address = payload.address;
        self.phone_number = payload.phone_number;
    }
}
