//! Request validation for account bodies.

mod validation;
pub use validation::{FieldRule, RequestValidator, ACCOUNT_RULES};
