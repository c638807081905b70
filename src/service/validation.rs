//! Request validation from per-field rules.

use crate::error::AppError;
use serde_json::{Map, Value};

/// Rule for one required string field of a request body.
#[derive(Clone, Debug)]
pub struct FieldRule {
    pub name: &'static str,
    pub max_length: usize,
    pub allow_empty: bool,
}

/// Column widths of the `accounts` table.
pub const ACCOUNT_RULES: &[FieldRule] = &[
    FieldRule { name: "name", max_length: 64, allow_empty: false },
    FieldRule { name: "email", max_length: 64, allow_empty: true },
    FieldRule { name: "address", max_length: 256, allow_empty: true },
    FieldRule { name: "phone_number", max_length: 32, allow_empty: true },
];

pub struct RequestValidator;

impl RequestValidator {
    /// Validate body against rules. Every field named by a rule must be present as a string;
    /// fields without a rule are ignored.
    pub fn validate(body: &Map<String, Value>, rules: &[FieldRule]) -> Result<(), AppError> {
        for rule in rules {
            let s = match body.get(rule.name) {
                None | Some(Value::Null) => {
                    return Err(AppError::Validation(format!(
                        "Invalid Account: missing {}",
                        rule.name
                    )))
                }
                Some(Value::String(s)) => s,
                Some(_) => {
                    return Err(AppError::Validation(format!(
                        "Invalid Account: {} must be a string",
                        rule.name
                    )))
                }
            };
            if !rule.allow_empty && s.trim().is_empty() {
                return Err(AppError::Validation(format!(
                    "Invalid Account: {} must not be empty",
                    rule.name
                )));
            }
            if s.chars().count() > rule.max_length {
                return Err(AppError::Validation(format!(
                    "Invalid Account: {} must be at most {} characters",
                    rule.name, rule.max_length
                )));
            }
        }
        Ok(())
    }
}
