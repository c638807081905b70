//! HTTP handlers for the account resource and service endpoints.

pub mod account;
pub mod common;
