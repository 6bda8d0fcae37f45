//! # Sunlight Client Library
//!
//! Talks to the Sunlight loan origination / pricing API: acquires and caches
//! the bearer token, attaches the auth headers and forwards credit apps,
//! pricing quotes, equipment lookups, loan document requests and change
//! orders as JSON calls.
//!
//! Modules:
//! - `client` — token pipeline and business operations
//! - `cache` — expiring key/value cache the token lives in
//! - `config` — client configuration, partial updates, YAML loading
//! - `transport` — HTTP capability (`reqwest::Client` by default)
//! - `error` — error taxonomy

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod helpers;
pub mod transport;
pub mod utils;

#[cfg(test)]
mod tests;

pub use crate::client::endpoints::{
    EquipmentParams, Operation, ProjectDetailParams, ProjectParams, SoftCreditParams,
};
pub use crate::client::SunlightClient;
pub use crate::config::types::{BaseUrls, Config, ConfigUpdate};
pub use crate::error::SunlightError;
