#![doc = "The `storefront` library crate."]
#![doc = ""]
#![doc = "Domain models, persistence gateways, bearer-token authentication, routing and"]
#![doc = "error handling for the storefront product catalog API. The binary (`main.rs`)"]
#![doc = "only loads configuration and runs the HTTP server."]

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod timeout;

pub use crate::config::Config;
pub use crate::error::AppError;
