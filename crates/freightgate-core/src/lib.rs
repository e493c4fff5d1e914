//! Domain types and rule logic for the Datafrete shipping integration.
//!
//! Everything here is request-scoped and side-effect free: unit conversion,
//! free-shipping rule evaluation, origin/warehouse selection, and the merged
//! merchant configuration the platform sends with every module call. HTTP
//! transport lives in the sibling crates.

pub mod app_config;
pub mod cart;
mod config;
pub mod merchant;
pub mod origin;
pub mod response;
pub mod units;
pub mod zip;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
