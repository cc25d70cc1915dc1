//! CLI error types

use pricer_core::types::PricingError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `mc_pricer` commands
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialisation error: {0}")]
    Serialisation(String),
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Serialisation(err.to_string())
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        CliError::Serialisation(err.to_string())
    }
}

/// Result alias for CLI commands
pub type Result<T> = std::result::Result<T, CliError>;
