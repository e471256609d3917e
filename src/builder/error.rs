//! Configuration errors.

use crate::validation::ConfigViolation;
use thiserror::Error;

/// Errors that can occur when loading or checking a machine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse machine configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid machine configuration ({} violations)", .0.len())]
    Invalid(Vec<ConfigViolation>),
}
