//! Custom error types for the common library
//!
//! This module defines the error kinds shared by the storefront service and
//! the search client when talking to the upstream catalog and auth services.

use thiserror::Error;

/// Errors raised while talking to an upstream service
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Upstream unreachable, or it answered with something that is not JSON
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// Upstream reachable but returned a non-success status or an
    /// incomplete payload
    #[error("Upstream rejection: {0}")]
    UpstreamRejection(String),

    /// Malformed user input (never surfaced to the user)
    #[error("Validation failure: {0}")]
    ValidationFailure(String),
}

/// Errors raised while loading settings
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A setting could not be read or deserialized
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    /// A setting was present but unusable
    #[error("Invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Type alias for Result with UpstreamError
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Type alias for Result with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
