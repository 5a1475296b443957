//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid signing timeout")]
    InvalidSigningTimeout,

    #[error("Pass type identifier must start with 'pass.'")]
    InvalidPassTypeIdentifier,

    #[error("Team identifier must be 10 alphanumeric characters")]
    InvalidTeamIdentifier,

    #[error("Web service URL must use HTTPS in production")]
    WebServiceUrlMustBeHttps,

    #[error("Invalid web service URL format")]
    InvalidWebServiceUrl,

    #[error("Value is not valid base64: {0}")]
    InvalidBase64(&'static str),
}
