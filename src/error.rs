//! Error types for the lead response service.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Database-related errors.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("Query failed: {0}")]
    Query(String),
}

/// Errors raised during classify/score/generate. Fatal for the request.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Template references unknown placeholder {{{0}}}")]
    MissingPlaceholder(String),

    #[error("Unterminated placeholder in template")]
    UnterminatedPlaceholder,
}

/// Errors from outbound email/notification delivery. Recovered locally.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("Invalid address {address}: {reason}")]
    Address { address: String, reason: String },

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("SMTP send failed: {0}")]
    Smtp(String),

    #[error("HTTP error: {0}")]
    Http(String),
}

/// Submission field constraint violations, rejected at the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be between {min} and {max} characters")]
    Length {
        field: &'static str,
        min: usize,
        max: usize,
    },

    #[error("email address is not valid")]
    InvalidEmail,

    #[error("phone must be at most {max} characters")]
    PhoneTooLong { max: usize },
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
