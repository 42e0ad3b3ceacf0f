//! Error types for configuration loading

use thiserror::Error;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that prevent the service from starting
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `S3_BUCKET` is absent or empty
    #[error("configuration secret must include S3_BUCKET")]
    MissingBucket,

    /// The secret is not a JSON object of the expected shape
    #[error("invalid configuration document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    /// The secret exists but carries neither a string nor a UTF-8 binary value
    #[error("secret {0} has no usable value")]
    EmptySecret(String),

    /// Secrets Manager could not be reached or refused the request
    #[error("failed to read secret {name}: {message}")]
    SecretsManager {
        /// Secret name or ARN
        name: String,
        /// Error reported by the SDK
        message: String,
    },
}
