//! Client-caused failures

use thiserror::Error;

/// Reasons a request is rejected before or instead of touching storage
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No multipart `file` part was sent
    #[error("missing file")]
    MissingFile,

    /// The `file` part has an empty filename
    #[error("empty filename")]
    EmptyFilename,

    /// The content type matches none of the allowed prefixes
    #[error("unsupported content-type: {0}")]
    UnsupportedType(String),

    /// The request body exceeds the configured maximum
    #[error("payload too large (limit {limit_bytes} bytes)")]
    PayloadTooLarge {
        /// Configured limit
        limit_bytes: usize,
    },

    /// The multipart body could not be parsed
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// No photo can exist under this identifier
    #[error("unknown photo id: {0}")]
    UnknownIdentifier(String),
}
