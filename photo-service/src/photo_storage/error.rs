//! Error types for storage operations

use aws_sdk_s3::{
    error::{ProvideErrorMetadata, SdkError},
    operation::{get_object::GetObjectError, head_object::HeadObjectError, put_object::PutObjectError},
    presigning::PresigningConfigError,
};
use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations
///
/// Payloads are short diagnostics that may be shown to clients. The full SDK
/// error chain is only logged by the gateway.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Transport failure, authentication failure or unexpected backend response
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The backend explicitly reported the object as absent
    #[error("object not found: {0}")]
    NotFound(String),
}

/// Client safe summary of an SDK failure: the S3 error code or the failure kind
fn sdk_failure_kind<E: ProvideErrorMetadata, R>(error: &SdkError<E, R>) -> String {
    match error {
        SdkError::ServiceError(context) => context
            .err()
            .code()
            .map_or_else(|| "service error".to_string(), ToString::to_string),
        SdkError::TimeoutError(_) => "timeout".to_string(),
        SdkError::DispatchFailure(_) => "dispatch failure".to_string(),
        SdkError::ResponseError(_) => "response error".to_string(),
        SdkError::ConstructionFailure(_) => "request construction failure".to_string(),
        _ => "unknown failure".to_string(),
    }
}

impl From<SdkError<HeadObjectError>> for StorageError {
    fn from(error: SdkError<HeadObjectError>) -> Self {
        Self::Unavailable(sdk_failure_kind(&error))
    }
}

impl From<SdkError<PutObjectError>> for StorageError {
    fn from(error: SdkError<PutObjectError>) -> Self {
        Self::Unavailable(sdk_failure_kind(&error))
    }
}

impl From<SdkError<GetObjectError>> for StorageError {
    fn from(error: SdkError<GetObjectError>) -> Self {
        Self::Unavailable(format!("presign: {}", sdk_failure_kind(&error)))
    }
}

impl From<PresigningConfigError> for StorageError {
    fn from(_: PresigningConfigError) -> Self {
        Self::Unavailable("invalid presigning config".to_string())
    }
}
