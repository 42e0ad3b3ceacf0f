//! Universal error handling for the API

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::Serialize;

use crate::{photo::ValidationError, photo_storage::StorageError};

/// API error response envelope
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Whether the client should retry the request
    pub allow_retry: bool,
    /// Error details
    error: ErrorBody,
}

/// Error body containing code, message and the offending detail
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    /// Machine-readable error code
    pub code: &'static str,
    /// Human-readable error message
    pub message: &'static str,
    /// Rejected input or a short backend diagnostic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Application error type that wraps the API error response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    inner: ApiErrorResponse,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub const fn new(
        status: StatusCode,
        code: &'static str,
        msg: &'static str,
        retry: bool,
    ) -> Self {
        Self {
            status,
            inner: ApiErrorResponse {
                allow_retry: retry,
                error: ErrorBody {
                    code,
                    message: msg,
                    details: None,
                },
            },
        }
    }

    /// Attach the offending input or a diagnostic string
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.inner.error.details = Some(details.into());
        self
    }

    /// Backend failure surfaced as `502 Bad Gateway`
    ///
    /// `err` only carries a short diagnostic; the storage gateway has already
    /// logged the full SDK error.
    #[must_use]
    pub fn bad_gateway(code: &'static str, msg: &'static str, err: &StorageError) -> Self {
        tracing::error!("{msg}: {err:?}");
        Self::new(StatusCode::BAD_GATEWAY, code, msg, true).with_details(err.to_string())
    }

    /// HTTP status of this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.inner.error.code
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.status.as_u16() {
            400..=499 => tracing::warn!(
                "Client error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            500..=599 => tracing::error!(
                "Server error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            _ => {}
        }

        (self.status, Json(self.inner)).into_response()
    }
}

/// Convert validation errors to application errors
impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        use ValidationError::{
            EmptyFilename, MalformedRequest, MissingFile, PayloadTooLarge, UnknownIdentifier,
            UnsupportedType,
        };

        match err {
            MissingFile => Self::new(
                StatusCode::BAD_REQUEST,
                "missing_file",
                "Missing file",
                false,
            ),
            EmptyFilename => Self::new(
                StatusCode::BAD_REQUEST,
                "empty_filename",
                "Empty filename",
                false,
            ),
            UnsupportedType(mime) => Self::new(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "unsupported_type",
                "Unsupported content type",
                false,
            )
            .with_details(mime),
            PayloadTooLarge { limit_bytes } => Self::new(
                StatusCode::PAYLOAD_TOO_LARGE,
                "payload_too_large",
                "Request body exceeds the upload limit",
                false,
            )
            .with_details(format!("limit is {limit_bytes} bytes")),
            MalformedRequest(reason) => Self::new(
                StatusCode::BAD_REQUEST,
                "malformed_request",
                "Malformed multipart request",
                false,
            )
            .with_details(reason),
            UnknownIdentifier(_) => {
                Self::new(StatusCode::NOT_FOUND, "not_found", "Not found", false)
            }
        }
    }
}

/// Convert storage errors to application errors
///
/// Handlers that need an operation specific message use
/// [`AppError::bad_gateway`] instead.
impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match &err {
            StorageError::NotFound(key) => {
                tracing::debug!("Object not found: {key}");
                Self::new(StatusCode::NOT_FOUND, "not_found", "Not found", false)
            }
            StorageError::Unavailable(_) => {
                Self::bad_gateway("storage_error", "Storage error", &err)
            }
        }
    }
}

impl OperationOutput for AppError {
    type Inner = ApiErrorResponse;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ApiErrorResponse>::operation_response(ctx, operation)
    }
}
