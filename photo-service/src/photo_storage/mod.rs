//! Storage gateway: the only code that talks to the object store
mod error;
mod s3;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Bytes;
use chrono::{DateTime, Utc};

pub use error::{StorageError, StorageResult};
pub use s3::S3PhotoStorage;

/// Presigned URL with expiration information
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    /// The presigned URL for GET operations
    pub url: String,
    /// How long the URL stays valid after issuance
    pub expires_in: Duration,
    /// UTC timestamp when the URL expires
    pub expires_at: DateTime<Utc>,
}

impl PresignedUrl {
    /// Wraps a freshly signed URL valid for `expires_in` from now
    #[must_use]
    pub fn issued_now(url: String, expires_in: Duration) -> Self {
        Self {
            url,
            expires_in,
            expires_at: Utc::now() + expires_in,
        }
    }
}

/// Object storage holding photo bodies
///
/// Backend failures are reclassified into [`StorageError`] by every
/// implementation; nothing retries on its own.
#[async_trait]
pub trait PhotoStorage: Send + Sync {
    /// Uploads `body` to `key` as a private object with the given content type and metadata
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` on any backend failure
    async fn store(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
        metadata: HashMap<String, String>,
    ) -> StorageResult<()>;

    /// Checks if an object exists without transferring its body
    ///
    /// # Returns
    ///
    /// * `Ok(true)` if object exists
    /// * `Ok(false)` if the backend reports it absent
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` for every other failure
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Generates a presigned GET URL for `key`, valid for `ttl`
    ///
    /// Existence is not checked; a URL for a missing key simply 404s when used.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if signing fails
    async fn presign(&self, key: &str, ttl: Duration) -> StorageResult<PresignedUrl>;
}
