//! S3 implementation of the storage gateway

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::{
    error::{DisplayErrorContext, SdkError},
    operation::head_object::HeadObjectError,
    presigning::PresigningConfig,
    primitives::ByteStream,
    types::ObjectCannedAcl,
    Client as S3Client,
};
use axum::body::Bytes;
use tracing::{debug, error};

use super::{PhotoStorage, PresignedUrl, StorageError, StorageResult};

/// Photo storage client for S3 operations
pub struct S3PhotoStorage {
    s3_client: Arc<S3Client>,
    bucket_name: String,
}

impl S3PhotoStorage {
    /// Creates a new photo storage client
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    /// * `bucket_name` - S3 bucket holding the photos
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>, bucket_name: String) -> Self {
        Self {
            s3_client,
            bucket_name,
        }
    }
}

#[async_trait]
impl PhotoStorage for S3PhotoStorage {
    async fn store(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
        metadata: HashMap<String, String>,
    ) -> StorageResult<()> {
        debug!("Uploading {} bytes to {key}", body.len());

        self.s3_client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .set_metadata(Some(metadata))
            .acl(ObjectCannedAcl::Private)
            .send()
            .await
            .map_err(|e| {
                error!("S3 upload failed for {key}: {}", DisplayErrorContext(&e));
                StorageError::from(e)
            })?;

        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let result = self
            .s3_client
            .head_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(SdkError::ServiceError(service_err))
                if matches!(service_err.err(), HeadObjectError::NotFound(_))
                    || service_err.raw().status().as_u16() == 404 =>
            {
                debug!("Object does not exist: {key}");
                Ok(false)
            }
            Err(e) => {
                error!("head_object failed for {key}: {}", DisplayErrorContext(&e));
                Err(StorageError::from(e))
            }
        }
    }

    async fn presign(&self, key: &str, ttl: Duration) -> StorageResult<PresignedUrl> {
        let presigned_config = PresigningConfig::expires_in(ttl).map_err(|e| {
            error!("Invalid presigning config for {key}: {e}");
            StorageError::from(e)
        })?;

        let presigned_request = self
            .s3_client
            .get_object()
            .bucket(&self.bucket_name)
            .key(key)
            .presigned(presigned_config)
            .await
            .map_err(|e| {
                error!("presign failed for {key}: {}", DisplayErrorContext(&e));
                StorageError::from(e)
            })?;

        let presigned_url = PresignedUrl::issued_now(presigned_request.uri().to_string(), ttl);

        debug!(
            "Generated presigned URL for object: {key} expires at: {}",
            presigned_url.expires_at
        );

        Ok(presigned_url)
    }
}
