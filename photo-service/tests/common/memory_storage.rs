use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Bytes;
use photo_service::photo_storage::{PhotoStorage, PresignedUrl, StorageError, StorageResult};

/// Object as the in-memory backend recorded it
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Bytes,
    pub content_type: String,
    pub metadata: HashMap<String, String>,
}

/// In-memory `PhotoStorage` with switchable backend failures
#[derive(Default)]
pub struct MemoryPhotoStorage {
    objects: Mutex<HashMap<String, StoredObject>>,
    fail_store: AtomicBool,
    fail_exists: AtomicBool,
    fail_presign: AtomicBool,
    exists_calls: AtomicUsize,
}

impl MemoryPhotoStorage {
    pub fn fail_store(&self, fail: bool) {
        self.fail_store.store(fail, Ordering::SeqCst);
    }

    pub fn fail_exists(&self, fail: bool) {
        self.fail_exists.store(fail, Ordering::SeqCst);
    }

    pub fn fail_presign(&self, fail: bool) {
        self.fail_presign.store(fail, Ordering::SeqCst);
    }

    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn exists_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
    }

    pub fn presigned_url_for(key: &str, ttl: Duration) -> String {
        format!(
            "https://test-bucket.s3.example.com/{key}?X-Amz-Expires={}",
            ttl.as_secs()
        )
    }
}

#[async_trait]
impl PhotoStorage for MemoryPhotoStorage {
    async fn store(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
        metadata: HashMap<String, String>,
    ) -> StorageResult<()> {
        if self.fail_store.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("connection reset".to_string()));
        }

        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                body,
                content_type: content_type.to_string(),
                metadata,
            },
        );
        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_exists.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("503 Slow Down".to_string()));
        }

        Ok(self.objects.lock().unwrap().contains_key(key))
    }

    async fn presign(&self, key: &str, ttl: Duration) -> StorageResult<PresignedUrl> {
        if self.fail_presign.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(
                "Failed to generate presigned URL: no credentials".to_string(),
            ));
        }

        Ok(PresignedUrl::issued_now(Self::presigned_url_for(key, ttl), ttl))
    }
}
