//! Liveness endpoint

use std::sync::Arc;

use aide::axum::IntoApiResponse;
use axum::{Extension, Json};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::PhotoConfig;

/// Liveness payload
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct HealthResponse {
    /// Always `true` while the process serves requests
    pub ok: bool,
    /// Bucket the service stores photos in
    pub bucket: String,
    /// Region of the bucket
    pub region: String,
}

/// Health check endpoint
///
/// Reports the storage location the service was configured with. Does not
/// contact the backend.
#[allow(clippy::unused_async)]
pub async fn handler(Extension(config): Extension<Arc<PhotoConfig>>) -> impl IntoApiResponse {
    Json(HealthResponse {
        ok: true,
        bucket: config.bucket.clone(),
        region: config.region.clone(),
    })
}
