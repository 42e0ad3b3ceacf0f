use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use photo_service::{config::PhotoConfig, server, types::Environment};
use tower::ServiceExt;

use super::{multipart_body, multipart_content_type, MemoryPhotoStorage, Part};

pub const TEST_BUCKET: &str = "test-bucket";
pub const TEST_REGION: &str = "ap-southeast-1";

/// Setup test environment variables with all the required configuration
pub fn setup_test_env() {
    // Load test environment variables
    dotenvy::from_path(".env.example").ok();

    // Initialize tracing for tests
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Router wired to an in-memory backend
pub struct TestSetup {
    pub router: Router,
    pub storage: Arc<MemoryPhotoStorage>,
    pub config: Arc<PhotoConfig>,
}

impl TestSetup {
    pub fn new() -> Self {
        Self::with_config(PhotoConfig::new(TEST_BUCKET, TEST_REGION))
    }

    pub fn with_config(config: PhotoConfig) -> Self {
        Self::build(
            Environment::Development {
                presign_expiry_override: None,
            },
            config,
        )
    }

    pub fn with_environment(environment: Environment) -> Self {
        Self::build(environment, PhotoConfig::new(TEST_BUCKET, TEST_REGION))
    }

    fn build(environment: Environment, config: PhotoConfig) -> Self {
        setup_test_env();

        let storage = Arc::new(MemoryPhotoStorage::default());
        let config = Arc::new(config);
        let router = server::router(environment, config.clone(), storage.clone());

        Self {
            router,
            storage,
            config,
        }
    }

    pub async fn send_upload(&self, parts: &[Part]) -> Response {
        let request = Request::builder()
            .uri("/upload")
            .method("POST")
            .header("Content-Type", multipart_content_type())
            .body(Body::from(multipart_body(parts)))
            .unwrap();

        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn send_get_request(&self, route: &str) -> Response {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())
            .unwrap();

        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn send_raw_post(&self, route: &str, content_type: &str, body: &str) -> Response {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .header("Content-Type", content_type)
            .body(Body::from(body.to_string()))
            .unwrap();

        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Uploads a small PNG and returns the response JSON
    pub async fn upload_png(&self, filename: &str) -> serde_json::Value {
        let response = self
            .send_upload(&[Part::file(filename, "image/png", &super::sample_png())])
            .await;
        assert_eq!(response.status(), http::StatusCode::CREATED);
        super::parse_response_body(response).await
    }
}
