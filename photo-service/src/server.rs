use std::sync::Arc;

use aide::openapi::{Info, OpenApi};
use axum::{extract::DefaultBodyLimit, Extension, Router};
use datadog_tracing::axum::{shutdown_signal, OtelAxumLayer, OtelInResponseLayer};
use tokio::net::TcpListener;

use crate::routes;
use crate::{config::PhotoConfig, photo_storage::PhotoStorage, types::Environment};

/// Port used when `PORT` is not set
pub const DEFAULT_PORT: u16 = 5000;

/// Builds the application router with its dependencies attached
///
/// Request bodies are capped at the configured upload limit before any
/// handler runs.
pub fn router(
    environment: Environment,
    photo_config: Arc<PhotoConfig>,
    photo_storage: Arc<dyn PhotoStorage>,
) -> Router {
    let mut openapi = OpenApi {
        info: Info {
            title: "Photo Service".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            ..Info::default()
        },
        ..OpenApi::default()
    };

    let body_limit = photo_config.max_content_length_bytes();

    routes::handler(&environment)
        .finish_api(&mut openapi)
        .layer(Extension(openapi))
        .layer(Extension(environment))
        .layer(Extension(photo_config))
        .layer(Extension(photo_storage))
        .layer(DefaultBodyLimit::max(body_limit))
}

/// Starts the server with the given environment and dependencies
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(
    environment: Environment,
    photo_config: Arc<PhotoConfig>,
    photo_storage: Arc<dyn PhotoStorage>,
) -> anyhow::Result<()> {
    let router = router(environment, photo_config, photo_storage)
        // Include trace context as header into the response
        .layer(OtelInResponseLayer)
        // Start OpenTelemetry trace on incoming request
        .layer(OtelAxumLayer::default());

    let addr = std::net::SocketAddr::from((
        [0, 0, 0, 0],
        std::env::var("PORT").map_or(Ok(DEFAULT_PORT), |p| p.parse())?,
    ));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("📷 Photo Service started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}
