pub mod health;
pub mod photos;

use aide::{
    axum::{routing::get, ApiRouter},
    openapi::OpenApi,
    scalar::Scalar,
};
use axum::{Extension, Json};

use crate::types::Environment;

/// Title of the interactive API reference
const DOCS_TITLE: &str = "Photo Service Docs";

/// Creates the router with all handler routes
///
/// Multipart upload and the redirecting retrieval are plain axum routes; they
/// are not part of the generated `OpenAPI` document. The API reference is only
/// mounted where the environment shows it.
pub fn handler(environment: &Environment) -> ApiRouter {
    let router = ApiRouter::new()
        .api_route("/", get(health::handler))
        .route("/upload", axum::routing::post(photos::upload_photo))
        .route("/photo/{id}", axum::routing::get(photos::get_photo));

    if environment.show_api_docs() {
        router.merge(docs())
    } else {
        router
    }
}

fn docs() -> ApiRouter {
    ApiRouter::new()
        .route(
            "/docs",
            Scalar::new("/openapi.json")
                .with_title(DOCS_TITLE)
                .axum_route(),
        )
        .route("/openapi.json", axum::routing::get(openapi_schema))
}

#[allow(clippy::unused_async)]
async fn openapi_schema(Extension(openapi): Extension<OpenApi>) -> Json<OpenApi> {
    Json(openapi)
}
