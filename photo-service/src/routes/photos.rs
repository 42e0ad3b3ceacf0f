//! Photo upload and retrieval handlers

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        multipart::{Field, MultipartError, MultipartRejection},
        Multipart, Path,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    config::PhotoConfig,
    photo::{
        is_allowed_content_type, normalize_content_type, photo_key, sanitize_filename, PhotoId,
        ValidationError, ORIGINAL_FILENAME_METADATA_KEY,
    },
    photo_storage::{PhotoStorage, StorageError},
    types::{AppError, Environment},
};

/// Name of the multipart part carrying the photo
const FILE_FIELD: &str = "file";

/// Body of a successful upload
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UploadResponse {
    /// Identifier of the stored photo, used with `GET /photo/{id}`
    pub id: String,
    /// Presigned URL to download the photo
    pub url: String,
    /// Seconds until `url` expires
    pub expires_in: u64,
}

fn multipart_error(err: &MultipartError, limit_bytes: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ValidationError::PayloadTooLarge { limit_bytes }.into()
    } else {
        ValidationError::MalformedRequest(err.body_text()).into()
    }
}

/// The validated `file` part of an upload
struct FileUpload {
    filename: String,
    content_type: String,
    body: Bytes,
}

/// Reads the first part named `file` that carries a filename
///
/// Filename and content type are checked before the body is read.
async fn read_file_upload(
    multipart: &mut Multipart,
    config: &PhotoConfig,
) -> Result<FileUpload, AppError> {
    let limit_bytes = config.max_content_length_bytes();

    loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(&e, limit_bytes))?
            .ok_or(ValidationError::MissingFile)?;

        // Parts without a filename are plain form values, not files
        if field.name() == Some(FILE_FIELD) && field.file_name().is_some() {
            return validate_file_field(field, config).await;
        }
    }
}

async fn validate_file_field(
    field: Field<'_>,
    config: &PhotoConfig,
) -> Result<FileUpload, AppError> {
    let filename = field.file_name().unwrap_or_default().to_string();
    if filename.is_empty() {
        return Err(ValidationError::EmptyFilename.into());
    }

    let content_type = normalize_content_type(field.content_type());
    if !is_allowed_content_type(&content_type, &config.allowed_mime_prefixes) {
        return Err(ValidationError::UnsupportedType(content_type).into());
    }

    let body = field
        .bytes()
        .await
        .map_err(|e| multipart_error(&e, config.max_content_length_bytes()))?;

    Ok(FileUpload {
        filename,
        content_type,
        body,
    })
}

/// Stores an uploaded photo and returns a link to it
///
/// 1. Validates the `file` part: present, named, and of an allowed content type
/// 2. Stores the body under a freshly generated id with the sanitized filename as metadata
/// 3. Presigns a download link valid for 15 minutes
///
/// The request body is capped by the configured upload limit. If presigning
/// fails after a successful store the object stays in the bucket.
///
/// # Errors
///
/// - `400` missing file part, empty filename, malformed multipart body
/// - `413` body larger than the upload limit
/// - `415` content type outside the allowed prefixes
/// - `502` the store or presign call failed
#[instrument(skip_all)]
pub async fn upload_photo(
    Extension(environment): Extension<Environment>,
    Extension(config): Extension<Arc<PhotoConfig>>,
    Extension(storage): Extension<Arc<dyn PhotoStorage>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    // Anything that is not a multipart body cannot carry a file part
    let mut multipart = multipart.map_err(|_| ValidationError::MissingFile)?;
    let FileUpload {
        filename,
        content_type,
        body,
    } = read_file_upload(&mut multipart, &config).await?;

    let photo_id = PhotoId::generate();
    let key = photo_id.key();
    let metadata = HashMap::from([(
        ORIGINAL_FILENAME_METADATA_KEY.to_string(),
        sanitize_filename(&filename),
    )]);

    info!(
        "Storing photo {photo_id}: {} bytes of {content_type}",
        body.len()
    );

    storage
        .store(&key, body, &content_type, metadata)
        .await
        .map_err(|e| AppError::bad_gateway("upload_failed", "Upload failed", &e))?;

    let presigned_url = storage
        .presign(&key, environment.upload_link_ttl())
        .await
        .map_err(|e| AppError::bad_gateway("presign_failed", "Presign failed", &e))?;

    info!(
        "Stored photo {photo_id}, link expires at {}",
        presigned_url.expires_at.to_rfc3339()
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            id: photo_id.to_string(),
            url: presigned_url.url,
            expires_in: presigned_url.expires_in.as_secs(),
        }),
    ))
}

/// Redirects to a short-lived download link for a stored photo
///
/// The id is opaque; it only has to map to a key under the photo prefix.
/// Existence is checked first so unknown ids yield `404` rather than a link
/// that fails later.
///
/// # Errors
///
/// - `404` no photo is stored under `id`
/// - `502` the existence check or presign call failed
#[instrument(skip(environment, storage))]
pub async fn get_photo(
    Extension(environment): Extension<Environment>,
    Extension(storage): Extension<Arc<dyn PhotoStorage>>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let key = photo_key(&id)?;

    let exists = storage
        .exists(&key)
        .await
        .map_err(|e| AppError::bad_gateway("storage_error", "Storage error", &e))?;

    if !exists {
        return Err(StorageError::NotFound(key).into());
    }

    let presigned_url = storage
        .presign(&key, environment.retrieve_link_ttl())
        .await
        .map_err(|e| AppError::bad_gateway("presign_error", "Presign error", &e))?;

    Ok((StatusCode::FOUND, [(header::LOCATION, presigned_url.url)]).into_response())
}
