//! Photo upload and retrieval service backed by S3

#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(missing_docs, dead_code)]

/// Configuration loaded once at startup
pub mod config;

/// Photo identifiers, object keys and upload validation
pub mod photo;

/// Storage gateway in front of the object store
pub mod photo_storage;

/// HTTP routes
pub mod routes;

/// HTTP server bootstrap
pub mod server;

/// Shared types (environment, API errors)
pub mod types;
