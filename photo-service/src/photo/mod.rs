//! Photo identifiers and the checks applied to uploads before they reach storage
mod error;
mod filename;

use std::fmt;

use uuid::Uuid;

pub use error::ValidationError;
pub use filename::sanitize_filename;

/// Every photo object lives under this key prefix
pub const PHOTO_KEY_PREFIX: &str = "photos";

/// Object metadata key holding the sanitized client filename
pub const ORIGINAL_FILENAME_METADATA_KEY: &str = "original-filename";

/// Longest object key the backend accepts, in bytes
pub const MAX_KEY_BYTES: usize = 1024;

/// Content type assumed when the client does not send one
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Randomly generated identifier of a stored photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhotoId(Uuid);

impl PhotoId {
    /// Generates a fresh random (v4) identifier
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Object key of this photo
    #[must_use]
    pub fn key(&self) -> String {
        format!("{PHOTO_KEY_PREFIX}/{}", self.0)
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Maps a client supplied identifier to its object key
///
/// The identifier is opaque: anything is accepted as long as the resulting key
/// stays directly under [`PHOTO_KEY_PREFIX`].
///
/// # Errors
///
/// Returns `ValidationError::UnknownIdentifier` for identifiers that are empty,
/// dot segments, contain separators or control characters, or whose key would
/// exceed [`MAX_KEY_BYTES`]. No stored photo can have such an identifier.
pub fn photo_key(id: &str) -> Result<String, ValidationError> {
    let escapes_prefix = id.is_empty()
        || id == "."
        || id == ".."
        || id.contains(['/', '\\'])
        || id.chars().any(char::is_control);

    if escapes_prefix {
        return Err(ValidationError::UnknownIdentifier(id.to_string()));
    }

    let key = format!("{PHOTO_KEY_PREFIX}/{id}");
    if key.len() > MAX_KEY_BYTES {
        return Err(ValidationError::UnknownIdentifier(id.to_string()));
    }

    Ok(key)
}

/// Normalizes a client supplied content type to its lowercase essence
///
/// Parameters such as `charset` are dropped. Missing or blank values become
/// [`DEFAULT_CONTENT_TYPE`]; values `mime` cannot parse are kept trimmed and
/// lowercased so they can still be reported back.
#[must_use]
pub fn normalize_content_type(content_type: Option<&str>) -> String {
    let Some(raw) = content_type.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return DEFAULT_CONTENT_TYPE.to_string();
    };

    raw.parse::<mime::Mime>().map_or_else(
        |_| raw.to_lowercase(),
        |parsed| parsed.essence_str().to_lowercase(),
    )
}

/// Whether `content_type` starts with one of the allowed prefixes
#[must_use]
pub fn is_allowed_content_type(content_type: &str, allowed_prefixes: &[String]) -> bool {
    allowed_prefixes
        .iter()
        .any(|prefix| content_type.starts_with(prefix.as_str()))
}
