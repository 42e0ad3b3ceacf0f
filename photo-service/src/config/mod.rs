//! Photo service configuration
//!
//! The configuration is a JSON document kept in AWS Secrets Manager. It is
//! read once during startup and shared read-only for the process lifetime.
mod error;
mod secrets;

use aws_credential_types::Credentials;
use serde::{Deserialize, Deserializer};

pub use error::{ConfigError, ConfigResult};
pub use secrets::{SecretsLoader, DEFAULT_SECRET_NAME};

/// Region used when neither the secret nor the process environment names one
pub const DEFAULT_REGION: &str = "ap-southeast-1";

/// Default upload limit in megabytes
pub const DEFAULT_MAX_CONTENT_LENGTH_MB: u64 = 10;

const CREDENTIALS_PROVIDER_NAME: &str = "photo-service-config";

/// Raw secret document, keyed the way the deployment stores it
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct RawConfig {
    #[serde(default)]
    s3_bucket: Option<String>,
    #[serde(default)]
    s3_region: Option<String>,
    #[serde(default)]
    allowed_mime_prefixes: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_u64")]
    max_content_length_mb: Option<u64>,
    #[serde(default)]
    aws_access_key_id: Option<String>,
    #[serde(default)]
    aws_secret_access_key: Option<String>,
}

/// Accepts `10` as well as `"10"`
fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Static credentials supplied through the configuration secret
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    access_key_id: String,
    secret_access_key: String,
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .finish()
    }
}

/// Immutable process-wide configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoConfig {
    /// Bucket holding every photo object
    pub bucket: String,
    /// Region of the bucket
    pub region: String,
    /// Accepted content-type prefixes, e.g. `image/`
    pub allowed_mime_prefixes: Vec<String>,
    /// Maximum accepted request body, in megabytes
    pub max_content_length_mb: u64,
    credentials: Option<StaticCredentials>,
}

impl PhotoConfig {
    /// Builds a configuration for the given bucket using every default
    #[must_use]
    pub fn new(bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
            allowed_mime_prefixes: vec!["image/".to_string()],
            max_content_length_mb: DEFAULT_MAX_CONTENT_LENGTH_MB,
            credentials: None,
        }
    }

    /// Parses the JSON secret document
    ///
    /// `fallback_region` is used when the secret has no `S3_REGION`; after
    /// that [`DEFAULT_REGION`] applies.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidDocument` if the document is not a JSON object
    /// of the expected shape, and `ConfigError::MissingBucket` if `S3_BUCKET` is
    /// absent or empty.
    pub fn from_secret_json(raw: &str, fallback_region: Option<String>) -> ConfigResult<Self> {
        let raw: RawConfig = serde_json::from_str(raw)?;

        let bucket = raw
            .s3_bucket
            .filter(|bucket| !bucket.trim().is_empty())
            .ok_or(ConfigError::MissingBucket)?;

        let region = raw
            .s3_region
            .filter(|region| !region.trim().is_empty())
            .or_else(|| fallback_region.filter(|region| !region.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let credentials = match (raw.aws_access_key_id, raw.aws_secret_access_key) {
            (Some(access_key_id), Some(secret_access_key))
                if !access_key_id.is_empty() && !secret_access_key.is_empty() =>
            {
                Some(StaticCredentials {
                    access_key_id,
                    secret_access_key,
                })
            }
            _ => None,
        };

        Ok(Self {
            bucket,
            region,
            allowed_mime_prefixes: raw
                .allowed_mime_prefixes
                .unwrap_or_else(|| vec!["image/".to_string()]),
            max_content_length_mb: raw
                .max_content_length_mb
                .unwrap_or(DEFAULT_MAX_CONTENT_LENGTH_MB),
            credentials,
        })
    }

    /// Uses explicit credentials instead of the ambient credential chain
    #[must_use]
    pub fn with_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.credentials = Some(StaticCredentials {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        });
        self
    }

    /// Explicit credentials, if the configuration carries any
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials> {
        self.credentials.as_ref().map(|creds| {
            Credentials::new(
                creds.access_key_id.clone(),
                creds.secret_access_key.clone(),
                None,
                None,
                CREDENTIALS_PROVIDER_NAME,
            )
        })
    }

    /// Maximum accepted request body, in bytes
    #[must_use]
    pub fn max_content_length_bytes(&self) -> usize {
        usize::try_from(self.max_content_length_mb.saturating_mul(1024 * 1024))
            .unwrap_or(usize::MAX)
    }
}
