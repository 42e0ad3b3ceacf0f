//! Reads the configuration secret from AWS Secrets Manager

use aws_sdk_secretsmanager::{error::DisplayErrorContext, Client as SecretsManagerClient};
use tracing::info;

use super::{ConfigError, ConfigResult, PhotoConfig};

/// Secret read when `SECRET_NAME` is not set
pub const DEFAULT_SECRET_NAME: &str = "fsd-s3-secret";

/// Loads [`PhotoConfig`] from a Secrets Manager secret
pub struct SecretsLoader {
    client: SecretsManagerClient,
}

impl SecretsLoader {
    /// Creates a loader around a pre-configured Secrets Manager client
    #[must_use]
    pub const fn new(client: SecretsManagerClient) -> Self {
        Self { client }
    }

    /// Fetches and parses the configuration secret
    ///
    /// The S3 region falls back to the region the Secrets Manager client was
    /// configured with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SecretsManager` if the secret cannot be read,
    /// `ConfigError::EmptySecret` if it carries no value, and any error from
    /// [`PhotoConfig::from_secret_json`].
    pub async fn load(&self, secret_name: &str) -> ConfigResult<PhotoConfig> {
        let output = self
            .client
            .get_secret_value()
            .secret_id(secret_name)
            .send()
            .await
            .map_err(|e| ConfigError::SecretsManager {
                name: secret_name.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        let raw = match (output.secret_string(), output.secret_binary()) {
            (Some(value), _) if !value.is_empty() => value.to_string(),
            (_, Some(blob)) => String::from_utf8(blob.as_ref().to_vec())
                .map_err(|_| ConfigError::EmptySecret(secret_name.to_string()))?,
            _ => return Err(ConfigError::EmptySecret(secret_name.to_string())),
        };

        let fallback_region = self
            .client
            .config()
            .region()
            .map(ToString::to_string);

        let config = PhotoConfig::from_secret_json(&raw, fallback_region)?;

        info!(
            "Loaded configuration from secret {secret_name}: bucket={} region={}",
            config.bucket, config.region
        );

        Ok(config)
    }
}
