//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion};
use aws_sdk_s3::config::Region;

use crate::config::PhotoConfig;

/// Lifetime of the link returned by a successful upload
pub const UPLOAD_LINK_TTL: Duration = Duration::from_secs(15 * 60);

/// Lifetime of the link a retrieval redirects to
pub const RETRIEVE_LINK_TTL: Duration = Duration::from_secs(10 * 60);

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack`)
    Development {
        /// Optional override for both presigned link lifetimes, in seconds
        presign_expiry_override: Option<u64>,
    },
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => {
                let presign_expiry_override = env::var("PRESIGNED_URL_EXPIRY_SECS")
                    .ok()
                    .and_then(|val| val.parse::<u64>().ok());

                Self::Development {
                    presign_expiry_override,
                }
            }
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Whether to show API docs
    #[must_use]
    pub const fn show_api_docs(&self) -> bool {
        matches!(self, Self::Development { .. } | Self::Staging)
    }

    /// Returns the endpoint URL to use for AWS services
    #[must_use]
    pub const fn override_aws_endpoint_url(&self) -> Option<&str> {
        match self {
            Self::Production | Self::Staging => None,
            Self::Development { .. } => Some("http://localhost:4566"),
        }
    }

    /// AWS configuration with retry and timeout settings
    ///
    /// Region and credentials come from the default provider chains.
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        let mut config_builder = aws_config::load_defaults(BehaviorVersion::latest())
            .await
            .to_builder()
            .retry_config(retry_config)
            .timeout_config(timeout_config);

        if let Some(endpoint_url) = self.override_aws_endpoint_url() {
            config_builder = config_builder.endpoint_url(endpoint_url);
        }

        config_builder.build()
    }

    /// AWS S3 service configuration for the photo bucket
    ///
    /// Derived from the shared `aws_config`. Explicit credentials from the
    /// photo configuration win over the ambient credential chain.
    #[must_use]
    pub fn s3_client_config(
        &self,
        aws_config: &aws_config::SdkConfig,
        photo_config: &PhotoConfig,
    ) -> aws_sdk_s3::Config {
        let s3_config: aws_sdk_s3::Config = aws_config.into();
        let mut builder = s3_config
            .to_builder()
            .region(Region::new(photo_config.region.clone()));

        if let Some(credentials) = photo_config.credentials() {
            builder = builder.credentials_provider(credentials);
        }

        // Override "force path style" to true for compatibility with LocalStack
        // https://github.com/awslabs/aws-sdk-rust/discussions/874
        if matches!(self, Self::Development { .. }) {
            builder.set_force_path_style(Some(true));
        }

        builder.build()
    }

    /// Lifetime of the presigned link returned from an upload
    #[must_use]
    pub const fn upload_link_ttl(&self) -> Duration {
        self.link_ttl(UPLOAD_LINK_TTL)
    }

    /// Lifetime of the presigned link a retrieval redirects to
    #[must_use]
    pub const fn retrieve_link_ttl(&self) -> Duration {
        self.link_ttl(RETRIEVE_LINK_TTL)
    }

    const fn link_ttl(&self, default: Duration) -> Duration {
        match self {
            Self::Development {
                presign_expiry_override: Some(secs),
            } => Duration::from_secs(*secs),
            _ => default,
        }
    }
}
