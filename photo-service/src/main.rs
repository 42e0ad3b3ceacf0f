use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use aws_sdk_secretsmanager::Client as SecretsManagerClient;

use photo_service::{
    config::{SecretsLoader, DEFAULT_SECRET_NAME},
    photo_storage::{PhotoStorage, S3PhotoStorage},
    server,
    types::Environment,
};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // Configure logging format based on environment
    // Use JSON format for staging/production (Datadog), regular format for development
    match environment {
        Environment::Production | Environment::Staging => {
            fmt()
                .json()
                .with_env_filter(EnvFilter::from_default_env())
                .init();
        }
        Environment::Development { .. } => {
            fmt().with_env_filter(EnvFilter::from_default_env()).init();
        }
    }

    let secret_name =
        std::env::var("SECRET_NAME").unwrap_or_else(|_| DEFAULT_SECRET_NAME.to_string());
    let aws_config = environment.aws_config().await;
    let secrets_loader = SecretsLoader::new(SecretsManagerClient::new(&aws_config));
    let photo_config = Arc::new(secrets_loader.load(&secret_name).await?);

    let s3_client = Arc::new(S3Client::from_conf(
        environment.s3_client_config(&aws_config, &photo_config),
    ));
    let photo_storage: Arc<dyn PhotoStorage> = Arc::new(S3PhotoStorage::new(
        s3_client,
        photo_config.bucket.clone(),
    ));

    server::start(environment, photo_config, photo_storage).await
}
