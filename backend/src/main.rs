use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use backend::{
    image_storage::{ImageCatalog, ImageStorage, ImageUrlConfig, S3ImageStorage},
    server,
    types::Environment,
};
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(environment.tracing_level()).into())
        .from_env_lossy();

    // Configure logging format based on environment
    // Use JSON format for staging/production, regular format for development
    match environment {
        Environment::Production | Environment::Staging => {
            fmt().json().with_env_filter(env_filter).init();
        }
        Environment::Development => {
            fmt().with_env_filter(env_filter).init();
        }
    }

    let bucket_name = environment.s3_bucket();
    let region = environment.aws_region();
    let prefix = environment.image_prefix();

    tracing::info!(
        "Listing images from bucket {} ({}) under prefix {:?} in {:?}",
        bucket_name,
        region,
        prefix,
        environment
    );

    let s3_client = Arc::new(S3Client::from_conf(environment.s3_client_config().await));
    let image_storage: Arc<dyn ImageStorage> = Arc::new(S3ImageStorage::new(
        s3_client,
        bucket_name.clone(),
        prefix,
    ));
    let image_catalog = Arc::new(ImageCatalog::new(
        image_storage,
        ImageUrlConfig::new(bucket_name, region),
    ));

    server::start(environment, image_catalog).await
}
