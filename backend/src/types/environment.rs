//! Environment configuration for different deployment stages

use std::env;
use std::num::ParseIntError;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion, Region};
use aws_sdk_s3::config::Credentials;
use tracing::Level;

const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_IMAGE_PREFIX: &str = "screenshots/";
const DEFAULT_PORT: u16 = 8001;

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack`)
    Development,
}

/// Static access key pair for the storage service
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    /// Access key ID
    pub access_key_id: String,
    /// Secret access key
    pub secret_access_key: String,
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
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
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Returns the S3 bucket name for the environment
    ///
    /// # Panics
    ///
    /// Panics if the `S3_BUCKET_NAME` environment variable is not set in production/staging
    #[must_use]
    pub fn s3_bucket(&self) -> String {
        match self {
            Self::Production | Self::Staging => {
                env::var("S3_BUCKET_NAME").expect("S3_BUCKET_NAME environment variable is not set")
            }
            Self::Development => {
                env::var("S3_BUCKET_NAME").unwrap_or_else(|_| "traffic-maps".to_string())
            }
        }
    }

    /// AWS region of the bucket, also used to build public object URLs
    #[must_use]
    pub fn aws_region(&self) -> String {
        env::var("AWS_REGION")
            .ok()
            .filter(|region| !region.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string())
    }

    /// Logical folder the image listing is scoped to
    #[must_use]
    pub fn image_prefix(&self) -> String {
        env::var("IMAGE_PREFIX").unwrap_or_else(|_| DEFAULT_IMAGE_PREFIX.to_string())
    }

    /// Static credentials from `S3_ACCESS_KEY_ID` and `S3_SECRET_ACCESS_KEY`.
    ///
    /// Returns `None` unless both are set, in which case the default
    /// provider chain is used.
    #[must_use]
    pub fn static_credentials(&self) -> Option<StaticCredentials> {
        let access_key_id = env::var("S3_ACCESS_KEY_ID").ok()?;
        let secret_access_key = env::var("S3_SECRET_ACCESS_KEY").ok()?;

        Some(StaticCredentials {
            access_key_id,
            secret_access_key,
        })
    }

    /// Whether to show API docs
    #[must_use]
    pub const fn show_api_docs(&self) -> bool {
        matches!(self, Self::Development | Self::Staging)
    }

    /// Port the HTTP server listens on, `PORT` or 8001
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is set but is not a valid port number
    pub fn port(&self) -> Result<u16, ParseIntError> {
        env::var("PORT").map_or(Ok(DEFAULT_PORT), |port| port.trim().parse())
    }

    /// Returns the endpoint URL to use for AWS services
    #[must_use]
    pub const fn override_aws_endpoint_url(&self) -> Option<&str> {
        match self {
            // Regular AWS endpoints for production and staging
            Self::Production | Self::Staging => None,
            // LocalStack endpoint for development
            Self::Development => Some("http://localhost:4566"),
        }
    }

    /// AWS configuration with retry and timeout settings
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.aws_region()))
            .retry_config(retry_config)
            .timeout_config(timeout_config);

        if let Some(credentials) = self.static_credentials() {
            loader = loader.credentials_provider(Credentials::new(
                credentials.access_key_id,
                credentials.secret_access_key,
                None,
                None,
                "static",
            ));
        }

        if let Some(endpoint_url) = self.override_aws_endpoint_url() {
            loader = loader.endpoint_url(endpoint_url);
        }

        loader.load().await
    }

    /// AWS S3 service configuration
    pub async fn s3_client_config(&self) -> aws_sdk_s3::Config {
        let aws_config = self.aws_config().await;
        let s3_config: aws_sdk_s3::Config = (&aws_config).into();
        let mut builder = s3_config.to_builder();

        // Override "force path style" to true for compatibility with LocalStack
        // https://github.com/awslabs/aws-sdk-rust/discussions/874
        if matches!(self, Self::Development) {
            builder.set_force_path_style(Some(true));
        }

        builder.build()
    }

    /// Default log level when `RUST_LOG` is not set
    #[must_use]
    pub fn tracing_level(&self) -> Level {
        env::var("TRACING_LEVEL")
            .ok()
            .and_then(|val| val.parse::<Level>().ok())
            .unwrap_or(match self {
                Self::Production | Self::Staging => Level::INFO,
                Self::Development => Level::DEBUG,
            })
    }
}
