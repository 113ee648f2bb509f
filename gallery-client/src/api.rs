use std::time::Duration;

use common_types::ImageRecord;
use reqwest::{Client, StatusCode};
use thiserror::Error;

/// Result type for listing endpoint calls
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while fetching the image list
#[derive(Error, Debug)]
pub enum ClientError {
    /// The HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    Build(String),

    /// The request failed in transport or the body could not be decoded
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status
    #[error("Unexpected status: {0}")]
    Status(StatusCode),
}

/// Trait for the image listing API
#[async_trait::async_trait]
pub trait ImagesApi: Send + Sync {
    /// Fetches the full image list from `GET /api/images`
    async fn fetch_images(&self) -> ClientResult<Vec<ImageRecord>>;
}

/// HTTP client for the image listing endpoint
pub struct ImagesApiClient {
    images_url: String,
    http_client: Client,
}

impl ImagesApiClient {
    /// Creates a client for the backend at `base_url` (e.g. `http://localhost:8001`).
    ///
    /// No request timeout is configured; requests wait for the transport to give up.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Build` if the HTTP client cannot be created
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::build(base_url, Client::builder())
    }

    /// Creates a client whose requests fail after `timeout`
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Build` if the HTTP client cannot be created
    pub fn with_timeout(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        Self::build(base_url, Client::builder().timeout(timeout))
    }

    fn build(base_url: &str, builder: reqwest::ClientBuilder) -> ClientResult<Self> {
        let http_client = builder
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self {
            images_url: format!("{}/api/images", base_url.trim_end_matches('/')),
            http_client,
        })
    }

    /// Full URL of the listing endpoint
    #[must_use]
    pub fn images_url(&self) -> &str {
        &self.images_url
    }
}

#[async_trait::async_trait]
impl ImagesApi for ImagesApiClient {
    async fn fetch_images(&self) -> ClientResult<Vec<ImageRecord>> {
        let response = self.http_client.get(&self.images_url).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }

        Ok(response.json::<Vec<ImageRecord>>().await?)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use common_types::ImageRecord;
    use reqwest::StatusCode;

    use super::{ClientError, ClientResult, ImagesApi};

    /// Returns a canned image list, or a canned status failure
    pub struct MockImagesApiClient {
        response: Result<Vec<ImageRecord>, StatusCode>,
    }

    impl MockImagesApiClient {
        #[must_use]
        pub const fn new(images: Vec<ImageRecord>) -> Self {
            Self {
                response: Ok(images),
            }
        }

        #[must_use]
        pub const fn failing(status: StatusCode) -> Self {
            Self {
                response: Err(status),
            }
        }

        /// `count` records keyed `screenshots/{n:03}.png`, one minute apart
        #[must_use]
        pub fn with_generated(count: usize) -> Self {
            let images = (0..count)
                .map(|n| ImageRecord {
                    key: format!("screenshots/{n:03}.png"),
                    url: format!(
                        "https://traffic-maps.s3.us-east-1.amazonaws.com/screenshots/{n:03}.png"
                    ),
                    created_at: Some(format!("2024-05-01T08:{:02}:00.000Z", n % 60)),
                })
                .collect();
            Self::new(images)
        }
    }

    #[async_trait::async_trait]
    impl ImagesApi for MockImagesApiClient {
        async fn fetch_images(&self) -> ClientResult<Vec<ImageRecord>> {
            self.response.clone().map_err(ClientError::Status)
        }
    }
}
