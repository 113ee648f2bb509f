//! Image listing on top of object storage

mod error;
mod s3;

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use common_types::ImageRecord;
use tracing::debug;

pub use error::{BucketError, BucketResult};
pub use s3::S3ImageStorage;

/// An entry returned by the storage listing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Object key, if the storage service reported one
    pub key: Option<String>,
    /// Last modification time, if the storage service reported one
    pub last_modified: Option<DateTime<Utc>>,
}

/// Storage backend able to list the objects under its configured prefix
#[async_trait::async_trait]
pub trait ImageStorage: Send + Sync {
    /// Lists the objects under the configured prefix with a single call.
    ///
    /// # Errors
    ///
    /// Returns a `BucketError` if the storage service call fails
    async fn list_objects(&self) -> BucketResult<Vec<StoredObject>>;
}

/// Inputs for deriving the public URL of an object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlConfig {
    bucket_name: String,
    region: String,
}

impl ImageUrlConfig {
    /// Creates a new URL configuration
    #[must_use]
    pub const fn new(bucket_name: String, region: String) -> Self {
        Self {
            bucket_name,
            region,
        }
    }

    /// Public virtual-hosted-style URL of the object with the given key.
    /// The key is appended verbatim.
    #[must_use]
    pub fn object_url(&self, key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{key}",
            self.bucket_name, self.region
        )
    }
}

/// Maps storage listings to image records
pub struct ImageCatalog {
    storage: Arc<dyn ImageStorage>,
    url_config: ImageUrlConfig,
}

impl ImageCatalog {
    /// Creates a new catalog over the given storage
    #[must_use]
    pub fn new(storage: Arc<dyn ImageStorage>, url_config: ImageUrlConfig) -> Self {
        Self {
            storage,
            url_config,
        }
    }

    /// Lists every image under the storage prefix.
    ///
    /// Entries without a key are dropped; the order is the one reported by
    /// the storage service.
    ///
    /// # Errors
    ///
    /// Propagates the `BucketError` of the underlying listing call
    pub async fn list_images(&self) -> BucketResult<Vec<ImageRecord>> {
        let objects = self.storage.list_objects().await?;
        let listed = objects.len();

        let images: Vec<ImageRecord> = objects
            .into_iter()
            .filter_map(|object| self.to_record(object))
            .collect();

        debug!(
            "Mapped {} of {} listed objects to image records",
            images.len(),
            listed
        );

        Ok(images)
    }

    fn to_record(&self, object: StoredObject) -> Option<ImageRecord> {
        let key = object.key.filter(|key| !key.is_empty())?;

        Some(ImageRecord {
            url: self.url_config.object_url(&key),
            created_at: object
                .last_modified
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true)),
            key,
        })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{DateTime, Utc};

    use super::{BucketError, BucketResult, ImageStorage, StoredObject};

    /// In-memory storage returning a canned listing or a canned failure
    pub struct MockImageStorage {
        listing: Result<Vec<StoredObject>, String>,
        calls: AtomicUsize,
    }

    impl MockImageStorage {
        /// Storage that lists the given objects
        #[must_use]
        pub const fn new(objects: Vec<StoredObject>) -> Self {
            Self {
                listing: Ok(objects),
                calls: AtomicUsize::new(0),
            }
        }

        /// Storage whose listing always fails with an S3 error
        #[must_use]
        pub fn failing(message: &str) -> Self {
            Self {
                listing: Err(message.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        /// Storage listing `count` objects named `{prefix}{n:03}.png`, one minute apart
        #[must_use]
        pub fn with_generated(prefix: &str, count: usize) -> Self {
            let base = DateTime::<Utc>::from_timestamp(1_714_550_400, 0).unwrap_or_default();
            let objects = (0..count)
                .map(|n| StoredObject {
                    key: Some(format!("{prefix}{n:03}.png")),
                    last_modified: i64::try_from(n)
                        .ok()
                        .map(|minutes| base + chrono::Duration::minutes(minutes)),
                })
                .collect();
            Self::new(objects)
        }

        /// Number of listing calls made so far
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl ImageStorage for MockImageStorage {
        async fn list_objects(&self) -> BucketResult<Vec<StoredObject>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.listing.clone().map_err(BucketError::S3Error)
        }
    }
}
