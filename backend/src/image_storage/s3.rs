//! S3-backed object listing

use std::sync::Arc;

use aws_sdk_s3::{types::Object, Client as S3Client};
use chrono::DateTime;
use tracing::{debug, warn};

use super::{BucketResult, ImageStorage, StoredObject};

/// Lists image objects under a fixed prefix of an S3 bucket
pub struct S3ImageStorage {
    s3_client: Arc<S3Client>,
    bucket_name: String,
    prefix: String,
}

impl S3ImageStorage {
    /// Creates a new S3 image storage client
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    /// * `bucket_name` - S3 bucket holding the images
    /// * `prefix` - Logical folder the listing is scoped to (e.g. `screenshots/`)
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>, bucket_name: String, prefix: String) -> Self {
        Self {
            s3_client,
            bucket_name,
            prefix,
        }
    }
}

#[async_trait::async_trait]
impl ImageStorage for S3ImageStorage {
    async fn list_objects(&self) -> BucketResult<Vec<StoredObject>> {
        let response = self
            .s3_client
            .list_objects_v2()
            .bucket(&self.bucket_name)
            .prefix(&self.prefix)
            .send()
            .await?;

        // Only the first page is ever requested
        if response.is_truncated == Some(true) {
            warn!(
                bucket = %self.bucket_name,
                prefix = %self.prefix,
                "Listing truncated, objects beyond the first page are not returned"
            );
        }

        let objects: Vec<StoredObject> = response
            .contents
            .unwrap_or_default()
            .into_iter()
            .map(stored_object_from)
            .collect();

        debug!(
            "Listed {} objects under {}/{}",
            objects.len(),
            self.bucket_name,
            self.prefix
        );

        Ok(objects)
    }
}

fn stored_object_from(object: Object) -> StoredObject {
    StoredObject {
        key: object.key,
        last_modified: object
            .last_modified
            .and_then(|t| DateTime::from_timestamp(t.secs(), t.subsec_nanos())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::primitives::DateTime as SmithyDateTime;

    #[test]
    fn test_stored_object_from_s3_object() {
        let object = Object::builder()
            .key("screenshots/2024-05-01.png")
            .last_modified(SmithyDateTime::from_secs(1_714_552_200))
            .build();

        let stored = stored_object_from(object);

        assert_eq!(stored.key.as_deref(), Some("screenshots/2024-05-01.png"));
        assert_eq!(
            stored.last_modified.map(|t| t.timestamp()),
            Some(1_714_552_200)
        );
    }

    #[test]
    fn test_stored_object_without_metadata() {
        let stored = stored_object_from(Object::builder().build());

        assert!(stored.key.is_none());
        assert!(stored.last_modified.is_none());
    }
}
