//! Error types for bucket operations

use aws_sdk_s3::{error::SdkError, operation::list_objects_v2::ListObjectsV2Error};
use thiserror::Error;

/// Result type for bucket operations
pub type BucketResult<T> = Result<T, BucketError>;

/// Errors that can occur during bucket operations
#[derive(Error, Debug)]
pub enum BucketError {
    /// S3 service error
    #[error("S3 service error: {0}")]
    S3Error(String),

    /// The configured bucket does not exist
    #[error("Bucket not found: {0}")]
    BucketNotFound(String),

    /// AWS SDK error (dispatch, timeout, credentials)
    #[error("AWS SDK error: {0}")]
    AwsError(String),

    /// Upstream service error (5xx from S3)
    #[error("Upstream service error: {0}")]
    UpstreamError(String),
}

impl From<SdkError<ListObjectsV2Error>> for BucketError {
    fn from(error: SdkError<ListObjectsV2Error>) -> Self {
        match error {
            SdkError::ServiceError(err) => match err.err() {
                ListObjectsV2Error::NoSuchBucket(e) => Self::BucketNotFound(format!("{e:?}")),
                _ if err.raw().status().as_u16() >= 500 => {
                    Self::UpstreamError(format!("{:?}", err.err()))
                }
                _ => Self::S3Error(format!("{:?}", err.err())),
            },
            _ => Self::AwsError(error.to_string()),
        }
    }
}
