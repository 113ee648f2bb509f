//! Universal error handling for the API

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common_types::ErrorResponse;

use crate::image_storage::BucketError;

/// Message returned to clients when the image listing fails
pub const LIST_IMAGES_FAILED: &str = "Failed to fetch images";

/// Application error type rendered as `{"error": "<message>"}`
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: &'static str,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub const fn new(status: StatusCode, message: &'static str) -> Self {
        Self { status, message }
    }

    /// HTTP status of the error response
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Client-facing message
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.message
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error based on status code
        match self.status.as_u16() {
            400..=499 => tracing::warn!("Client error: {} - {}", self.status, self.message),
            500..=599 => tracing::error!("Server error: {} - {}", self.status, self.message),
            _ => {}
        }

        (
            self.status,
            Json(ErrorResponse {
                error: self.message.to_string(),
            }),
        )
            .into_response()
    }
}

/// Convert bucket errors to application errors.
///
/// The detail is logged here and never sent to the client.
impl From<BucketError> for AppError {
    fn from(err: BucketError) -> Self {
        use BucketError::{AwsError, BucketNotFound, S3Error, UpstreamError};

        match &err {
            BucketNotFound(msg) => tracing::error!("Image bucket not found: {msg}"),
            UpstreamError(msg) => tracing::error!("S3 upstream error: {msg}"),
            S3Error(msg) | AwsError(msg) => tracing::error!("S3/AWS error: {msg}"),
        }

        Self::new(StatusCode::INTERNAL_SERVER_ERROR, LIST_IMAGES_FAILED)
    }
}

impl OperationOutput for AppError {
    type Inner = ErrorResponse;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ErrorResponse>::operation_response(ctx, operation)
    }
}
