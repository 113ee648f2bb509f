use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An image object listed from the bucket, as served by `GET /api/images`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    /// Object key, unique within a single listing
    pub key: String,
    /// Public URL of the object, derived from bucket, region and key
    pub url: String,
    /// ISO-8601 UTC timestamp of the object's last modification.
    /// Omitted when the storage service did not report one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Error body returned by the listing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorResponse {
    /// Human-readable, generic error message
    pub error: String,
}
