use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use backend::{
    image_storage::{mock::MockImageStorage, ImageCatalog, ImageUrlConfig, StoredObject},
    server,
    types::Environment,
};
use chrono::DateTime;
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const TEST_BUCKET: &str = "traffic-maps";
pub const TEST_REGION: &str = "eu-west-2";

/// Setup test environment variables with all the required configuration
pub fn setup_test_env() {
    // Load test environment variables
    dotenvy::from_path(".env.example").ok();

    // Initialize tracing for tests
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
        .ok();
}

/// Builds a stored object with an optional key and a last-modified time in epoch seconds
pub fn stored_object(key: Option<&str>, last_modified_secs: Option<i64>) -> StoredObject {
    StoredObject {
        key: key.map(ToString::to_string),
        last_modified: last_modified_secs.and_then(|secs| DateTime::from_timestamp(secs, 0)),
    }
}

/// Router wired to a mock storage, built exactly like the production server
pub struct TestSetup {
    pub router: Router,
    pub storage: Arc<MockImageStorage>,
}

impl TestSetup {
    pub fn new(storage: MockImageStorage) -> Self {
        Self::with_environment(storage, Environment::Development)
    }

    pub fn with_environment(storage: MockImageStorage, environment: Environment) -> Self {
        setup_test_env();

        let storage = Arc::new(storage);
        let image_catalog = Arc::new(ImageCatalog::new(
            storage.clone(),
            ImageUrlConfig::new(TEST_BUCKET.to_string(), TEST_REGION.to_string()),
        ));

        Self {
            router: server::router(environment, image_catalog),
            storage,
        }
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }
}

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
