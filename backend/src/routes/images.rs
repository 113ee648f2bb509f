use std::sync::Arc;

use aide::axum::{routing::get, ApiRouter};
use axum::{
    http::{header, HeaderValue},
    Extension, Json,
};
use common_types::ImageRecord;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::instrument;

use crate::{image_storage::ImageCatalog, types::AppError};

/// Listings are never cached, by the browser or any intermediary
pub const NO_STORE: &str = "private, no-cache, no-store, max-age=0, must-revalidate";

/// Image listing routes
pub fn handler() -> ApiRouter {
    ApiRouter::new()
        .api_route("/api/images", get(list_images))
        .route_layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static(NO_STORE),
        ))
}

/// Lists the images stored under the configured bucket prefix
///
/// Issues a single listing call to the storage service on every request and
/// returns one record per object, in storage order.
///
/// # Errors
///
/// Any storage failure is returned as a `500` with a generic message.
#[instrument(skip(image_catalog))]
pub async fn list_images(
    Extension(image_catalog): Extension<Arc<ImageCatalog>>,
) -> Result<Json<Vec<ImageRecord>>, AppError> {
    let images = image_catalog.list_images().await?;

    tracing::info!("Listed {} images", images.len());

    Ok(Json(images))
}
