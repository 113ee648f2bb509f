//! API documentation, only served outside production

use aide::{axum::ApiRouter, openapi::OpenApi, scalar::Scalar};
use axum::{
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json,
};

use crate::types::Environment;

pub fn handler() -> ApiRouter {
    let scalar = Scalar::new("/openapi.json").with_title("Image Gallery API");

    ApiRouter::new()
        .route("/docs", scalar.axum_route())
        .route("/openapi.json", get(openapi_schema))
        .route_layer(middleware::from_fn(require_api_docs))
}

async fn require_api_docs(
    Extension(environment): Extension<Environment>,
    request: Request,
    next: Next,
) -> Response {
    if environment.show_api_docs() {
        next.run(request).await
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

#[allow(clippy::unused_async)]
async fn openapi_schema(Extension(openapi): Extension<OpenApi>) -> Json<OpenApi> {
    Json(openapi)
}
