use aide::axum::IntoApiResponse;
use axum::Json;
use schemars::JsonSchema;
use serde::Serialize;

/// Liveness and build information
#[derive(Debug, Serialize, JsonSchema)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests
    status: &'static str,
    /// Current version of the application
    semver: &'static str,
    /// Commit hash of the current build (if available)
    rev: Option<&'static str>,
}

/// Liveness check for the load balancer
///
/// Answers from the binary alone, so a missing or unreachable image bucket
/// never fails it.
pub async fn handler() -> impl IntoApiResponse {
    Json(HealthResponse {
        status: "ok",
        semver: env!("CARGO_PKG_VERSION"),
        rev: option_env!("GIT_REV"),
    })
}
