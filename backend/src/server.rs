use std::{sync::Arc, time::Duration};

use aide::openapi::{Info, OpenApi};
use axum::{Extension, Router};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{image_storage::ImageCatalog, routes, types::Environment};

/// Builds the application router with all layers and shared dependencies
#[must_use]
pub fn router(environment: Environment, image_catalog: Arc<ImageCatalog>) -> Router {
    let mut openapi = OpenApi {
        info: Info {
            title: "Image Gallery".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            ..Info::default()
        },
        ..OpenApi::default()
    };

    routes::handler()
        .finish_api(&mut openapi)
        .layer(Extension(openapi))
        .layer(Extension(environment))
        .layer(Extension(image_catalog))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(5)))
}

/// Starts the server with the given environment and dependencies
///
/// # Errors
///
/// Returns an error if `PORT` is malformed, or the server fails to start or bind to the port
pub async fn start(environment: Environment, image_catalog: Arc<ImageCatalog>) -> anyhow::Result<()> {
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], environment.port()?));
    let router = router(environment, image_catalog);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🔄 Image Gallery backend started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}

/// Resolves on SIGINT, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to register SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
