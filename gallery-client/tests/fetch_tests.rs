use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{routing::get, Router};
use backend::{
    image_storage::{mock::MockImageStorage, ImageCatalog, ImageUrlConfig},
    server,
    types::Environment,
};
use gallery_client::{
    render::Frame,
    view::LOAD_FAILED_MESSAGE,
    ClientError, GalleryView, ImagesApi, ImagesApiClient, Key, ViewMode,
};
use tokio::net::TcpListener;

const BUCKET: &str = "traffic-maps";
const REGION: &str = "eu-west-2";

/// Routes client and server logs to the test output
fn setup_test_env() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
        .ok();
}

async fn spawn(router: Router) -> SocketAddr {
    setup_test_env();

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, router.into_make_service())
            .await
            .expect("Server error");
    });

    addr
}

async fn spawn_backend(storage: MockImageStorage) -> SocketAddr {
    let catalog = ImageCatalog::new(
        Arc::new(storage),
        ImageUrlConfig::new(BUCKET.to_string(), REGION.to_string()),
    );
    spawn(server::router(Environment::Development, Arc::new(catalog))).await
}

fn client(addr: SocketAddr) -> ImagesApiClient {
    ImagesApiClient::with_timeout(&format!("http://{addr}"), Duration::from_secs(5))
        .expect("Failed to build client")
}

#[tokio::test]
async fn test_fetch_images_from_backend() {
    let addr = spawn_backend(MockImageStorage::with_generated("screenshots/", 3)).await;

    let images = client(addr).fetch_images().await.unwrap();

    assert_eq!(images.len(), 3);
    assert_eq!(images[0].key, "screenshots/000.png");
    assert_eq!(
        images[0].url,
        "https://traffic-maps.s3.eu-west-2.amazonaws.com/screenshots/000.png"
    );
    assert_eq!(
        images[0].created_at.as_deref(),
        Some("2024-05-01T08:00:00.000Z")
    );
}

#[tokio::test]
async fn test_gallery_loads_and_navigates() {
    let addr = spawn_backend(MockImageStorage::with_generated("screenshots/", 22)).await;

    let mut view = GalleryView::load(&client(addr)).await;
    assert!(!view.is_loading());

    let gallery = view.gallery_mut().expect("gallery should be ready");
    assert_eq!(gallery.len(), 22);
    assert_eq!(gallery.page_label(), "Page 1 of 3");

    assert!(gallery.next_page());
    assert!(gallery.next_page());
    assert!(!gallery.next_page());
    assert_eq!(gallery.visible_images().len(), 4);

    gallery.toggle_view_mode();
    assert_eq!(gallery.view_mode(), ViewMode::List);
    assert_eq!(gallery.current_page(), 3);
    assert_eq!(gallery.visible_images().len(), 2);

    assert!(gallery.open_lightbox(20));
    assert!(view.handle_key(Key::ArrowLeft));
    assert_eq!(
        view.gallery().and_then(|g| g.lightbox_index()),
        Some(19)
    );
    assert!(view.handle_key(Key::Escape));
    assert_eq!(view.gallery().and_then(|g| g.lightbox_index()), None);
}

#[tokio::test]
async fn test_storage_failure_shows_generic_message() {
    let addr = spawn_backend(MockImageStorage::failing("AccessDenied")).await;
    let api = client(addr);

    let err = api.fetch_images().await.unwrap_err();
    assert!(matches!(err, ClientError::Status(status) if status.as_u16() == 500));

    let view = GalleryView::load(&api).await;
    assert_eq!(view.error_message(), Some(LOAD_FAILED_MESSAGE));
    assert_eq!(
        view.render(),
        Frame::Error {
            message: LOAD_FAILED_MESSAGE
        }
    );
}

#[tokio::test]
async fn test_empty_bucket_renders_empty_gallery() {
    let addr = spawn_backend(MockImageStorage::new(vec![])).await;

    let view = GalleryView::load(&client(addr)).await;

    let Frame::Gallery(frame) = view.render() else {
        panic!("expected gallery frame");
    };
    assert!(frame.cards.is_empty());
    assert_eq!(frame.paginator.label, "Page 1 of 0");
}

#[tokio::test]
async fn test_non_json_body_is_a_load_failure() {
    let addr = spawn(Router::new().route("/api/images", get(|| async { "<html></html>" }))).await;
    let api = client(addr);

    let err = api.fetch_images().await.unwrap_err();
    assert!(matches!(err, ClientError::Request(_)));

    let view = GalleryView::load(&api).await;
    assert_eq!(view.error_message(), Some(LOAD_FAILED_MESSAGE));
}

#[tokio::test]
async fn test_unreachable_backend_is_a_load_failure() {
    setup_test_env();

    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let view = GalleryView::load(&client(addr)).await;
    assert_eq!(view.error_message(), Some(LOAD_FAILED_MESSAGE));
}
