//! Client side of the image gallery: fetches the listing once and drives
//! pagination and lightbox state for a UI layer to draw.

#![deny(clippy::all, clippy::pedantic, clippy::nursery, dead_code)]

pub mod api;
pub mod pagination;
pub mod render;
pub mod view;

pub use api::{ClientError, ImagesApi, ImagesApiClient};
pub use pagination::ViewMode;
pub use render::Frame;
pub use view::{Gallery, GalleryView, Key};
