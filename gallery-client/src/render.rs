//! Framework-neutral view model of the gallery

use chrono::{DateTime, Utc};
use common_types::ImageRecord;
use serde::Serialize;

use crate::{
    pagination::ViewMode,
    view::{Gallery, GalleryView},
};

pub const TITLE: &str = "Daily Traffic Maps";
pub const LOADING_MESSAGE: &str = "Loading...";

/// What the UI should draw for the current state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Frame {
    Loading { message: &'static str },
    Error { message: &'static str },
    Gallery(GalleryFrame),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryFrame {
    pub title: &'static str,
    pub view_mode: ViewMode,
    pub cards: Vec<Card>,
    pub paginator: Paginator,
    pub lightbox: Option<LightboxFrame>,
}

/// One image on the current page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    /// Absolute index into the full list, used to open the lightbox
    pub index: usize,
    pub key: String,
    pub url: String,
    pub alt: String,
    /// Formatted timestamp; `None` when the record has no usable one
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paginator {
    pub label: String,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LightboxFrame {
    pub image: Card,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl GalleryView {
    /// Renders the current state
    #[must_use]
    pub fn render(&self) -> Frame {
        match self {
            Self::Loading => Frame::Loading {
                message: LOADING_MESSAGE,
            },
            Self::Failed { message } => Frame::Error { message: *message },
            Self::Ready(gallery) => Frame::Gallery(gallery.render()),
        }
    }
}

impl Gallery {
    /// Renders the current page, paginator and lightbox
    #[must_use]
    pub fn render(&self) -> GalleryFrame {
        let range = self.visible_range();
        let cards = self
            .visible_images()
            .iter()
            .zip(range)
            .map(|(image, index)| card(index, image))
            .collect();

        let lightbox = self
            .lightbox_index()
            .zip(self.lightbox_image())
            .map(|(index, image)| LightboxFrame {
                image: card(index, image),
                previous_enabled: self.can_go_lightbox_previous(),
                next_enabled: self.can_go_lightbox_next(),
            });

        GalleryFrame {
            title: TITLE,
            view_mode: self.view_mode(),
            cards,
            paginator: Paginator {
                label: self.page_label(),
                previous_enabled: self.can_go_previous_page(),
                next_enabled: self.can_go_next_page(),
            },
            lightbox,
        }
    }
}

fn card(index: usize, image: &ImageRecord) -> Card {
    Card {
        index,
        key: image.key.clone(),
        url: image.url.clone(),
        alt: format!("Traffic Map {}", image.key),
        caption: image.created_at.as_deref().and_then(format_timestamp),
    }
}

/// Formats an ISO-8601 timestamp as e.g. `May 1, 2024, 8:30:00 AM` (UTC).
/// Returns `None` if the timestamp cannot be parsed.
#[must_use]
pub fn format_timestamp(timestamp: &str) -> Option<String> {
    let parsed = DateTime::parse_from_rfc3339(timestamp).ok()?;
    Some(
        parsed
            .with_timezone(&Utc)
            .format("%b %-d, %Y, %-I:%M:%S %p")
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::{mock::MockImagesApiClient, ClientError},
        view::Key,
    };
    use reqwest::StatusCode;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp("2024-05-01T08:30:00.000Z").as_deref(),
            Some("May 1, 2024, 8:30:00 AM")
        );
        assert_eq!(
            format_timestamp("2024-12-24T23:05:09+00:00").as_deref(),
            Some("Dec 24, 2024, 11:05:09 PM")
        );
        assert_eq!(format_timestamp("yesterday"), None);
        assert_eq!(format_timestamp(""), None);
    }

    #[test]
    fn test_render_loading_and_error() {
        let mut view = GalleryView::default();
        assert_eq!(
            view.render(),
            Frame::Loading {
                message: "Loading..."
            }
        );

        view.resolve(Err(ClientError::Status(StatusCode::INTERNAL_SERVER_ERROR)));
        assert_eq!(
            view.render(),
            Frame::Error {
                message: "Failed to load images. Please try again later."
            }
        );
    }

    #[tokio::test]
    async fn test_render_first_grid_page() {
        let view = GalleryView::load(&MockImagesApiClient::with_generated(22)).await;

        let Frame::Gallery(frame) = view.render() else {
            panic!("expected gallery frame");
        };

        assert_eq!(frame.title, "Daily Traffic Maps");
        assert_eq!(frame.view_mode, ViewMode::Grid);
        assert_eq!(frame.cards.len(), 9);
        assert_eq!(frame.paginator.label, "Page 1 of 3");
        assert!(!frame.paginator.previous_enabled);
        assert!(frame.paginator.next_enabled);
        assert!(frame.lightbox.is_none());

        let first = &frame.cards[0];
        assert_eq!(first.index, 0);
        assert_eq!(first.alt, "Traffic Map screenshots/000.png");
        assert_eq!(first.caption.as_deref(), Some("May 1, 2024, 8:00:00 AM"));
    }

    #[tokio::test]
    async fn test_render_lightbox_from_later_page() {
        let mut view = GalleryView::load(&MockImagesApiClient::with_generated(22)).await;
        let gallery = view.gallery_mut().unwrap();
        gallery.paginate(3);
        gallery.toggle_view_mode();

        let Frame::Gallery(frame) = view.render() else {
            panic!("expected gallery frame");
        };
        assert_eq!(frame.paginator.label, "Page 3 of 3");
        assert_eq!(
            frame.cards.iter().map(|card| card.index).collect::<Vec<_>>(),
            vec![20, 21]
        );

        let last = frame.cards[1].index;
        view.gallery_mut().unwrap().open_lightbox(last);
        view.handle_key(Key::ArrowRight);

        let Frame::Gallery(frame) = view.render() else {
            panic!("expected gallery frame");
        };
        let lightbox = frame.lightbox.unwrap();
        assert_eq!(lightbox.image.key, "screenshots/021.png");
        assert!(lightbox.previous_enabled);
        assert!(!lightbox.next_enabled);
    }

    #[test]
    fn test_render_empty_gallery() {
        let mut view = GalleryView::default();
        view.resolve(Ok(Vec::new()));

        let Frame::Gallery(frame) = view.render() else {
            panic!("expected gallery frame");
        };
        assert!(frame.cards.is_empty());
        assert_eq!(frame.paginator.label, "Page 1 of 0");
        assert!(!frame.paginator.previous_enabled);
        assert!(!frame.paginator.next_enabled);
    }

    #[test]
    fn test_card_without_timestamp_has_no_caption() {
        let mut view = GalleryView::default();
        view.resolve(Ok(vec![ImageRecord {
            key: "screenshots/a.png".to_string(),
            url: "https://b.s3.r.amazonaws.com/screenshots/a.png".to_string(),
            created_at: None,
        }]));

        let Frame::Gallery(frame) = view.render() else {
            panic!("expected gallery frame");
        };
        assert_eq!(frame.cards[0].caption, None);
    }

    #[test]
    fn test_frame_serializes_with_state_tag() {
        let frame = GalleryView::default().render();
        let value = serde_json::to_value(frame).unwrap();
        assert_eq!(value["state"], "loading");
        assert_eq!(value["message"], "Loading...");
    }
}
