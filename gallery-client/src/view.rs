//! Gallery view state machine
//!
//! `GalleryView` moves from `Loading` to either `Failed` or `Ready` exactly
//! once. Once ready, `Gallery` owns the fetched list together with the page,
//! layout and lightbox sub-state; every transition keeps that sub-state
//! within the bounds of the list.

use std::ops::Range;

use common_types::ImageRecord;
use strum::{Display, EnumString};
use tracing::{debug, error};

use crate::{
    api::{ClientResult, ImagesApi},
    pagination::{page_slice, total_pages, ViewMode},
};

/// Message shown when the image list cannot be loaded
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load images. Please try again later.";

/// Keys the lightbox responds to, named as DOM `KeyboardEvent.key` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Key {
    /// Previous image
    ArrowLeft,
    /// Next image
    ArrowRight,
    /// Close the lightbox
    Escape,
}

/// Top-level state of the gallery view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GalleryView {
    /// Waiting for the one-time fetch
    #[default]
    Loading,
    /// The fetch failed; nothing else is rendered
    Failed {
        /// User-facing message
        message: &'static str,
    },
    /// The list is loaded
    Ready(Gallery),
}

impl GalleryView {
    /// Fetches the image list once and returns the resolved view
    pub async fn load(api: &dyn ImagesApi) -> Self {
        let mut view = Self::Loading;
        view.resolve(api.fetch_images().await);
        view
    }

    /// Applies the outcome of the fetch.
    ///
    /// Only the first outcome is applied; returns `false` if the view was
    /// already resolved.
    pub fn resolve(&mut self, result: ClientResult<Vec<ImageRecord>>) -> bool {
        if !matches!(self, Self::Loading) {
            debug!("Ignoring fetch outcome, gallery view already resolved");
            return false;
        }

        *self = match result {
            Ok(images) => {
                debug!("Loaded {} images", images.len());
                Self::Ready(Gallery::new(images))
            }
            Err(err) => {
                error!("Error fetching images: {err}");
                Self::Failed {
                    message: LOAD_FAILED_MESSAGE,
                }
            }
        };
        true
    }

    /// Whether the fetch is still pending
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Error message of a failed view
    #[must_use]
    pub const fn error_message(&self) -> Option<&'static str> {
        match self {
            Self::Failed { message } => Some(*message),
            _ => None,
        }
    }

    /// The loaded gallery, if ready
    #[must_use]
    pub const fn gallery(&self) -> Option<&Gallery> {
        match self {
            Self::Ready(gallery) => Some(gallery),
            _ => None,
        }
    }

    /// Mutable access to the loaded gallery, if ready
    pub fn gallery_mut(&mut self) -> Option<&mut Gallery> {
        match self {
            Self::Ready(gallery) => Some(gallery),
            _ => None,
        }
    }

    /// Routes a key press to the lightbox; ignored unless the gallery is ready
    pub fn handle_key(&mut self, key: Key) -> bool {
        self.gallery_mut()
            .is_some_and(|gallery| gallery.handle_key(key))
    }
}

/// Loaded image list with pagination and lightbox sub-state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    images: Vec<ImageRecord>,
    current_page: usize,
    view_mode: ViewMode,
    lightbox: Option<usize>,
}

impl Gallery {
    /// Starts on page 1 in grid mode with the lightbox closed
    #[must_use]
    pub const fn new(images: Vec<ImageRecord>) -> Self {
        Self {
            images,
            current_page: 1,
            view_mode: ViewMode::Grid,
            lightbox: None,
        }
    }

    /// Every image, in the order the endpoint returned them
    #[must_use]
    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    /// Number of images
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Current 1-indexed page
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Current layout
    #[must_use]
    pub const fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Images per page in the current layout
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.view_mode.page_size()
    }

    /// Number of pages, `0` for an empty list
    #[must_use]
    pub fn total_pages(&self) -> usize {
        total_pages(self.images.len(), self.page_size())
    }

    /// Highest page the view may show; page 1 always exists
    fn last_page(&self) -> usize {
        self.total_pages().max(1)
    }

    /// Paginator text, e.g. `Page 1 of 3`
    #[must_use]
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages())
    }

    /// Absolute indices of the images on the current page
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        let start = (self.current_page - 1) * self.page_size();
        let visible = self.visible_images().len();
        start..start + visible
    }

    /// Images on the current page
    #[must_use]
    pub fn visible_images(&self) -> &[ImageRecord] {
        page_slice(&self.images, self.current_page, self.page_size())
    }

    /// Jumps to `page`. Pages outside `1..=total_pages` are ignored.
    pub fn paginate(&mut self, page: usize) -> bool {
        if page == 0 || page > self.last_page() {
            debug!(
                "Ignoring page {page}, valid pages are 1..={}",
                self.last_page()
            );
            return false;
        }
        self.current_page = page;
        true
    }

    /// Whether the "Previous" page control is enabled
    #[must_use]
    pub const fn can_go_previous_page(&self) -> bool {
        self.current_page > 1
    }

    /// Whether the "Next" page control is enabled
    #[must_use]
    pub fn can_go_next_page(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Moves to the previous page if there is one
    pub fn previous_page(&mut self) -> bool {
        self.can_go_previous_page() && self.paginate(self.current_page - 1)
    }

    /// Moves to the next page if there is one
    pub fn next_page(&mut self) -> bool {
        self.can_go_next_page() && self.paginate(self.current_page + 1)
    }

    /// Switches layout, keeping the page number unless it no longer exists,
    /// in which case the view moves to the new last page.
    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
        let last_page = self.last_page();
        if self.current_page > last_page {
            debug!(
                "Page {} out of range in {view_mode} mode, moving to page {last_page}",
                self.current_page
            );
            self.current_page = last_page;
        }
    }

    /// Switches between grid and list layout
    pub fn toggle_view_mode(&mut self) {
        self.set_view_mode(self.view_mode.toggled());
    }

    /// Absolute index of the image shown in the lightbox, if open
    #[must_use]
    pub const fn lightbox_index(&self) -> Option<usize> {
        self.lightbox
    }

    /// Image shown in the lightbox, if open
    #[must_use]
    pub fn lightbox_image(&self) -> Option<&ImageRecord> {
        self.lightbox.and_then(|index| self.images.get(index))
    }

    /// Opens the lightbox on the image at absolute `index`
    pub fn open_lightbox(&mut self, index: usize) -> bool {
        if index >= self.images.len() {
            debug!("Ignoring lightbox index {index} for {} images", self.len());
            return false;
        }
        self.lightbox = Some(index);
        true
    }

    /// Closes the lightbox; the paginated view is left untouched
    pub fn close_lightbox(&mut self) -> bool {
        self.lightbox.take().is_some()
    }

    /// Whether the lightbox "Previous" control is enabled
    #[must_use]
    pub fn can_go_lightbox_previous(&self) -> bool {
        self.lightbox.is_some_and(|index| index > 0)
    }

    /// Whether the lightbox "Next" control is enabled
    #[must_use]
    pub fn can_go_lightbox_next(&self) -> bool {
        self.lightbox
            .is_some_and(|index| index + 1 < self.images.len())
    }

    /// Shows the previous image; a no-op on the first image
    pub fn lightbox_previous(&mut self) -> bool {
        match self.lightbox {
            Some(index) if index > 0 => {
                self.lightbox = Some(index - 1);
                true
            }
            _ => false,
        }
    }

    /// Shows the next image; a no-op on the last image
    pub fn lightbox_next(&mut self) -> bool {
        match self.lightbox {
            Some(index) if index + 1 < self.images.len() => {
                self.lightbox = Some(index + 1);
                true
            }
            _ => false,
        }
    }

    /// Applies a key binding. Keys are only bound while the lightbox is open.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if self.lightbox.is_none() {
            return false;
        }
        match key {
            Key::ArrowLeft => self.lightbox_previous(),
            Key::ArrowRight => self.lightbox_next(),
            Key::Escape => self.close_lightbox(),
        }
    }
}
