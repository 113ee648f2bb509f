use serde::Serialize;
use strum::{Display, EnumString};

/// How the current page of images is laid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Card grid, 9 images per page
    #[default]
    Grid,
    /// Row list, 10 images per page
    List,
}

impl ViewMode {
    /// Number of images on one page in this mode
    #[must_use]
    pub const fn page_size(self) -> usize {
        match self {
            Self::Grid => 9,
            Self::List => 10,
        }
    }

    /// The other mode
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Grid => Self::List,
            Self::List => Self::Grid,
        }
    }
}

/// Number of pages needed for `total` items, `0` when there are none.
///
/// # Panics
///
/// Panics if `page_size` is zero
#[must_use]
pub const fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size)
}

/// Items shown on the 1-indexed `page`. Pages past the end are empty.
#[must_use]
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}
