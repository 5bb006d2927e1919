//! Grid items and other scroll-reveal targets.

use crate::models::Rect;
use serde::{Deserialize, Serialize};

/// Image shown inside a grid item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Image source URL
    pub src: String,
    /// Alternative text
    #[serde(default)]
    pub alt: String,
}

/// A portfolio grid item.
///
/// Carries three independent pieces of state:
///
/// - `is_visible`: the one-shot scroll reveal, monotonic false → true
/// - `is_shown`: the logical filter state, set the moment a filter is applied
/// - `is_opaque` / `occupies_layout`: the two presentation phases of a
///   filter transition (opacity/transform first, `display` second)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridItem {
    /// Category tag (`data-category`)
    pub category: String,
    /// Card title
    #[serde(default)]
    pub title: String,
    /// Card description
    #[serde(default)]
    pub description: String,
    /// Card image, if the markup has one
    #[serde(default)]
    pub image: Option<ImageRef>,
    /// Position in the document
    #[serde(default)]
    pub rect: Rect,
    /// Revealed by the intersection tracker
    #[serde(default)]
    pub is_visible: bool,
    /// Matches the active filter
    #[serde(default = "default_true")]
    pub is_shown: bool,
    /// Opacity/transform phase of the filter transition
    #[serde(default = "default_true")]
    pub is_opaque: bool,
    /// Occupancy phase of the filter transition (`display` not `none`)
    #[serde(default = "default_true")]
    pub occupies_layout: bool,
    /// Reveal animation delay assigned on entry (ms)
    #[serde(default)]
    pub reveal_delay_ms: Option<u64>,
    /// Bumped by every filter transition; deferred phases carry the value
    /// they were scheduled under
    #[serde(skip)]
    pub transition_seq: u64,
}

const fn default_true() -> bool {
    true
}

impl GridItem {
    /// Creates a shown, not yet revealed item.
    #[must_use]
    pub fn new(category: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            title: title.into(),
            description: String::new(),
            image: None,
            rect: Rect::default(),
            is_visible: false,
            is_shown: true,
            is_opaque: true,
            occupies_layout: true,
            reveal_delay_ms: None,
            transition_seq: 0,
        }
    }

    /// Sets the document rectangle.
    #[must_use]
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the image.
    #[must_use]
    pub fn with_image(mut self, src: impl Into<String>, alt: impl Into<String>) -> Self {
        self.image = Some(ImageRef {
            src: src.into(),
            alt: alt.into(),
        });
        self
    }
}

/// A non-grid element eligible for scroll reveal (cards, skill items, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealTarget {
    /// Identifier used in directives and intersection entries
    pub id: String,
    /// Position in the document
    #[serde(default)]
    pub rect: Rect,
    /// Revealed by the intersection tracker
    #[serde(default)]
    pub is_visible: bool,
}

impl RevealTarget {
    /// Creates an unrevealed target.
    #[must_use]
    pub fn new(id: impl Into<String>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect,
            is_visible: false,
        }
    }
}
