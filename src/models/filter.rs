//! Filter tags, filter buttons and the singleton filter state.

use crate::constants::FILTER_ALL;
use crate::models::GridItem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The active filter: everything, or a single category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum Filter {
    /// Matches every item
    #[default]
    All,
    /// Matches items whose category equals the tag
    Category(String),
}

impl Filter {
    /// Whether an item passes this filter.
    #[must_use]
    pub fn matches(&self, item: &GridItem) -> bool {
        match self {
            Self::All => true,
            Self::Category(tag) => item.category == *tag,
        }
    }

    /// The tag as written in `data-filter`.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::All => FILTER_ALL,
            Self::Category(tag) => tag,
        }
    }
}

impl From<&str> for Filter {
    fn from(tag: &str) -> Self {
        if tag == FILTER_ALL {
            Self::All
        } else {
            Self::Category(tag.to_string())
        }
    }
}

impl From<String> for Filter {
    fn from(tag: String) -> Self {
        if tag == FILTER_ALL {
            Self::All
        } else {
            Self::Category(tag)
        }
    }
}

impl From<Filter> for String {
    fn from(filter: Filter) -> Self {
        filter.tag().to_string()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A filter control declaring its target category (`data-filter`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterButton {
    /// Tag applied when clicked
    pub tag: Filter,
    /// Whether the button carries the `active` marker
    #[serde(default)]
    pub is_active: bool,
}

impl FilterButton {
    /// Creates an inactive button.
    #[must_use]
    pub fn new(tag: impl Into<Filter>) -> Self {
        Self {
            tag: tag.into(),
            is_active: false,
        }
    }
}

/// Singleton holding the currently applied filter. Starts at `All`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterState {
    /// Currently applied filter
    pub active: Filter,
}
