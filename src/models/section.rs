//! Navigable page sections and the navigation links that target them.

use serde::{Deserialize, Serialize};

/// A navigable page region (`<section id=...>`).
///
/// Read-only once the page description is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Stable identifier, referenced by nav link hrefs
    pub id: String,
    /// Offset of the section's top edge from the document top (px)
    pub top_offset: f64,
    /// Section height (px)
    #[serde(default)]
    pub height: f64,
}

impl Section {
    /// Creates a new section.
    #[must_use]
    pub fn new(id: impl Into<String>, top_offset: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top_offset,
            height,
        }
    }
}

/// A navigation link pointing at a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    /// Link target, `#about` or `about`
    pub href: String,
    /// Whether the link carries the `active` marker
    #[serde(default)]
    pub is_active: bool,
}

impl NavLink {
    /// Creates an inactive link.
    #[must_use]
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            is_active: false,
        }
    }

    /// Section id this link points at, without the leading `#`.
    #[must_use]
    pub fn target_id(&self) -> &str {
        self.href.strip_prefix('#').unwrap_or(&self.href)
    }

    /// Whether this is an in-page anchor (eligible for smooth scrolling).
    #[must_use]
    pub fn is_anchor(&self) -> bool {
        self.href.starts_with('#')
    }

    /// Whether the link targets the given section id.
    #[must_use]
    pub fn targets(&self, section_id: &str) -> bool {
        !section_id.is_empty() && self.target_id() == section_id
    }
}
