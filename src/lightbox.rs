//! Lightbox overlay and grid item click handling.
//!
//! At most one overlay exists at a time: opening while one is mounted tears
//! the old one down first. While mounted, body scrolling is locked.

use crate::dom::Directive;
use crate::models::{GridItem, ImageRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use tracing::debug;

/// Content layout of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightboxLayout {
    /// Image and close control
    #[default]
    Simple,
    /// Image, title and description
    Detailed,
    /// Header title, image, description and prev/next controls
    Gallery,
}

/// What clicking a grid item does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ItemClickBehavior {
    /// Nothing
    Ignore,
    /// Open the lightbox
    Lightbox,
    /// Leave for a detail page
    Navigate {
        /// Dedicated pages by item title
        #[serde(default)]
        routes: BTreeMap<String, String>,
        /// Generic detail page receiving the item as query parameters
        detail_page: String,
    },
}

impl ItemClickBehavior {
    /// Destination for a click on `item` under `Navigate`, `None` otherwise.
    #[must_use]
    pub fn destination(&self, item: &GridItem) -> Option<String> {
        let Self::Navigate {
            routes,
            detail_page,
        } = self
        else {
            return None;
        };

        if let Some(route) = routes.get(item.title.trim()) {
            return Some(route.clone());
        }

        let image = item.image.as_ref().map_or("", |image| image.src.as_str());
        let query = form_urlencode(&[
            ("title", item.title.trim()),
            ("category", item.category.as_str()),
            ("description", item.description.as_str()),
            ("image", image),
        ]);
        Some(format!("{detail_page}?{query}"))
    }
}

/// Encodes pairs as `application/x-www-form-urlencoded`.
///
/// Matches `URLSearchParams`: ASCII alphanumerics and `*-._` pass through,
/// spaces become `+`, everything else is percent-encoded as UTF-8.
#[must_use]
pub fn form_urlencode(pairs: &[(&str, &str)]) -> String {
    let mut out = String::new();
    for (index, (name, value)) in pairs.iter().enumerate() {
        if index > 0 {
            out.push('&');
        }
        encode_component(&mut out, name);
        out.push('=');
        encode_component(&mut out, value);
    }
    out
}

fn encode_component(out: &mut String, s: &str) {
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'*' | b'-' | b'.' | b'_' => {
                out.push(char::from(b));
            }
            b' ' => out.push('+'),
            _ => {
                let _ = write!(out, "%{b:02X}");
            }
        }
    }
}

/// Content of a mounted overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LightboxView {
    /// Layout used
    pub layout: LightboxLayout,
    /// Grid item the overlay shows
    pub item_index: usize,
    /// Item title
    pub title: String,
    /// Item description
    pub description: String,
    /// Item image, if any
    pub image: Option<ImageRef>,
}

/// Why the overlay was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The close control
    CloseControl,
    /// A click on the backdrop outside the content
    Backdrop,
    /// The Escape key
    Escape,
}

/// Step direction in the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Previous shown item
    Previous,
    /// Next shown item
    Next,
}

/// Mounts and unmounts the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxPresenter {
    layout: LightboxLayout,
    current: Option<LightboxView>,
}

impl LightboxPresenter {
    /// Creates a closed presenter.
    #[must_use]
    pub const fn new(layout: LightboxLayout) -> Self {
        Self {
            layout,
            current: None,
        }
    }

    /// Whether an overlay is mounted.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// The mounted overlay.
    #[must_use]
    pub const fn current(&self) -> Option<&LightboxView> {
        self.current.as_ref()
    }

    /// Opens the overlay for `item`, replacing any mounted one.
    pub fn open(&mut self, item_index: usize, item: &GridItem) -> Vec<Directive> {
        let mut directives = Vec::new();
        if self.current.is_some() {
            directives.push(Directive::UnmountLightbox);
        }

        let view = LightboxView {
            layout: self.layout,
            item_index,
            title: item.title.clone(),
            description: item.description.clone(),
            image: item.image.clone(),
        };
        debug!(item_index, title = %view.title, "opening lightbox");

        directives.push(Directive::MountLightbox { view: view.clone() });
        directives.push(Directive::SetScrollLock { locked: true });
        self.current = Some(view);
        directives
    }

    /// Closes the overlay; a no-op when nothing is mounted.
    pub fn close(&mut self, reason: CloseReason) -> Vec<Directive> {
        if self.current.take().is_none() {
            return Vec::new();
        }
        debug!(?reason, "closing lightbox");
        vec![
            Directive::UnmountLightbox,
            Directive::SetScrollLock { locked: false },
        ]
    }

    /// Steps to the neighbouring shown item, wrapping at the ends.
    ///
    /// Only the gallery layout has prev/next controls. If the current item
    /// was filtered out, stepping lands on the first shown item.
    pub fn step(&mut self, items: &[GridItem], direction: Step) -> Vec<Directive> {
        if self.layout != LightboxLayout::Gallery {
            return Vec::new();
        }
        let Some(current) = self.current.as_ref().map(|view| view.item_index) else {
            return Vec::new();
        };

        let shown: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_shown)
            .map(|(index, _)| index)
            .collect();
        if shown.is_empty() {
            return Vec::new();
        }

        let next = match shown.iter().position(|&index| index == current) {
            Some(position) => {
                let len = shown.len();
                let position = match direction {
                    Step::Next => (position + 1) % len,
                    Step::Previous => (position + len - 1) % len,
                };
                shown[position]
            }
            None => shown[0],
        };

        if next == current {
            return Vec::new();
        }
        // The scroll lock is already held; only the content changes.
        let mut directives = self.open(next, &items[next]);
        directives.retain(|directive| !matches!(directive, Directive::SetScrollLock { .. }));
        directives
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<GridItem> {
        vec![
            GridItem::new("photo", "Portrait")
                .with_description("Studio light")
                .with_image("img/portrait.jpg", "Portrait"),
            GridItem::new("video", "Reel"),
            GridItem::new("photo", "Landscape"),
        ]
    }

    #[test]
    fn test_open_close_locks_and_unlocks_scroll() {
        let items = items();
        let mut presenter = LightboxPresenter::new(LightboxLayout::Detailed);

        let directives = presenter.open(0, &items[0]);
        assert!(presenter.is_open());
        assert_eq!(directives.len(), 2);
        assert_eq!(directives[1], Directive::SetScrollLock { locked: true });
        assert_eq!(presenter.current().unwrap().description, "Studio light");

        let directives = presenter.close(CloseReason::Escape);
        assert!(!presenter.is_open());
        assert_eq!(
            directives,
            vec![
                Directive::UnmountLightbox,
                Directive::SetScrollLock { locked: false }
            ]
        );
        assert!(presenter.close(CloseReason::Backdrop).is_empty());
    }

    #[test]
    fn test_open_while_open_unmounts_first() {
        let items = items();
        let mut presenter = LightboxPresenter::new(LightboxLayout::Simple);
        presenter.open(0, &items[0]);
        let directives = presenter.open(1, &items[1]);
        assert_eq!(directives[0], Directive::UnmountLightbox);
        assert!(matches!(directives[1], Directive::MountLightbox { .. }));
        assert_eq!(presenter.current().unwrap().item_index, 1);
    }

    #[test]
    fn test_gallery_step_wraps_over_shown_items() {
        let mut items = items();
        items[1].is_shown = false;
        let mut presenter = LightboxPresenter::new(LightboxLayout::Gallery);
        presenter.open(2, &items[2]);

        presenter.step(&items, Step::Next);
        assert_eq!(presenter.current().unwrap().item_index, 0);
        let directives = presenter.step(&items, Step::Previous);
        assert_eq!(presenter.current().unwrap().item_index, 2);
        assert!(!directives
            .iter()
            .any(|d| matches!(d, Directive::SetScrollLock { .. })));
    }

    #[test]
    fn test_step_requires_gallery() {
        let items = items();
        let mut presenter = LightboxPresenter::new(LightboxLayout::Detailed);
        presenter.open(0, &items[0]);
        assert!(presenter.step(&items, Step::Next).is_empty());
        assert_eq!(presenter.current().unwrap().item_index, 0);
    }

    #[test]
    fn test_form_urlencode() {
        let query = form_urlencode(&[("title", "Photo & Film"), ("q", "a/b ü*")]);
        assert_eq!(query, "title=Photo+%26+Film&q=a%2Fb+%C3%BC*");
    }

    #[test]
    fn test_navigate_destination() {
        let mut routes = BTreeMap::new();
        routes.insert("Reel".to_string(), "reel.html".to_string());
        let behavior = ItemClickBehavior::Navigate {
            routes,
            detail_page: "portfolio-detail.html".to_string(),
        };
        let items = items();

        assert_eq!(behavior.destination(&items[1]).unwrap(), "reel.html");
        assert_eq!(
            behavior.destination(&items[0]).unwrap(),
            "portfolio-detail.html?title=Portrait&category=photo&description=Studio+light&image=img%2Fportrait.jpg"
        );
        assert!(ItemClickBehavior::Lightbox.destination(&items[0]).is_none());
    }
}
