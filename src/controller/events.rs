//! Host signals consumed by the controller.

use crate::services::IntersectionEntry;
use crate::shortcuts::Key;
use crate::video::MediaEvent;
use serde::{Deserialize, Serialize};

/// Where a click landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "on", rename_all = "snake_case")]
pub enum ClickTarget {
    /// Hamburger toggle
    MenuToggle,
    /// Navigation link (inside the menu)
    NavLink {
        /// Link index
        index: usize,
    },
    /// Filter button
    FilterButton {
        /// Button index
        index: usize,
    },
    /// Grid item
    GridItem {
        /// Item index
        index: usize,
        /// The click hit the item's overlay icon strip
        #[serde(default)]
        on_overlay_icons: bool,
    },
    /// Lightbox close control
    LightboxClose,
    /// Lightbox backdrop, outside the content
    LightboxBackdrop,
    /// Lightbox content
    LightboxContent,
    /// Gallery previous control
    LightboxPrevious,
    /// Gallery next control
    LightboxNext,
    /// Big centered play button
    VideoPlayButton,
    /// Play/pause control
    VideoPlayPause,
    /// Mute control
    VideoMute,
    /// Fullscreen control
    VideoFullscreen,
    /// Anywhere else
    Elsewhere,
}

impl ClickTarget {
    /// Whether the click counts as outside the menu and its toggle.
    #[must_use]
    pub const fn is_outside_menu(&self) -> bool {
        !matches!(self, Self::MenuToggle | Self::NavLink { .. })
    }
}

/// One host signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewEvent {
    /// `DOMContentLoaded`: elements are registered
    DocumentReady,
    /// `load`: body marker and hero entrance
    WindowLoad,
    /// Window scrolled
    Scroll {
        /// `window.scrollY` (px)
        y: f64,
    },
    /// Intersection observer callback
    Intersections {
        /// Observed changes
        entries: Vec<IntersectionEntry>,
    },
    /// Click
    Click {
        /// Where it landed
        target: ClickTarget,
    },
    /// `keydown`
    KeyDown {
        /// `KeyboardEvent.key`
        key: Key,
    },
    /// Media element event
    Media {
        /// The event
        event: MediaEvent,
    },
    /// `mousemove`
    PointerMove {
        /// Client X (px)
        x: f64,
        /// Client Y (px)
        y: f64,
    },
    /// Contact form submitted
    FormSubmit {
        /// Email field value
        email: String,
        /// Message field value
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::RevealKey;

    #[test]
    fn test_event_json_shapes() {
        let events: Vec<ViewEvent> = serde_json::from_str(
            r#"[
                {"type": "document_ready"},
                {"type": "scroll", "y": 850},
                {"type": "click", "target": {"on": "filter_button", "index": 1}},
                {"type": "click", "target": {"on": "grid_item", "index": 0}},
                {"type": "key_down", "key": "Escape"},
                {"type": "media", "event": {"kind": "volume_change", "muted": true}},
                {"type": "intersections", "entries": [
                    {"target": {"kind": "grid_item", "index": 2}, "is_intersecting": true}
                ]}
            ]"#,
        )
        .unwrap();

        assert_eq!(events[1], ViewEvent::Scroll { y: 850.0 });
        assert_eq!(
            events[3],
            ViewEvent::Click {
                target: ClickTarget::GridItem {
                    index: 0,
                    on_overlay_icons: false
                }
            }
        );
        assert_eq!(events[4], ViewEvent::KeyDown { key: Key::Escape });
        let ViewEvent::Intersections { entries } = &events[6] else {
            panic!("expected intersections");
        };
        assert_eq!(entries[0].target, RevealKey::GridItem(2));
    }

    #[test]
    fn test_outside_menu() {
        assert!(!ClickTarget::MenuToggle.is_outside_menu());
        assert!(!ClickTarget::NavLink { index: 0 }.is_outside_menu());
        assert!(ClickTarget::Elsewhere.is_outside_menu());
        assert!(ClickTarget::FilterButton { index: 0 }.is_outside_menu());
    }
}
