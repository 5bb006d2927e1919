//! Centralized keyboard shortcut system.
//!
//! Maps DOM `keydown` keys to actions per context. A context is the part of
//! the page that is listening: the lightbox overlay, the mobile menu, or the
//! video player. Several contexts can react to the same key.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Context name for the open lightbox.
pub const CONTEXT_LIGHTBOX: &str = "lightbox";
/// Context name for the open mobile menu.
pub const CONTEXT_MENU: &str = "menu";
/// Context name for the hero video player.
pub const CONTEXT_VIDEO: &str = "video";

/// All possible keyboard actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // === OVERLAYS ===
    CloseLightbox,
    PreviousItem,
    NextItem,
    CloseMenu,

    // === VIDEO ===
    TogglePlayPause,
    ToggleMute,
    ToggleFullscreen,
}

impl Action {
    /// Stable action id, used in logs.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::CloseLightbox => "close_lightbox",
            Self::PreviousItem => "previous_item",
            Self::NextItem => "next_item",
            Self::CloseMenu => "close_menu",
            Self::TogglePlayPause => "toggle_play_pause",
            Self::ToggleMute => "toggle_mute",
            Self::ToggleFullscreen => "toggle_fullscreen",
        }
    }
}

/// A key as reported by `KeyboardEvent.key`.
///
/// Printable keys keep their case: `k` and `K` are different keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Key {
    /// `Escape`
    Escape,
    /// The space bar (`" "`)
    Space,
    /// `Enter`
    Enter,
    /// `ArrowLeft`
    ArrowLeft,
    /// `ArrowRight`
    ArrowRight,
    /// Any other single printable character
    Char(char),
    /// A named key this crate has no use for
    Unidentified,
}

impl Key {
    /// Parses a `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom(value: &str) -> Self {
        match value {
            "Escape" | "Esc" => Self::Escape,
            " " | "Space" | "Spacebar" => Self::Space,
            "Enter" => Self::Enter,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            _ => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Unidentified,
                }
            }
        }
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Self::from_dom(&value)
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Escape => write!(f, "Escape"),
            Self::Space => write!(f, " "),
            Self::Enter => write!(f, "Enter"),
            Self::ArrowLeft => write!(f, "ArrowLeft"),
            Self::ArrowRight => write!(f, "ArrowRight"),
            Self::Char(c) => write!(f, "{c}"),
            Self::Unidentified => write!(f, "Unidentified"),
        }
    }
}

/// Shortcut registry mapping keys to actions per context.
///
/// This is the single source of truth for keyboard handling on the page.
pub struct ShortcutRegistry {
    /// Maps (context, key) to Action
    bindings: HashMap<(String, Key), Action>,
}

impl ShortcutRegistry {
    /// Creates a registry with the default bindings.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            bindings: HashMap::new(),
        };

        registry.register_overlay_shortcuts();
        registry.register_video_shortcuts();
        registry
    }

    fn register_overlay_shortcuts(&mut self) {
        self.register(CONTEXT_LIGHTBOX, Key::Escape, Action::CloseLightbox);
        self.register(CONTEXT_LIGHTBOX, Key::ArrowLeft, Action::PreviousItem);
        self.register(CONTEXT_LIGHTBOX, Key::ArrowRight, Action::NextItem);

        self.register(CONTEXT_MENU, Key::Escape, Action::CloseMenu);
    }

    fn register_video_shortcuts(&mut self) {
        let ctx = CONTEXT_VIDEO;

        self.register(ctx, Key::Space, Action::TogglePlayPause);
        self.register(ctx, Key::Char('k'), Action::TogglePlayPause);
        self.register(ctx, Key::Char('m'), Action::ToggleMute);
        self.register(ctx, Key::Char('f'), Action::ToggleFullscreen);
    }

    fn register(&mut self, context: &str, key: Key, action: Action) {
        self.bindings.insert((context.to_string(), key), action);
    }

    /// Looks up the action bound to `key` in `context`.
    #[must_use]
    pub fn lookup(&self, context: &str, key: Key) -> Option<Action> {
        self.bindings.get(&(context.to_string(), key)).copied()
    }

    /// Whether `key` triggers `action` in `context`.
    #[must_use]
    pub fn matches(&self, context: &str, key: Key, action: Action) -> bool {
        self.lookup(context, key) == Some(action)
    }
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::new()
    }
}
