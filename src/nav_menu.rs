//! Mobile navigation menu behind the hamburger toggle.

use crate::dom::{Directive, ElementRef, Marker};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How the menu reacts beyond the toggle and link clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MenuBehavior {
    /// Lock body scrolling while open
    #[serde(default)]
    pub lock_scroll: bool,
    /// Close on clicks outside the toggle and the menu
    #[serde(default)]
    pub close_on_outside_click: bool,
    /// Close on Escape
    #[serde(default)]
    pub close_on_escape: bool,
}

/// Open/closed state of the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavMenu {
    behavior: MenuBehavior,
    present: bool,
    open: bool,
}

impl NavMenu {
    /// Creates a closed menu. When the page has no toggle every operation
    /// is a no-op.
    #[must_use]
    pub const fn new(behavior: MenuBehavior, present: bool) -> Self {
        Self {
            behavior,
            present,
            open: false,
        }
    }

    /// Whether the menu is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Configured behavior.
    #[must_use]
    pub const fn behavior(&self) -> &MenuBehavior {
        &self.behavior
    }

    /// Hamburger click.
    pub fn toggle(&mut self) -> Vec<Directive> {
        if !self.present {
            return Vec::new();
        }
        self.set_open(!self.open)
    }

    /// Closes the menu after a click on one of its links.
    pub fn close(&mut self) -> Vec<Directive> {
        if !self.open {
            return Vec::new();
        }
        self.set_open(false)
    }

    /// A click that landed outside the toggle and the menu.
    pub fn outside_click(&mut self) -> Vec<Directive> {
        if !self.behavior.close_on_outside_click {
            return Vec::new();
        }
        self.close()
    }

    /// Escape pressed.
    pub fn escape(&mut self) -> Vec<Directive> {
        if !self.behavior.close_on_escape {
            return Vec::new();
        }
        self.close()
    }

    fn set_open(&mut self, open: bool) -> Vec<Directive> {
        self.open = open;
        debug!(open, "nav menu toggled");

        let mut directives: Vec<Directive> = [ElementRef::MenuToggle, ElementRef::NavMenu]
            .into_iter()
            .map(|target| {
                if open {
                    Directive::AddMarker {
                        target,
                        marker: Marker::Active,
                    }
                } else {
                    Directive::RemoveMarker {
                        target,
                        marker: Marker::Active,
                    }
                }
            })
            .collect();

        if self.behavior.lock_scroll {
            directives.push(Directive::SetScrollLock { locked: open });
        }
        directives
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCKING: MenuBehavior = MenuBehavior {
        lock_scroll: true,
        close_on_outside_click: true,
        close_on_escape: true,
    };

    #[test]
    fn test_toggle_opens_and_closes() {
        let mut menu = NavMenu::new(MenuBehavior::default(), true);
        assert_eq!(menu.toggle().len(), 2);
        assert!(menu.is_open());
        menu.toggle();
        assert!(!menu.is_open());
    }

    #[test]
    fn test_scroll_lock_follows_menu() {
        let mut menu = NavMenu::new(LOCKING, true);
        let directives = menu.toggle();
        assert_eq!(directives[2], Directive::SetScrollLock { locked: true });
        let directives = menu.escape();
        assert_eq!(directives[2], Directive::SetScrollLock { locked: false });
    }

    #[test]
    fn test_outside_click_and_escape_respect_behavior() {
        let mut menu = NavMenu::new(MenuBehavior::default(), true);
        menu.toggle();
        assert!(menu.outside_click().is_empty());
        assert!(menu.escape().is_empty());
        assert!(menu.is_open());
        assert_eq!(menu.close().len(), 2);
    }

    #[test]
    fn test_close_when_closed_is_noop() {
        let mut menu = NavMenu::new(LOCKING, true);
        assert!(menu.close().is_empty());
        assert!(menu.outside_click().is_empty());
    }

    #[test]
    fn test_missing_toggle() {
        let mut menu = NavMenu::new(LOCKING, false);
        assert!(menu.toggle().is_empty());
        assert!(!menu.is_open());
    }
}
