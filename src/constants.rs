//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the default timings shared by the
//! page variants.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Folioview";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "folioview";

/// Name of the directory holding the config file under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "Folioview";

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "FOLIOVIEW_CONFIG_DIR";

/// Filter tag that matches every grid item.
pub const FILTER_ALL: &str = "all";

/// Distance above a section's top at which it becomes current (px).
pub const DEFAULT_SCROLL_MARGIN: f64 = 200.0;

/// Leading-edge throttle window for scroll recomputation (ms).
pub const DEFAULT_SCROLL_THROTTLE_MS: u64 = 100;

/// Grace period before a filtered-out item stops occupying layout (ms).
pub const DEFAULT_FILTER_HIDE_DELAY_MS: u64 = 300;

/// Fraction of an element that must be inside the root to count as entered.
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.1;

/// Delay between consecutive hero elements on window load (ms).
pub const HERO_STAGGER_MS: u64 = 200;

/// Default delay between typed characters (ms).
pub const TYPEWRITER_SPEED_MS: u64 = 70;

/// How long a contact-form error stays on screen (ms).
pub const FORM_ERROR_DURATION_MS: u64 = 3000;

/// Maximum number of dots in the mouse trail.
pub const MOUSE_TRAIL_MAX: usize = 20;

/// Lifetime of a single mouse trail dot (ms).
pub const MOUSE_TRAIL_LIFETIME_MS: u64 = 1000;
