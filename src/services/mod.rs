//! Service layer for the three core trackers.
//!
//! Each service owns one slice of view state and turns signals into
//! directives. The controller wires them to events and the scheduler.

pub mod filter;
pub mod nav_tracker;
pub mod reveal;
pub mod throttle;

// Re-export commonly used types and functions
pub use filter::{FilterController, FilterOptions};
pub use nav_tracker::{current_section, NavTracker};
pub use reveal::{intersection_ratio, IntersectionEntry, RevealKey, RevealOptions, RevealTracker};
pub use throttle::Throttle;
