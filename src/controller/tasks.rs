//! Deferred work queued on the scheduler.

use serde::Serialize;

/// A task the controller runs after a delay.
///
/// Tasks carry indices, not snapshots: when one fires it re-reads the
/// current state and does nothing if that state has moved on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "task", rename_all = "snake_case")]
pub enum Deferred {
    /// Second phase of showing a grid item: opacity back to 1
    FadeInItem {
        /// Grid item index
        index: usize,
        /// Transition the task belongs to
        seq: u64,
    },
    /// Second phase of hiding a grid item: stop occupying layout
    RemoveItemOccupancy {
        /// Grid item index
        index: usize,
        /// Transition the task belongs to
        seq: u64,
    },
    /// Begin typing the typewriter text
    StartTypewriter,
    /// Type the next typewriter character
    TypeNextChar,
    /// Fade one hero element in after window load
    RevealHeroElement {
        /// Hero element index
        index: usize,
    },
    /// Hide the hero image wrapper before its entrance
    HideHeroImage,
    /// Play the hero image wrapper entrance
    RevealHeroImage,
    /// Remove an expired mouse trail dot
    ExpireTrailDot {
        /// Dot handle
        id: u64,
    },
    /// Remove a contact-form error message
    RemoveFormError {
        /// Message handle
        id: u64,
    },
}
