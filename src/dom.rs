//! Presentation directives and the adapter seam that applies them.
//!
//! The controller never touches a document directly. Every observable
//! effect is a [`Directive`]; a [`DomSink`] applies directives to whatever
//! the host has (a real DOM through bindings, a test double, a log).
//! [`DocumentModel`] is the in-memory sink used by tests and the CLI.

use crate::forms::FormField;
use crate::lightbox::LightboxView;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Addressable element on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "element", content = "index", rename_all = "snake_case")]
pub enum ElementRef {
    /// Navigation link by index
    NavLink(usize),
    /// Filter button by index
    FilterButton(usize),
    /// Grid item by index
    GridItem(usize),
    /// Non-grid reveal target by index
    RevealTarget(usize),
    /// Hero element animated in on window load, by index
    HeroElement(usize),
    /// Hamburger toggle
    MenuToggle,
    /// Collapsible nav menu
    NavMenu,
    /// Fixed navbar
    Navbar,
    /// Document body
    Body,
    /// Hero section
    Hero,
    /// Hero image
    HeroImage,
    /// Hero image wrapper (perspective entrance)
    HeroImageWrapper,
    /// Hero badge
    HeroBadge,
    /// Animated hero background
    HeroBackground,
    /// Gradient orb behind the hero
    GradientOrb,
    /// Element whose text the typewriter writes
    TypewriterText,
    /// Poster image over the hero video
    VideoPoster,
    /// Play/pause control
    PlayPauseButton,
    /// Mute control
    MuteButton,
}

/// Class-style marker toggled on elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    /// `active`: current nav link, selected filter, open menu
    Active,
    /// `fade-in`: registered for scroll reveal
    FadeIn,
    /// `visible`: revealed
    Visible,
    /// `scrolled`: navbar past its offset
    Scrolled,
    /// `loaded`: body after window load
    Loaded,
}

impl Marker {
    /// Class name used in markup.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::FadeIn => "fade-in",
            Self::Visible => "visible",
            Self::Scrolled => "scrolled",
            Self::Loaded => "loaded",
        }
    }
}

/// Button iconography for the video controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    /// `fa-play`
    Play,
    /// `fa-pause`
    Pause,
    /// `fa-volume-up`
    VolumeUp,
    /// `fa-volume-mute`
    VolumeMute,
}

/// Command for the host's media element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaCommand {
    /// User-initiated `play()`
    Play,
    /// `play()` attempted without a user gesture; may be rejected
    Autoplay,
    /// `pause()`
    Pause,
    /// Set `muted`
    SetMuted(bool),
    /// `requestFullscreen()` (or a vendor-prefixed fallback)
    RequestFullscreen,
    /// `exitFullscreen()` (or a vendor-prefixed fallback)
    ExitFullscreen,
}

/// One observable presentation change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Directive {
    /// Add a marker class
    AddMarker {
        /// Element
        target: ElementRef,
        /// Marker
        marker: Marker,
    },
    /// Remove a marker class
    RemoveMarker {
        /// Element
        target: ElementRef,
        /// Marker
        marker: Marker,
    },
    /// Opacity/transform phase: fully shown or faded out
    SetOpacity {
        /// Element
        target: ElementRef,
        /// `true` for opacity 1
        opaque: bool,
    },
    /// Occupancy phase: `display` default or `none`
    SetDisplay {
        /// Element
        target: ElementRef,
        /// `false` for `display: none`
        occupies: bool,
    },
    /// Reveal animation delay
    SetAnimationDelay {
        /// Element
        target: ElementRef,
        /// Delay (ms)
        delay_ms: u64,
    },
    /// CSS transform
    SetTransform {
        /// Element
        target: ElementRef,
        /// Transform value
        transform: String,
    },
    /// Text content
    SetText {
        /// Element
        target: ElementRef,
        /// Text
        text: String,
    },
    /// Button icon
    SetIcon {
        /// Element
        target: ElementRef,
        /// Icon
        icon: Icon,
    },
    /// Body `overflow: hidden` on or off
    SetScrollLock {
        /// Locked
        locked: bool,
    },
    /// Insert the lightbox overlay
    MountLightbox {
        /// Overlay content
        view: LightboxView,
    },
    /// Remove the lightbox overlay
    UnmountLightbox,
    /// Smooth-scroll to a section
    ScrollIntoView {
        /// Section id
        section_id: String,
    },
    /// Leave the page
    Navigate {
        /// Destination URL
        url: String,
    },
    /// Append a form error message
    ShowFormError {
        /// Message handle
        id: u64,
        /// Field the message is attached to
        field: FormField,
        /// Message text
        message: String,
    },
    /// Remove a form error message
    RemoveFormError {
        /// Message handle
        id: u64,
    },
    /// Add a mouse trail dot
    SpawnTrailDot {
        /// Dot handle
        id: u64,
        /// Client X (px)
        x: f64,
        /// Client Y (px)
        y: f64,
    },
    /// Remove a mouse trail dot
    RemoveTrailDot {
        /// Dot handle
        id: u64,
    },
    /// Drive the media element
    Media {
        /// Command
        command: MediaCommand,
    },
}

/// Applies directives to a document.
pub trait DomSink {
    /// Applies one directive.
    fn apply(&mut self, directive: &Directive);

    /// Applies a batch in order.
    fn apply_all(&mut self, directives: &[Directive]) {
        for directive in directives {
            self.apply(directive);
        }
    }
}

/// In-memory document state reconstructed from directives.
#[derive(Debug, Clone, Default)]
pub struct DocumentModel {
    markers: BTreeSet<(ElementRef, Marker)>,
    opacity: BTreeMap<ElementRef, bool>,
    display: BTreeMap<ElementRef, bool>,
    animation_delays: BTreeMap<ElementRef, u64>,
    transforms: BTreeMap<ElementRef, String>,
    texts: BTreeMap<ElementRef, String>,
    icons: BTreeMap<ElementRef, Icon>,
    scroll_locked: bool,
    overlays: Vec<LightboxView>,
    scrolled_to: Vec<String>,
    navigations: Vec<String>,
    form_errors: BTreeMap<u64, (FormField, String)>,
    trail_dots: BTreeSet<u64>,
    media_commands: Vec<MediaCommand>,
}

impl DocumentModel {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the element carries the marker.
    #[must_use]
    pub fn has_marker(&self, target: ElementRef, marker: Marker) -> bool {
        self.markers.contains(&(target, marker))
    }

    /// Elements carrying the marker.
    #[must_use]
    pub fn elements_with(&self, marker: Marker) -> Vec<ElementRef> {
        self.markers
            .iter()
            .filter(|(_, m)| *m == marker)
            .map(|(target, _)| *target)
            .collect()
    }

    /// Opacity phase, `true` when never touched.
    #[must_use]
    pub fn is_opaque(&self, target: ElementRef) -> bool {
        self.opacity.get(&target).copied().unwrap_or(true)
    }

    /// Occupancy phase, `true` when never touched.
    #[must_use]
    pub fn occupies_layout(&self, target: ElementRef) -> bool {
        self.display.get(&target).copied().unwrap_or(true)
    }

    /// Reveal animation delay, if one was set.
    #[must_use]
    pub fn animation_delay(&self, target: ElementRef) -> Option<u64> {
        self.animation_delays.get(&target).copied()
    }

    /// Current transform, if one was set.
    #[must_use]
    pub fn transform(&self, target: ElementRef) -> Option<&str> {
        self.transforms.get(&target).map(String::as_str)
    }

    /// Current text, if it was written.
    #[must_use]
    pub fn text(&self, target: ElementRef) -> Option<&str> {
        self.texts.get(&target).map(String::as_str)
    }

    /// Current icon, if one was set.
    #[must_use]
    pub fn icon(&self, target: ElementRef) -> Option<Icon> {
        self.icons.get(&target).copied()
    }

    /// Whether body scrolling is locked.
    #[must_use]
    pub const fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// Number of lightbox overlays in the document.
    #[must_use]
    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    /// The topmost lightbox overlay.
    #[must_use]
    pub fn overlay(&self) -> Option<&LightboxView> {
        self.overlays.last()
    }

    /// Sections scrolled to, oldest first.
    #[must_use]
    pub fn scrolled_to(&self) -> &[String] {
        &self.scrolled_to
    }

    /// URLs navigated to, oldest first.
    #[must_use]
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    /// Form error messages currently shown.
    #[must_use]
    pub fn form_errors(&self) -> Vec<(FormField, &str)> {
        self.form_errors
            .values()
            .map(|(field, message)| (*field, message.as_str()))
            .collect()
    }

    /// Number of mouse trail dots on screen.
    #[must_use]
    pub fn trail_len(&self) -> usize {
        self.trail_dots.len()
    }

    /// Media commands issued, oldest first.
    #[must_use]
    pub fn media_commands(&self) -> &[MediaCommand] {
        &self.media_commands
    }
}

impl DomSink for DocumentModel {
    fn apply(&mut self, directive: &Directive) {
        match directive {
            Directive::AddMarker { target, marker } => {
                self.markers.insert((*target, *marker));
            }
            Directive::RemoveMarker { target, marker } => {
                self.markers.remove(&(*target, *marker));
            }
            Directive::SetOpacity { target, opaque } => {
                self.opacity.insert(*target, *opaque);
            }
            Directive::SetDisplay { target, occupies } => {
                self.display.insert(*target, *occupies);
            }
            Directive::SetAnimationDelay { target, delay_ms } => {
                self.animation_delays.insert(*target, *delay_ms);
            }
            Directive::SetTransform { target, transform } => {
                self.transforms.insert(*target, transform.clone());
            }
            Directive::SetText { target, text } => {
                self.texts.insert(*target, text.clone());
            }
            Directive::SetIcon { target, icon } => {
                self.icons.insert(*target, *icon);
            }
            Directive::SetScrollLock { locked } => self.scroll_locked = *locked,
            Directive::MountLightbox { view } => self.overlays.push(view.clone()),
            Directive::UnmountLightbox => {
                self.overlays.pop();
            }
            Directive::ScrollIntoView { section_id } => self.scrolled_to.push(section_id.clone()),
            Directive::Navigate { url } => self.navigations.push(url.clone()),
            Directive::ShowFormError { id, field, message } => {
                self.form_errors.insert(*id, (*field, message.clone()));
            }
            Directive::RemoveFormError { id } => {
                self.form_errors.remove(id);
            }
            Directive::SpawnTrailDot { id, .. } => {
                self.trail_dots.insert(*id);
            }
            Directive::RemoveTrailDot { id } => {
                self.trail_dots.remove(id);
            }
            Directive::Media { command } => self.media_commands.push(*command),
        }
    }
}
