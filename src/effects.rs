//! Cosmetic effects: parallax, navbar marker, typewriter, hero entrance and
//! mouse trail.
//!
//! None of these carry state the rest of the controller depends on; they
//! only emit directives.

use crate::constants::{MOUSE_TRAIL_LIFETIME_MS, MOUSE_TRAIL_MAX};
use crate::dom::{Directive, ElementRef, Marker};
use crate::models::PageHooks;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Element a parallax layer moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParallaxTarget {
    /// The hero section
    Hero,
    /// The animated hero background
    HeroBackground,
    /// The gradient orb (centered with `translate(-50%, -50%)`)
    GradientOrb,
    /// The hero image
    HeroImage,
    /// The hero badge
    HeroBadge,
}

impl ParallaxTarget {
    /// Element addressed by directives.
    #[must_use]
    pub const fn element(self) -> ElementRef {
        match self {
            Self::Hero => ElementRef::Hero,
            Self::HeroBackground => ElementRef::HeroBackground,
            Self::GradientOrb => ElementRef::GradientOrb,
            Self::HeroImage => ElementRef::HeroImage,
            Self::HeroBadge => ElementRef::HeroBadge,
        }
    }

    /// Whether the page has this element.
    #[must_use]
    pub const fn is_present(self, hooks: &PageHooks) -> bool {
        match self {
            Self::Hero => hooks.hero,
            Self::HeroBackground => hooks.hero_background,
            Self::GradientOrb => hooks.gradient_orb,
            Self::HeroImage => hooks.hero_image,
            Self::HeroBadge => hooks.hero_badge,
        }
    }
}

/// `rotateY(base + factor * scroll)` in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotateY {
    /// Angle at scroll 0
    pub base_deg: f64,
    /// Degrees per scrolled pixel
    pub factor: f64,
}

/// One scroll-driven transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParallaxLayer {
    /// Element moved
    pub target: ParallaxTarget,
    /// `translateY` per scrolled pixel; 0 omits the translation
    #[serde(default)]
    pub translate_y: f64,
    /// Scale growth per scrolled pixel; 0 omits the scale
    #[serde(default)]
    pub scale: f64,
    /// Optional Y rotation
    #[serde(default)]
    pub rotate_y: Option<RotateY>,
    /// Only update while the scroll offset is under one viewport height
    #[serde(default)]
    pub first_screen_only: bool,
}

impl ParallaxLayer {
    /// Layer translating `target` by `factor` per pixel.
    #[must_use]
    pub const fn translate(target: ParallaxTarget, factor: f64) -> Self {
        Self {
            target,
            translate_y: factor,
            scale: 0.0,
            rotate_y: None,
            first_screen_only: false,
        }
    }

    /// Adds a scale component.
    #[must_use]
    pub const fn with_scale(mut self, factor: f64) -> Self {
        self.scale = factor;
        self
    }

    /// Adds a Y rotation.
    #[must_use]
    pub const fn with_rotate_y(mut self, base_deg: f64, factor: f64) -> Self {
        self.rotate_y = Some(RotateY { base_deg, factor });
        self
    }

    /// Restricts updates to the first screen.
    #[must_use]
    pub const fn first_screen_only(mut self) -> Self {
        self.first_screen_only = true;
        self
    }

    /// CSS transform at `scroll_y`, or `None` when the layer does not apply.
    #[must_use]
    pub fn transform(&self, scroll_y: f64, viewport_height: f64) -> Option<String> {
        if self.first_screen_only && scroll_y >= viewport_height {
            return None;
        }

        let mut parts = Vec::new();
        if self.target == ParallaxTarget::GradientOrb {
            parts.push("translate(-50%, -50%)".to_string());
        }
        if self.translate_y != 0.0 {
            parts.push(format!("translateY({}px)", scroll_y * self.translate_y));
        }
        if self.scale != 0.0 {
            parts.push(format!("scale({})", 1.0 + scroll_y * self.scale));
        }
        if let Some(rotate) = self.rotate_y {
            parts.push(format!(
                "rotateY({}deg)",
                rotate.base_deg + scroll_y * rotate.factor
            ));
        }
        Some(parts.join(" "))
    }
}

/// Transforms for every layer whose element is on the page.
#[must_use]
pub fn parallax(
    layers: &[ParallaxLayer],
    hooks: &PageHooks,
    scroll_y: f64,
    viewport_height: f64,
) -> Vec<Directive> {
    layers
        .iter()
        .filter(|layer| layer.target.is_present(hooks))
        .filter_map(|layer| {
            layer
                .transform(scroll_y, viewport_height)
                .map(|transform| Directive::SetTransform {
                    target: layer.target.element(),
                    transform,
                })
        })
        .collect()
}

/// The navbar's `scrolled` marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavbarMarker {
    offset: f64,
    scrolled: bool,
}

impl NavbarMarker {
    /// Marker applied once the scroll offset passes `offset`.
    #[must_use]
    pub const fn new(offset: f64) -> Self {
        Self {
            offset,
            scrolled: false,
        }
    }

    /// Whether the marker is on.
    #[must_use]
    pub const fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Updates the marker; emits only on change.
    pub fn update(&mut self, scroll_y: f64) -> Option<Directive> {
        let scrolled = scroll_y > self.offset;
        if scrolled == self.scrolled {
            return None;
        }
        self.scrolled = scrolled;
        let target = ElementRef::Navbar;
        let marker = Marker::Scrolled;
        Some(if scrolled {
            Directive::AddMarker { target, marker }
        } else {
            Directive::RemoveMarker { target, marker }
        })
    }
}

/// Typewriter timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypewriterConfig {
    /// Delay between characters (ms)
    pub speed_ms: u64,
    /// Delay before typing starts (ms)
    #[serde(default)]
    pub start_delay_ms: u64,
}

/// Types a text one character per tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typewriter {
    text: Vec<char>,
    typed: usize,
}

impl Typewriter {
    /// Typewriter for `text`, nothing typed yet.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            text: text.chars().collect(),
            typed: 0,
        }
    }

    /// Whether the whole text is on screen.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.typed >= self.text.len()
    }

    /// Text typed so far.
    #[must_use]
    pub fn typed(&self) -> String {
        self.text[..self.typed].iter().collect()
    }

    /// Clears the element and types the first character.
    pub fn start(&mut self) -> Directive {
        self.typed = 0;
        self.tick().unwrap_or_else(|| self.text_directive())
    }

    /// Types the next character; `None` once done.
    pub fn tick(&mut self) -> Option<Directive> {
        if self.is_done() {
            return None;
        }
        self.typed += 1;
        Some(self.text_directive())
    }

    fn text_directive(&self) -> Directive {
        Directive::SetText {
            target: ElementRef::TypewriterText,
            text: self.typed(),
        }
    }
}

/// Fades hero element `index` out ahead of its staggered entrance.
#[must_use]
pub fn hide_hero_element(index: usize) -> Directive {
    Directive::SetOpacity {
        target: ElementRef::HeroElement(index),
        opaque: false,
    }
}

/// Stagger delay for hero element `index`.
#[must_use]
pub const fn hero_delay(index: usize, stagger_ms: u64) -> u64 {
    stagger_ms.saturating_mul(index as u64)
}

/// Bounded trail of dots following the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MouseTrail {
    max_len: usize,
    next_id: u64,
    dots: VecDeque<u64>,
}

impl Default for MouseTrail {
    fn default() -> Self {
        Self::new(MOUSE_TRAIL_MAX)
    }
}

impl MouseTrail {
    /// Trail holding at most `max_len` dots.
    #[must_use]
    pub const fn new(max_len: usize) -> Self {
        Self {
            max_len,
            next_id: 1,
            dots: VecDeque::new(),
        }
    }

    /// Dots on screen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dots.len()
    }

    /// Whether the trail is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    /// How long each dot lives (ms).
    #[must_use]
    pub const fn lifetime_ms(&self) -> u64 {
        MOUSE_TRAIL_LIFETIME_MS
    }

    /// Adds a dot at the pointer, evicting the oldest beyond the limit.
    ///
    /// Returns the new dot's id and the directives to apply.
    pub fn spawn(&mut self, x: f64, y: f64) -> (u64, Vec<Directive>) {
        let id = self.next_id;
        self.next_id += 1;
        self.dots.push_back(id);

        let mut directives = vec![Directive::SpawnTrailDot { id, x, y }];
        while self.dots.len() > self.max_len {
            if let Some(oldest) = self.dots.pop_front() {
                directives.push(Directive::RemoveTrailDot { id: oldest });
            }
        }
        (id, directives)
    }

    /// Removes an expired dot if it is still on screen.
    pub fn expire(&mut self, id: u64) -> Option<Directive> {
        let position = self.dots.iter().position(|&dot| dot == id)?;
        self.dots.remove(position);
        Some(Directive::RemoveTrailDot { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallax_transforms() {
        let hero = ParallaxLayer::translate(ParallaxTarget::Hero, 0.5);
        assert_eq!(hero.transform(100.0, 800.0).unwrap(), "translateY(50px)");

        let orb = ParallaxLayer::translate(ParallaxTarget::GradientOrb, 0.0).with_scale(0.25);
        assert_eq!(
            orb.transform(2.0, 800.0).unwrap(),
            "translate(-50%, -50%) scale(1.5)"
        );

        let image = ParallaxLayer::translate(ParallaxTarget::HeroImage, 0.4)
            .with_scale(0.0003)
            .with_rotate_y(-5.0, 0.01)
            .first_screen_only();
        assert_eq!(
            image.transform(0.0, 800.0).unwrap(),
            "translateY(0px) scale(1) rotateY(-5deg)"
        );
        assert!(image.transform(800.0, 800.0).is_none());
    }

    #[test]
    fn test_parallax_skips_missing_elements() {
        let layers = [
            ParallaxLayer::translate(ParallaxTarget::Hero, 0.5),
            ParallaxLayer::translate(ParallaxTarget::HeroBadge, 0.2),
        ];
        let hooks = PageHooks {
            hero: true,
            ..PageHooks::default()
        };
        let directives = parallax(&layers, &hooks, 10.0, 800.0);
        assert_eq!(directives.len(), 1);
    }

    #[test]
    fn test_navbar_marker_changes_only() {
        let mut navbar = NavbarMarker::new(50.0);
        assert!(navbar.update(50.0).is_none());
        assert!(navbar.update(51.0).is_some());
        assert!(navbar.update(200.0).is_none());
        assert!(navbar.is_scrolled());
        assert!(matches!(
            navbar.update(0.0),
            Some(Directive::RemoveMarker { .. })
        ));
    }

    #[test]
    fn test_typewriter() {
        let mut typewriter = Typewriter::new("Hi!");
        assert_eq!(
            typewriter.start(),
            Directive::SetText {
                target: ElementRef::TypewriterText,
                text: "H".to_string()
            }
        );
        typewriter.tick();
        typewriter.tick();
        assert!(typewriter.is_done());
        assert_eq!(typewriter.typed(), "Hi!");
        assert!(typewriter.tick().is_none());
    }

    #[test]
    fn test_typewriter_empty_text_clears() {
        let mut typewriter = Typewriter::new("");
        assert_eq!(
            typewriter.start(),
            Directive::SetText {
                target: ElementRef::TypewriterText,
                text: String::new()
            }
        );
        assert!(typewriter.is_done());
    }

    #[test]
    fn test_mouse_trail_is_bounded() {
        let mut trail = MouseTrail::new(3);
        for i in 0..5 {
            trail.spawn(f64::from(i), 0.0);
        }
        assert_eq!(trail.len(), 3);
        // Dots 1 and 2 were evicted already.
        assert!(trail.expire(1).is_none());
        assert!(trail.expire(5).is_some());
        assert_eq!(trail.len(), 2);
    }

    #[test]
    fn test_hero_delay() {
        assert_eq!(hero_delay(0, 200), 0);
        assert_eq!(hero_delay(3, 200), 600);
    }
}
