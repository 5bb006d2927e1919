//! One-shot scroll reveal.
//!
//! Grid items and reveal targets are registered when the document is ready
//! (they get the `fade-in` marker). The first time one of them intersects
//! the root it gains `visible` and is never hidden again by scrolling.
//!
//! Intersections come either from the host (an `IntersectionObserver`
//! callback forwarded as [`IntersectionEntry`] values) or from
//! [`RevealTracker::compute_entries`], which derives them from element
//! rectangles at a scroll offset.

use crate::dom::{Directive, ElementRef, Marker};
use crate::models::{Page, Rect, RootMargin, Viewport};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Intersection observer settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealOptions {
    /// Visible fraction needed to count as entered, `0.0..=1.0`
    pub threshold: f64,
    /// Margin applied to the viewport before intersecting
    pub root_margin: RootMargin,
    /// Per-index animation delay for grid items (ms); `None` disables stagger
    #[serde(default)]
    pub stagger_ms: Option<u64>,
}

/// Element an intersection entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum RevealKey {
    /// Grid item by index
    GridItem(usize),
    /// Reveal target by index
    Target(usize),
}

impl RevealKey {
    /// The element this key addresses.
    #[must_use]
    pub const fn element(self) -> ElementRef {
        match self {
            Self::GridItem(index) => ElementRef::GridItem(index),
            Self::Target(index) => ElementRef::RevealTarget(index),
        }
    }
}

/// One intersection observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntersectionEntry {
    /// Observed element
    pub target: RevealKey,
    /// Whether the element crossed into the root
    pub is_intersecting: bool,
}

/// Fraction of `element` inside `root`.
///
/// Zero-area elements count as fully inside when their top-left corner lies
/// within the root.
#[must_use]
pub fn intersection_ratio(element: &Rect, root: &Rect) -> f64 {
    if element.area() <= 0.0 {
        let inside = element.top >= root.top
            && element.top <= root.bottom()
            && element.left >= root.left
            && element.left <= root.right();
        return if inside { 1.0 } else { 0.0 };
    }

    element
        .intersection(root)
        .map_or(0.0, |overlap| overlap.area() / element.area())
}

/// Whether `element` has entered `root` under `threshold`.
///
/// At a zero threshold an element touching the root's edge counts as
/// entered, even though no area overlaps.
#[must_use]
pub fn has_entered(element: &Rect, root: &Rect, threshold: f64) -> bool {
    if threshold <= 0.0 {
        return element.intersection(root).is_some();
    }
    intersection_ratio(element, root) >= threshold
}

/// Registers elements for reveal and applies intersections to them.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealTracker {
    options: RevealOptions,
    observing: bool,
}

impl RevealTracker {
    /// Creates an idle tracker.
    #[must_use]
    pub const fn new(options: RevealOptions) -> Self {
        Self {
            options,
            observing: false,
        }
    }

    /// Whether elements have been registered.
    #[must_use]
    pub const fn is_observing(&self) -> bool {
        self.observing
    }

    /// Observer settings.
    #[must_use]
    pub const fn options(&self) -> &RevealOptions {
        &self.options
    }

    /// Registers every grid item and reveal target.
    ///
    /// Elements already marked visible in the page keep that state.
    pub fn observe(&mut self, page: &Page) -> Vec<Directive> {
        self.observing = true;

        let keys = (0..page.items.len())
            .map(RevealKey::GridItem)
            .chain((0..page.reveal_targets.len()).map(RevealKey::Target));

        let mut directives = Vec::new();
        for key in keys {
            let target = key.element();
            directives.push(Directive::AddMarker {
                target,
                marker: Marker::FadeIn,
            });
            if is_visible(page, key).unwrap_or(false) {
                directives.push(Directive::AddMarker {
                    target,
                    marker: Marker::Visible,
                });
            }
        }

        debug!(
            items = page.items.len(),
            targets = page.reveal_targets.len(),
            "registered reveal elements"
        );
        directives
    }

    /// The intersection root at a scroll offset.
    #[must_use]
    pub fn root(&self, viewport: &Viewport, scroll_y: f64) -> Rect {
        self.options.root_margin.apply(viewport.rect_at(scroll_y))
    }

    /// Entries for every not-yet-revealed element that has entered the root.
    ///
    /// Grid items out of layout (`display: none`) never intersect.
    #[must_use]
    pub fn compute_entries(&self, page: &Page, scroll_y: f64) -> Vec<IntersectionEntry> {
        if !self.observing {
            return Vec::new();
        }

        let root = self.root(&page.viewport, scroll_y);
        let threshold = self.options.threshold;

        let items = page
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                item.occupies_layout
                    && !item.is_visible
                    && has_entered(&item.rect, &root, threshold)
            })
            .map(|(index, _)| RevealKey::GridItem(index));
        let targets = page
            .reveal_targets
            .iter()
            .enumerate()
            .filter(|(_, target)| {
                !target.is_visible && has_entered(&target.rect, &root, threshold)
            })
            .map(|(index, _)| RevealKey::Target(index));

        items
            .chain(targets)
            .map(|target| IntersectionEntry {
                target,
                is_intersecting: true,
            })
            .collect()
    }

    /// Applies intersection entries, revealing elements that entered.
    ///
    /// Entries arriving before registration, for unknown elements, or with
    /// `is_intersecting == false` are ignored. Revealed elements stay
    /// revealed.
    pub fn apply(&self, page: &mut Page, entries: &[IntersectionEntry]) -> Vec<Directive> {
        if !self.observing {
            if !entries.is_empty() {
                debug!(count = entries.len(), "ignoring intersections before ready");
            }
            return Vec::new();
        }

        let mut directives = Vec::new();
        for entry in entries.iter().filter(|entry| entry.is_intersecting) {
            match entry.target {
                RevealKey::GridItem(index) => {
                    let Some(item) = page.items.get_mut(index) else {
                        debug!(index, "intersection for unknown grid item");
                        continue;
                    };
                    if item.is_visible {
                        continue;
                    }
                    item.is_visible = true;

                    if let Some(stagger) = self.options.stagger_ms {
                        let delay_ms = stagger.saturating_mul(index as u64);
                        item.reveal_delay_ms = Some(delay_ms);
                        directives.push(Directive::SetAnimationDelay {
                            target: ElementRef::GridItem(index),
                            delay_ms,
                        });
                    }
                }
                RevealKey::Target(index) => {
                    let Some(target) = page.reveal_targets.get_mut(index) else {
                        debug!(index, "intersection for unknown reveal target");
                        continue;
                    };
                    if target.is_visible {
                        continue;
                    }
                    target.is_visible = true;
                }
            }

            directives.push(Directive::AddMarker {
                target: entry.target.element(),
                marker: Marker::Visible,
            });
        }
        directives
    }
}

fn is_visible(page: &Page, key: RevealKey) -> Option<bool> {
    match key {
        RevealKey::GridItem(index) => page.items.get(index).map(|item| item.is_visible),
        RevealKey::Target(index) => page.reveal_targets.get(index).map(|t| t.is_visible),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GridItem, RevealTarget};

    fn options() -> RevealOptions {
        RevealOptions {
            threshold: 0.1,
            root_margin: RootMargin::bottom_inset(50.0),
            stagger_ms: Some(100),
        }
    }

    fn page() -> Page {
        Page {
            viewport: Viewport {
                width: 1000.0,
                height: 800.0,
            },
            items: vec![
                GridItem::new("photo", "A").with_rect(Rect::new(100.0, 0.0, 300.0, 300.0)),
                GridItem::new("photo", "B").with_rect(Rect::new(1500.0, 0.0, 300.0, 300.0)),
            ],
            reveal_targets: vec![RevealTarget::new("skills", Rect::new(2400.0, 0.0, 800.0, 200.0))],
            ..Page::default()
        }
    }

    #[test]
    fn test_intersection_ratio() {
        let root = Rect::new(0.0, 0.0, 100.0, 100.0);
        let half = Rect::new(50.0, 0.0, 100.0, 100.0);
        assert!((intersection_ratio(&half, &root) - 0.5).abs() < 1e-9);
        let outside = Rect::new(200.0, 0.0, 10.0, 10.0);
        assert_eq!(intersection_ratio(&outside, &root), 0.0);
        let point = Rect::new(10.0, 10.0, 0.0, 0.0);
        assert_eq!(intersection_ratio(&point, &root), 1.0);
    }

    #[test]
    fn test_threshold_and_root_margin() {
        let tracker = RevealTracker::new(options());
        let root = tracker.root(&Viewport::default(), 0.0);
        assert_eq!(root.bottom(), 750.0);

        // 25px of a 300px element inside the trimmed root: under 10%.
        let element = Rect::new(725.0, 0.0, 100.0, 300.0);
        assert!(!has_entered(&element, &root, 0.1));
        let element = Rect::new(700.0, 0.0, 100.0, 300.0);
        assert!(has_entered(&element, &root, 0.1));
    }

    #[test]
    fn test_zero_threshold_edge_contact() {
        let root = Rect::new(0.0, 0.0, 100.0, 100.0);
        let touching = Rect::new(100.0, 0.0, 100.0, 50.0);
        assert!(has_entered(&touching, &root, 0.0));
        assert!(!has_entered(&touching, &root, 0.1));
        let apart = Rect::new(101.0, 0.0, 100.0, 50.0);
        assert!(!has_entered(&apart, &root, 0.0));
    }

    #[test]
    fn test_items_out_of_layout_never_intersect() {
        let mut page = page();
        let mut tracker = RevealTracker::new(options());
        tracker.observe(&page);
        page.items[0].occupies_layout = false;

        let entries = tracker.compute_entries(&page, 0.0);
        assert!(entries.iter().all(|e| e.target != RevealKey::GridItem(0)));

        page.items[0].occupies_layout = true;
        let entries = tracker.compute_entries(&page, 0.0);
        assert!(entries.iter().any(|e| e.target == RevealKey::GridItem(0)));
    }

    #[test]
    fn test_entries_ignored_before_observe() {
        let mut page = page();
        let tracker = RevealTracker::new(options());
        let entries = [IntersectionEntry {
            target: RevealKey::GridItem(0),
            is_intersecting: true,
        }];
        assert!(tracker.apply(&mut page, &entries).is_empty());
        assert!(!page.items[0].is_visible);
        assert!(tracker.compute_entries(&page, 0.0).is_empty());
    }

    #[test]
    fn test_observe_registers_every_element() {
        let page = page();
        let mut tracker = RevealTracker::new(options());
        let directives = tracker.observe(&page);
        assert_eq!(directives.len(), 3);
        assert!(tracker.is_observing());
    }

    #[test]
    fn test_reveal_is_one_shot_with_stagger() {
        let mut page = page();
        let mut tracker = RevealTracker::new(options());
        tracker.observe(&page);

        let entries = tracker.compute_entries(&page, 1200.0);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].target, RevealKey::GridItem(1));

        let directives = tracker.apply(&mut page, &entries);
        assert!(page.items[1].is_visible);
        assert_eq!(page.items[1].reveal_delay_ms, Some(100));
        assert_eq!(directives.len(), 2);

        // Scrolling away does not hide it, and it is never re-reported.
        assert!(tracker.compute_entries(&page, 0.0).iter().all(|e| e.target != RevealKey::GridItem(1)));
        let again = tracker.apply(&mut page, &entries);
        assert!(again.is_empty());
        assert!(page.items[1].is_visible);
    }

    #[test]
    fn test_unknown_and_leaving_entries_are_ignored() {
        let mut page = page();
        let mut tracker = RevealTracker::new(options());
        tracker.observe(&page);
        let entries = [
            IntersectionEntry {
                target: RevealKey::GridItem(9),
                is_intersecting: true,
            },
            IntersectionEntry {
                target: RevealKey::Target(0),
                is_intersecting: false,
            },
        ];
        assert!(tracker.apply(&mut page, &entries).is_empty());
        assert!(!page.reveal_targets[0].is_visible);
    }

    #[test]
    fn test_targets_are_not_staggered() {
        let mut page = page();
        let mut tracker = RevealTracker::new(options());
        tracker.observe(&page);
        let entries = tracker.compute_entries(&page, 2000.0);
        assert!(entries.contains(&IntersectionEntry {
            target: RevealKey::Target(0),
            is_intersecting: true,
        }));
        let directives = tracker.apply(&mut page, &entries);
        assert!(!directives.iter().any(|d| matches!(
            d,
            Directive::SetAnimationDelay {
                target: ElementRef::RevealTarget(_),
                ..
            }
        )));
    }
}
