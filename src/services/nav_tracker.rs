//! Scroll-position to current-section tracking.
//!
//! The current section is the LAST section, in document order, whose top
//! offset minus the scroll margin is at or above the scroll position. When
//! sections are not sorted by offset, document order still decides.

use crate::dom::{Directive, ElementRef, Marker};
use crate::models::{NavLink, Section};
use tracing::debug;

/// Returns the current section for `scroll_y`, if any.
///
/// A section qualifies when `scroll_y >= top_offset - margin`. The last
/// qualifying section in slice order wins. Above the first qualifying
/// section there is no current section.
#[must_use]
pub fn current_section(sections: &[Section], scroll_y: f64, margin: f64) -> Option<&Section> {
    sections
        .iter()
        .rev()
        .find(|section| scroll_y >= section.top_offset - margin)
}

/// Tracks which nav link is active.
#[derive(Debug, Clone, PartialEq)]
pub struct NavTracker {
    margin: f64,
    current: Option<String>,
    recomputations: u64,
}

impl NavTracker {
    /// Creates a tracker with the given scroll margin.
    #[must_use]
    pub const fn new(margin: f64) -> Self {
        Self {
            margin,
            current: None,
            recomputations: 0,
        }
    }

    /// Id of the current section, if any.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// How many times the current section has been recomputed.
    #[must_use]
    pub const fn recomputations(&self) -> u64 {
        self.recomputations
    }

    /// Recomputes the current section and syncs link activity.
    ///
    /// Returns directives only for links whose activity changed. When no
    /// section qualifies every link ends up inactive.
    pub fn recompute(
        &mut self,
        sections: &[Section],
        links: &mut [NavLink],
        scroll_y: f64,
    ) -> Vec<Directive> {
        self.recomputations += 1;
        let current = current_section(sections, scroll_y, self.margin).map(|s| s.id.clone());

        if current != self.current {
            debug!(from = ?self.current, to = ?current, scroll_y, "current section changed");
            self.current = current;
        }

        sync_links(links, self.current.as_deref())
    }
}

/// Marks exactly the links targeting `current` active.
fn sync_links(links: &mut [NavLink], current: Option<&str>) -> Vec<Directive> {
    let mut directives = Vec::new();
    for (index, link) in links.iter_mut().enumerate() {
        let active = current.is_some_and(|id| link.targets(id));
        if active == link.is_active {
            continue;
        }
        link.is_active = active;
        let target = ElementRef::NavLink(index);
        directives.push(if active {
            Directive::AddMarker {
                target,
                marker: Marker::Active,
            }
        } else {
            Directive::RemoveMarker {
                target,
                marker: Marker::Active,
            }
        });
    }
    directives
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<Section> {
        vec![
            Section::new("home", 0.0, 800.0),
            Section::new("work", 800.0, 900.0),
            Section::new("contact", 1700.0, 600.0),
        ]
    }

    fn links() -> Vec<NavLink> {
        vec![
            NavLink::new("#home"),
            NavLink::new("#work"),
            NavLink::new("#contact"),
        ]
    }

    #[test]
    fn test_current_section_margin_boundary() {
        let sections = sections();
        assert_eq!(current_section(&sections, 599.0, 200.0).unwrap().id, "home");
        assert_eq!(current_section(&sections, 600.0, 200.0).unwrap().id, "work");
    }

    #[test]
    fn test_current_section_none_above_first() {
        let sections = vec![Section::new("work", 800.0, 100.0)];
        assert!(current_section(&sections, 100.0, 200.0).is_none());
    }

    #[test]
    fn test_current_section_last_match_wins_when_unsorted() {
        let sections = vec![
            Section::new("late", 1000.0, 100.0),
            Section::new("early", 100.0, 100.0),
        ];
        assert_eq!(current_section(&sections, 1200.0, 200.0).unwrap().id, "early");
    }

    #[test]
    fn test_recompute_activates_single_link() {
        let sections = sections();
        let mut links = links();
        let mut tracker = NavTracker::new(200.0);

        let directives = tracker.recompute(&sections, &mut links, 900.0);
        assert_eq!(tracker.current(), Some("work"));
        assert_eq!(links.iter().filter(|l| l.is_active).count(), 1);
        assert!(links[1].is_active);
        assert_eq!(directives.len(), 1);

        // Same section again: nothing to do.
        assert!(tracker.recompute(&sections, &mut links, 950.0).is_empty());
        assert_eq!(tracker.recomputations(), 2);
    }

    #[test]
    fn test_recompute_clears_links_above_first_section() {
        let sections = vec![Section::new("work", 800.0, 100.0)];
        let mut links = vec![NavLink::new("#work")];
        links[0].is_active = true;
        let mut tracker = NavTracker::new(200.0);

        let directives = tracker.recompute(&sections, &mut links, 0.0);
        assert!(!links[0].is_active);
        assert!(matches!(directives[0], Directive::RemoveMarker { .. }));
    }

    #[test]
    fn test_non_anchor_links_never_active() {
        let sections = sections();
        let mut links = vec![NavLink::new("about.html"), NavLink::new("#home")];
        let mut tracker = NavTracker::new(200.0);
        tracker.recompute(&sections, &mut links, 0.0);
        assert!(!links[0].is_active);
        assert!(links[1].is_active);
    }
}
