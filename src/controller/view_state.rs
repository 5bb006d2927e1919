//! Pure view-state derivation and diffing.
//!
//! [`derive_view_state`] computes the three tracked facts from a scroll
//! offset, the item list and a filter, with no side effects. The controller
//! reports the same facts after every event as a [`ViewState`] snapshot and
//! the [`StateDiff`] from the previous one.

use crate::config::ControllerConfig;
use crate::models::{Filter, Page};
use crate::services::nav_tracker::current_section;
use crate::services::reveal::has_entered;
use serde::Serialize;

/// Snapshot of the tracked state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    /// Id of the current section
    pub nav_active: Option<String>,
    /// Per-item reveal flag
    pub item_visible: Vec<bool>,
    /// Per-item filter match
    pub item_shown: Vec<bool>,
}

/// Change between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StateDiff {
    /// New current section, when it changed (`Some(None)`: cleared)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_active: Option<Option<String>>,
    /// Items revealed
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub revealed: Vec<usize>,
    /// Items that started matching the filter
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shown: Vec<usize>,
    /// Items that stopped matching the filter
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hidden: Vec<usize>,
}

impl StateDiff {
    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nav_active.is_none()
            && self.revealed.is_empty()
            && self.shown.is_empty()
            && self.hidden.is_empty()
    }
}

impl ViewState {
    /// What changed going from `self` to `next`.
    #[must_use]
    pub fn diff(&self, next: &Self) -> StateDiff {
        let nav_active = (self.nav_active != next.nav_active).then(|| next.nav_active.clone());

        let revealed = changed(&self.item_visible, &next.item_visible, true);
        let shown = changed(&self.item_shown, &next.item_shown, true);
        let hidden = changed(&self.item_shown, &next.item_shown, false);

        StateDiff {
            nav_active,
            revealed,
            shown,
            hidden,
        }
    }
}

/// Indices whose flag became `to`. Missing entries count as the opposite.
fn changed(before: &[bool], after: &[bool], to: bool) -> Vec<usize> {
    after
        .iter()
        .enumerate()
        .filter(|&(index, &now)| now == to && before.get(index).copied() != Some(to))
        .map(|(index, _)| index)
        .collect()
}

/// Derives the view state for `scroll_y` and `filter`.
///
/// An item counts as visible if it already was, or if it occupies layout and
/// has entered the reveal root at this scroll offset.
#[must_use]
pub fn derive_view_state(
    page: &Page,
    scroll_y: f64,
    filter: &Filter,
    config: &ControllerConfig,
) -> ViewState {
    let root = config
        .reveal
        .root_margin
        .apply(page.viewport.rect_at(scroll_y));

    ViewState {
        nav_active: current_section(&page.sections, scroll_y, config.scroll_margin)
            .map(|section| section.id.clone()),
        item_visible: page
            .items
            .iter()
            .map(|item| {
                item.is_visible
                    || (item.occupies_layout
                        && has_entered(&item.rect, &root, config.reveal.threshold))
            })
            .collect(),
        item_shown: page.items.iter().map(|item| filter.matches(item)).collect(),
    }
}
