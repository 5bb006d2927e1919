//! Category filtering with a two-phase show/hide.
//!
//! Changing the filter updates each item's logical state right away. The
//! visual side lags behind on purpose: shown items regain layout at once and
//! fade in after a short delay; hidden items fade out at once and give up
//! their layout slot only after the hide delay, so the fade-out can play.
//!
//! Deferred phases are never cancelled. Every transition bumps the item's
//! `transition_seq` and the deferred phase carries the value it was
//! scheduled under; a phase whose item has moved on to a newer transition
//! does nothing. Rapid re-filtering therefore settles on the latest filter,
//! and a hidden item keeps its slot for the full hide delay of its latest
//! fade-out.

use crate::controller::Deferred;
use crate::dom::{Directive, ElementRef, Marker};
use crate::models::{Filter, FilterButton, FilterState, GridItem};
use crate::scheduler::Scheduler;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Timing of the two phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Delay before a shown item fades in (ms)
    pub show_delay_ms: u64,
    /// Multiply the show delay by the item index
    pub show_stagger: bool,
    /// Delay before a hidden item stops occupying layout (ms)
    pub hide_delay_ms: u64,
}

impl FilterOptions {
    /// Fade-in delay for the item at `index`.
    #[must_use]
    pub const fn show_delay_for(&self, index: usize) -> u64 {
        if self.show_stagger {
            self.show_delay_ms.saturating_mul(index as u64)
        } else {
            self.show_delay_ms
        }
    }
}

/// Owns the active filter and drives item transitions.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterController {
    options: FilterOptions,
    state: FilterState,
}

impl FilterController {
    /// Creates a controller with the `All` filter active.
    #[must_use]
    pub fn new(options: FilterOptions) -> Self {
        Self {
            options,
            state: FilterState::default(),
        }
    }

    /// The active filter.
    #[must_use]
    pub const fn active(&self) -> &Filter {
        &self.state.active
    }

    /// Phase timing.
    #[must_use]
    pub const fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Handles a click on the filter button at `index`.
    ///
    /// Every button is cleared and the clicked one set, then the button's
    /// tag is applied. Unknown indices are ignored.
    pub fn select_button(
        &mut self,
        index: usize,
        buttons: &mut [FilterButton],
        items: &mut [GridItem],
        scheduler: &mut dyn Scheduler<Deferred>,
    ) -> Vec<Directive> {
        let Some(filter) = buttons.get(index).map(|button| button.tag.clone()) else {
            debug!(index, "click on unknown filter button");
            return Vec::new();
        };

        let mut directives = activate_buttons(buttons, |i| i == index);
        directives.extend(self.apply(filter, items, scheduler));
        directives
    }

    /// Applies `filter` without a button click.
    ///
    /// The first button carrying the same tag becomes active; if none does,
    /// no button is active.
    pub fn set_filter(
        &mut self,
        filter: Filter,
        buttons: &mut [FilterButton],
        items: &mut [GridItem],
        scheduler: &mut dyn Scheduler<Deferred>,
    ) -> Vec<Directive> {
        let chosen = buttons.iter().position(|button| button.tag == filter);
        let mut directives = activate_buttons(buttons, |i| Some(i) == chosen);
        directives.extend(self.apply(filter, items, scheduler));
        directives
    }

    fn apply(
        &mut self,
        filter: Filter,
        items: &mut [GridItem],
        scheduler: &mut dyn Scheduler<Deferred>,
    ) -> Vec<Directive> {
        debug!(from = %self.state.active, to = %filter, "filter changed");

        let mut directives = Vec::new();
        for (index, item) in items.iter_mut().enumerate() {
            let target = ElementRef::GridItem(index);
            item.transition_seq = item.transition_seq.wrapping_add(1);
            let seq = item.transition_seq;
            if filter.matches(item) {
                item.is_shown = true;
                if !item.occupies_layout {
                    item.occupies_layout = true;
                    directives.push(Directive::SetDisplay {
                        target,
                        occupies: true,
                    });
                }
                scheduler.schedule(
                    self.options.show_delay_for(index),
                    Deferred::FadeInItem { index, seq },
                );
            } else {
                item.is_shown = false;
                if item.is_opaque {
                    item.is_opaque = false;
                    directives.push(Directive::SetOpacity {
                        target,
                        opaque: false,
                    });
                }
                scheduler.schedule(
                    self.options.hide_delay_ms,
                    Deferred::RemoveItemOccupancy { index, seq },
                );
            }
        }

        self.state.active = filter;
        directives
    }

    /// Second phase of showing: fades the item in if transition `seq` is
    /// still its latest.
    pub fn fade_in(&self, items: &mut [GridItem], index: usize, seq: u64) -> Vec<Directive> {
        match items.get_mut(index) {
            Some(item) if item.transition_seq != seq || !item.is_shown => {
                debug!(index, seq, "skipping stale fade-in");
                Vec::new()
            }
            Some(item) if !item.is_opaque => {
                item.is_opaque = true;
                vec![Directive::SetOpacity {
                    target: ElementRef::GridItem(index),
                    opaque: true,
                }]
            }
            _ => Vec::new(),
        }
    }

    /// Second phase of hiding: drops the item from layout if transition
    /// `seq` is still its latest.
    pub fn remove_occupancy(
        &self,
        items: &mut [GridItem],
        index: usize,
        seq: u64,
    ) -> Vec<Directive> {
        match items.get_mut(index) {
            Some(item) if item.transition_seq != seq || item.is_shown => {
                debug!(index, seq, "skipping stale layout removal");
                Vec::new()
            }
            Some(item) if item.occupies_layout => {
                item.occupies_layout = false;
                vec![Directive::SetDisplay {
                    target: ElementRef::GridItem(index),
                    occupies: false,
                }]
            }
            _ => Vec::new(),
        }
    }
}

fn activate_buttons(
    buttons: &mut [FilterButton],
    is_chosen: impl Fn(usize) -> bool,
) -> Vec<Directive> {
    let mut directives = Vec::new();
    for (index, button) in buttons.iter_mut().enumerate() {
        let active = is_chosen(index);
        if button.is_active == active {
            continue;
        }
        button.is_active = active;
        let target = ElementRef::FilterButton(index);
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
