//! The view state controller.
//!
//! A [`ViewController`] owns one page description and its configuration.
//! Hosts feed it [`ViewEvent`]s; every call returns the directives to apply
//! and the [`StateDiff`] of the tracked state. Deferred work goes through
//! the injected [`Scheduler`]; with the default [`VirtualClock`] time only
//! moves when [`ViewController::advance_time`] is called.

pub mod events;
pub mod tasks;
pub mod view_state;

pub use events::{ClickTarget, ViewEvent};
pub use tasks::Deferred;
pub use view_state::{derive_view_state, StateDiff, ViewState};

use crate::config::ControllerConfig;
use crate::constants::FORM_ERROR_DURATION_MS;
use crate::dom::{Directive, ElementRef, Marker};
use crate::effects::{self, MouseTrail, NavbarMarker, Typewriter};
use crate::forms::validate_contact;
use crate::lightbox::{CloseReason, ItemClickBehavior, LightboxPresenter, Step};
use crate::models::{Filter, Page};
use crate::nav_menu::NavMenu;
use crate::scheduler::{Scheduler, VirtualClock};
use crate::services::{FilterController, NavTracker, RevealTracker, Throttle};
use crate::shortcuts::{
    Action, Key, ShortcutRegistry, CONTEXT_LIGHTBOX, CONTEXT_MENU, CONTEXT_VIDEO,
};
use crate::video::VideoControls;
use serde::Serialize;
use tracing::{debug, info, trace};

/// Result of one dispatch or time advance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Update {
    /// Directives to apply, in order
    pub directives: Vec<Directive>,
    /// Change in tracked state
    pub diff: StateDiff,
}

/// Drives one page.
pub struct ViewController<S: Scheduler<Deferred> = VirtualClock<Deferred>> {
    config: ControllerConfig,
    page: Page,
    scheduler: S,
    shortcuts: ShortcutRegistry,
    scroll_throttle: Throttle,
    scroll_y: f64,
    ready: bool,
    loaded: bool,
    nav: NavTracker,
    reveal: RevealTracker,
    filter: FilterController,
    lightbox: LightboxPresenter,
    menu: NavMenu,
    video: Option<VideoControls>,
    navbar: Option<NavbarMarker>,
    typewriter: Option<Typewriter>,
    trail: Option<MouseTrail>,
    next_form_error: u64,
}

impl ViewController<VirtualClock<Deferred>> {
    /// Creates a controller on a virtual clock at t = 0.
    #[must_use]
    pub fn new(page: Page, config: ControllerConfig) -> Self {
        Self::with_scheduler(page, config, VirtualClock::new())
    }

    /// Moves time forward, running every task that falls due on the way.
    ///
    /// Tasks run in due order with the clock set to each task's due time,
    /// so work they schedule lands at the right moment too.
    pub fn advance_time(&mut self, delta_ms: u64) -> Update {
        let target = self.scheduler.now_ms().saturating_add(delta_ms);
        self.advance_time_to(target)
    }

    /// Moves time to `target_ms` (never backwards), running due tasks.
    pub fn advance_time_to(&mut self, target_ms: u64) -> Update {
        let before = self.view_state();
        let mut directives = Vec::new();

        while self
            .scheduler
            .next_due()
            .is_some_and(|due_at| due_at <= target_ms)
        {
            if let Some(task) = self.scheduler.pop_next() {
                directives.extend(self.run_task(task.task));
            }
        }
        self.scheduler.advance_to(target_ms);

        Update {
            diff: before.diff(&self.view_state()),
            directives,
        }
    }

    /// Runs queued tasks until the queue is empty.
    pub fn flush(&mut self) -> Update {
        let before = self.view_state();
        let mut directives = Vec::new();

        while let Some(task) = self.scheduler.pop_next() {
            directives.extend(self.run_task(task.task));
        }

        Update {
            diff: before.diff(&self.view_state()),
            directives,
        }
    }

    /// Number of queued tasks.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }
}

impl<S: Scheduler<Deferred>> ViewController<S> {
    /// Creates a controller with a host-provided scheduler.
    #[must_use]
    pub fn with_scheduler(page: Page, config: ControllerConfig, scheduler: S) -> Self {
        let video = if config.video_controls {
            page.hooks.video.clone().map(VideoControls::new)
        } else {
            None
        };
        let navbar = config
            .navbar_scrolled_offset
            .filter(|_| page.hooks.navbar)
            .map(NavbarMarker::new);
        let typewriter = config
            .typewriter
            .and(page.hooks.typewriter_text.as_deref())
            .map(Typewriter::new);
        let trail = config.mouse_trail.then(MouseTrail::default);

        Self {
            scroll_throttle: Throttle::new(config.scroll_throttle_ms),
            nav: NavTracker::new(config.scroll_margin),
            reveal: RevealTracker::new(config.reveal),
            filter: FilterController::new(config.filter),
            lightbox: LightboxPresenter::new(config.lightbox_layout),
            menu: NavMenu::new(config.menu, page.hooks.menu_toggle),
            shortcuts: ShortcutRegistry::new(),
            scroll_y: 0.0,
            ready: false,
            loaded: false,
            video,
            navbar,
            typewriter,
            trail,
            next_form_error: 1,
            config,
            page,
            scheduler,
        }
    }

    /// The page, with current per-element state.
    #[must_use]
    pub const fn page(&self) -> &Page {
        &self.page
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// The scheduler.
    #[must_use]
    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Last reported scroll offset.
    #[must_use]
    pub const fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Whether `DocumentReady` has been seen.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    /// Id of the current section.
    #[must_use]
    pub fn current_section(&self) -> Option<&str> {
        self.nav.current()
    }

    /// How many times the current section was recomputed.
    #[must_use]
    pub const fn nav_recomputations(&self) -> u64 {
        self.nav.recomputations()
    }

    /// The active filter.
    #[must_use]
    pub const fn active_filter(&self) -> &Filter {
        self.filter.active()
    }

    /// Lightbox state.
    #[must_use]
    pub const fn lightbox(&self) -> &LightboxPresenter {
        &self.lightbox
    }

    /// Mobile menu state.
    #[must_use]
    pub const fn menu(&self) -> &NavMenu {
        &self.menu
    }

    /// Video controls, when the page has a video and they are enabled.
    #[must_use]
    pub const fn video(&self) -> Option<&VideoControls> {
        self.video.as_ref()
    }

    /// Mouse trail dots on screen.
    #[must_use]
    pub fn trail_len(&self) -> usize {
        self.trail.as_ref().map_or(0, MouseTrail::len)
    }

    /// Snapshot of the tracked state.
    #[must_use]
    pub fn view_state(&self) -> ViewState {
        ViewState {
            nav_active: self.nav.current().map(str::to_string),
            item_visible: self.page.items.iter().map(|item| item.is_visible).collect(),
            item_shown: self.page.items.iter().map(|item| item.is_shown).collect(),
        }
    }

    /// Handles one host signal.
    pub fn dispatch(&mut self, event: ViewEvent) -> Update {
        trace!(?event, "dispatch");
        let before = self.view_state();

        let directives = match event {
            ViewEvent::DocumentReady => self.on_document_ready(),
            ViewEvent::WindowLoad => self.on_window_load(),
            ViewEvent::Scroll { y } => self.on_scroll(y),
            ViewEvent::Intersections { entries } => self.reveal.apply(&mut self.page, &entries),
            ViewEvent::Click { target } => self.on_click(target),
            ViewEvent::KeyDown { key } => self.on_key(key),
            ViewEvent::Media { event } => self
                .video
                .as_mut()
                .map(|video| video.on_media_event(event))
                .unwrap_or_default(),
            ViewEvent::PointerMove { x, y } => self.on_pointer_move(x, y),
            ViewEvent::FormSubmit { email, message } => self.on_form_submit(&email, &message),
        };

        Update {
            diff: before.diff(&self.view_state()),
            directives,
        }
    }

    /// Applies a filter without a button click.
    pub fn set_filter(&mut self, filter: Filter) -> Update {
        let before = self.view_state();
        let directives = self.filter.set_filter(
            filter,
            &mut self.page.filters,
            &mut self.page.items,
            &mut self.scheduler,
        );
        Update {
            diff: before.diff(&self.view_state()),
            directives,
        }
    }

    /// Runs a deferred task handed back by the scheduler.
    ///
    /// Hosts with their own timers call this when a timer fires.
    pub fn run_task(&mut self, task: Deferred) -> Vec<Directive> {
        trace!(?task, "running deferred task");
        match task {
            Deferred::FadeInItem { index, seq } => {
                self.filter.fade_in(&mut self.page.items, index, seq)
            }
            Deferred::RemoveItemOccupancy { index, seq } => {
                self.filter.remove_occupancy(&mut self.page.items, index, seq)
            }
            Deferred::StartTypewriter => self.start_typewriter(),
            Deferred::TypeNextChar => {
                let speed_ms = self.typewriter_speed();
                let Some(typewriter) = self.typewriter.as_mut() else {
                    return Vec::new();
                };
                let Some(directive) = typewriter.tick() else {
                    return Vec::new();
                };
                if !typewriter.is_done() {
                    self.scheduler.schedule(speed_ms, Deferred::TypeNextChar);
                }
                vec![directive]
            }
            Deferred::RevealHeroElement { index } => vec![Directive::SetOpacity {
                target: ElementRef::HeroElement(index),
                opaque: true,
            }],
            Deferred::HideHeroImage => {
                self.scheduler.schedule(100, Deferred::RevealHeroImage);
                vec![Directive::SetOpacity {
                    target: ElementRef::HeroImageWrapper,
                    opaque: false,
                }]
            }
            Deferred::RevealHeroImage => vec![Directive::SetOpacity {
                target: ElementRef::HeroImageWrapper,
                opaque: true,
            }],
            Deferred::ExpireTrailDot { id } => self
                .trail
                .as_mut()
                .and_then(|trail| trail.expire(id))
                .into_iter()
                .collect(),
            Deferred::RemoveFormError { id } => vec![Directive::RemoveFormError { id }],
        }
    }

    fn on_document_ready(&mut self) -> Vec<Directive> {
        if self.ready {
            debug!("document already ready");
            return Vec::new();
        }
        self.ready = true;
        info!(
            sections = self.page.sections.len(),
            items = self.page.items.len(),
            "document ready"
        );

        let mut directives = self.reveal.observe(&self.page);

        // Observers report the initial intersection state right away.
        let entries = self.reveal.compute_entries(&self.page, self.scroll_y);
        directives.extend(self.reveal.apply(&mut self.page, &entries));

        if let Some(typewriter) = self.config.typewriter.filter(|_| self.typewriter.is_some()) {
            if typewriter.start_delay_ms == 0 {
                directives.extend(self.start_typewriter());
            } else {
                self.scheduler
                    .schedule(typewriter.start_delay_ms, Deferred::StartTypewriter);
            }
        }

        directives
    }

    fn on_window_load(&mut self) -> Vec<Directive> {
        if self.loaded {
            return Vec::new();
        }
        self.loaded = true;

        let mut directives = vec![Directive::AddMarker {
            target: ElementRef::Body,
            marker: Marker::Loaded,
        }];

        for index in 0..self.page.hooks.hero_elements.len() {
            directives.push(effects::hide_hero_element(index));
            self.scheduler.schedule(
                effects::hero_delay(index, self.config.hero_stagger_ms),
                Deferred::RevealHeroElement { index },
            );
        }

        if self.config.hero_image_entrance && self.page.hooks.hero_image {
            self.scheduler.schedule(600, Deferred::HideHeroImage);
        }

        directives
    }

    fn on_scroll(&mut self, y: f64) -> Vec<Directive> {
        self.scroll_y = y;
        let mut directives = Vec::new();

        if self.scroll_throttle.try_acquire(self.scheduler.now_ms()) {
            directives.extend(
                self.nav
                    .recompute(&self.page.sections, &mut self.page.nav_links, y),
            );
            if let Some(navbar) = self.navbar.as_mut() {
                directives.extend(navbar.update(y));
            }
            directives.extend(effects::parallax(
                &self.config.parallax,
                &self.page.hooks,
                y,
                self.page.viewport.height,
            ));
        } else {
            trace!(y, "scroll throttled");
        }

        let entries = self.reveal.compute_entries(&self.page, y);
        directives.extend(self.reveal.apply(&mut self.page, &entries));
        directives
    }

    fn on_click(&mut self, target: ClickTarget) -> Vec<Directive> {
        let mut directives = match target {
            ClickTarget::MenuToggle => self.menu.toggle(),
            ClickTarget::NavLink { index } => self.on_nav_link(index),
            ClickTarget::FilterButton { index } => self.filter.select_button(
                index,
                &mut self.page.filters,
                &mut self.page.items,
                &mut self.scheduler,
            ),
            ClickTarget::GridItem {
                index,
                on_overlay_icons,
            } => self.on_item_click(index, on_overlay_icons),
            ClickTarget::LightboxClose => self.lightbox.close(CloseReason::CloseControl),
            ClickTarget::LightboxBackdrop => self.lightbox.close(CloseReason::Backdrop),
            ClickTarget::LightboxPrevious => self.lightbox.step(&self.page.items, Step::Previous),
            ClickTarget::LightboxNext => self.lightbox.step(&self.page.items, Step::Next),
            ClickTarget::VideoPlayButton | ClickTarget::VideoPlayPause => self
                .video
                .as_mut()
                .map(VideoControls::toggle_play_pause)
                .unwrap_or_default(),
            ClickTarget::VideoMute => self
                .video
                .as_mut()
                .map(VideoControls::toggle_mute)
                .unwrap_or_default(),
            ClickTarget::VideoFullscreen => self
                .video
                .as_ref()
                .map(VideoControls::toggle_fullscreen)
                .unwrap_or_default(),
            ClickTarget::LightboxContent | ClickTarget::Elsewhere => Vec::new(),
        };

        // The document-level listener sees the click after the element did.
        if target.is_outside_menu() {
            directives.extend(self.menu.outside_click());
        }
        directives
    }

    fn on_nav_link(&mut self, index: usize) -> Vec<Directive> {
        let Some(link) = self.page.nav_links.get(index) else {
            debug!(index, "click on unknown nav link");
            return Vec::new();
        };

        let scroll = if link.is_anchor() {
            let id = link.target_id();
            if self.page.section(id).is_some() {
                Some(Directive::ScrollIntoView {
                    section_id: id.to_string(),
                })
            } else {
                debug!(href = %link.href, "anchor target not found");
                None
            }
        } else {
            None
        };

        let mut directives = self.menu.close();
        directives.extend(scroll);
        directives
    }

    fn on_item_click(&mut self, index: usize, on_overlay_icons: bool) -> Vec<Directive> {
        if on_overlay_icons && self.config.ignore_overlay_icon_clicks {
            return Vec::new();
        }
        let Some(item) = self.page.items.get(index) else {
            debug!(index, "click on unknown grid item");
            return Vec::new();
        };

        match &self.config.item_click {
            ItemClickBehavior::Ignore => Vec::new(),
            ItemClickBehavior::Lightbox => self.lightbox.open(index, item),
            navigate @ ItemClickBehavior::Navigate { .. } => navigate
                .destination(item)
                .map(|url| {
                    debug!(%url, "navigating to item page");
                    Directive::Navigate { url }
                })
                .into_iter()
                .collect(),
        }
    }

    fn on_key(&mut self, key: Key) -> Vec<Directive> {
        let mut directives = Vec::new();

        if self.lightbox.is_open() {
            match self.shortcut(CONTEXT_LIGHTBOX, key) {
                Some(Action::CloseLightbox) => {
                    directives.extend(self.lightbox.close(CloseReason::Escape));
                }
                Some(Action::PreviousItem) => {
                    directives.extend(self.lightbox.step(&self.page.items, Step::Previous));
                }
                Some(Action::NextItem) => {
                    directives.extend(self.lightbox.step(&self.page.items, Step::Next));
                }
                _ => {}
            }
        }

        if self.menu.is_open() && self.shortcut(CONTEXT_MENU, key) == Some(Action::CloseMenu) {
            directives.extend(self.menu.escape());
        }

        if self.video.is_some() {
            let action = self.shortcut(CONTEXT_VIDEO, key);
            if let Some(video) = self.video.as_mut() {
                match action {
                    Some(Action::TogglePlayPause) => directives.extend(video.toggle_play_pause()),
                    Some(Action::ToggleMute) => directives.extend(video.toggle_mute()),
                    Some(Action::ToggleFullscreen) => directives.extend(video.toggle_fullscreen()),
                    _ => {}
                }
            }
        }

        directives
    }

    fn shortcut(&self, context: &str, key: Key) -> Option<Action> {
        let action = self.shortcuts.lookup(context, key)?;
        debug!(context, %key, action = action.id(), "shortcut");
        Some(action)
    }

    fn on_pointer_move(&mut self, x: f64, y: f64) -> Vec<Directive> {
        let Some(trail) = self.trail.as_mut() else {
            return Vec::new();
        };
        let (id, directives) = trail.spawn(x, y);
        self.scheduler
            .schedule(trail.lifetime_ms(), Deferred::ExpireTrailDot { id });
        directives
    }

    fn on_form_submit(&mut self, email: &str, message: &str) -> Vec<Directive> {
        match validate_contact(email, message) {
            Ok(()) => {
                info!("contact form accepted");
                Vec::new()
            }
            Err(error) => {
                let id = self.next_form_error;
                self.next_form_error += 1;
                debug!(field = ?error.field, "contact form rejected");
                self.scheduler
                    .schedule(FORM_ERROR_DURATION_MS, Deferred::RemoveFormError { id });
                vec![Directive::ShowFormError {
                    id,
                    field: error.field,
                    message: error.message.to_string(),
                }]
            }
        }
    }

    fn start_typewriter(&mut self) -> Vec<Directive> {
        let speed_ms = self.typewriter_speed();
        let Some(typewriter) = self.typewriter.as_mut() else {
            return Vec::new();
        };
        let directive = typewriter.start();
        if !typewriter.is_done() {
            self.scheduler.schedule(speed_ms, Deferred::TypeNextChar);
        }
        vec![directive]
    }

    fn typewriter_speed(&self) -> u64 {
        self.config
            .typewriter
            .map_or(crate::constants::TYPEWRITER_SPEED_MS, |config| config.speed_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageVariant;
    use crate::dom::{DocumentModel, DomSink};
    use crate::models::{FilterButton, GridItem, NavLink, PageHooks, Rect, Section};

    fn page() -> Page {
        Page {
            sections: vec![
                Section::new("home", 0.0, 800.0),
                Section::new("work", 800.0, 800.0),
            ],
            nav_links: vec![NavLink::new("#home"), NavLink::new("#work")],
            filters: vec![FilterButton::new("all"), FilterButton::new("photo")],
            items: vec![
                GridItem::new("photo", "A").with_rect(Rect::new(900.0, 0.0, 300.0, 200.0)),
                GridItem::new("video", "B").with_rect(Rect::new(900.0, 320.0, 300.0, 200.0)),
            ],
            hooks: PageHooks {
                hero_elements: vec!["title".to_string(), "subtitle".to_string()],
                ..PageHooks::default()
            },
            ..Page::default()
        }
    }

    fn controller(variant: PageVariant) -> ViewController {
        ViewController::new(page(), ControllerConfig::for_variant(variant))
    }

    #[test]
    fn test_scroll_updates_nav_and_reveal() {
        let mut controller = controller(PageVariant::Modern);
        controller.dispatch(ViewEvent::DocumentReady);

        let update = controller.dispatch(ViewEvent::Scroll { y: 700.0 });
        assert_eq!(controller.current_section(), Some("work"));
        assert_eq!(update.diff.nav_active, Some(Some("work".to_string())));
        assert_eq!(update.diff.revealed, vec![0, 1]);
    }

    #[test]
    fn test_document_ready_reports_initial_intersections() {
        let mut page = page();
        page.items[0].rect = Rect::new(100.0, 0.0, 300.0, 200.0);
        let mut controller = ViewController::new(page, ControllerConfig::default());
        let update = controller.dispatch(ViewEvent::DocumentReady);
        assert_eq!(update.diff.revealed, vec![0]);

        // A second ready signal is ignored.
        assert!(controller.dispatch(ViewEvent::DocumentReady).directives.is_empty());
    }

    #[test]
    fn test_advance_time_runs_hero_stagger() {
        let mut controller = controller(PageVariant::Modern);
        let mut doc = DocumentModel::new();
        doc.apply_all(&controller.dispatch(ViewEvent::WindowLoad).directives);
        assert!(doc.has_marker(ElementRef::Body, Marker::Loaded));
        assert!(!doc.is_opaque(ElementRef::HeroElement(0)));

        doc.apply_all(&controller.advance_time(0).directives);
        assert!(doc.is_opaque(ElementRef::HeroElement(0)));
        assert!(!doc.is_opaque(ElementRef::HeroElement(1)));

        doc.apply_all(&controller.advance_time(200).directives);
        assert!(doc.is_opaque(ElementRef::HeroElement(1)));
        assert_eq!(controller.pending_tasks(), 0);
    }

    #[test]
    fn test_outside_click_closes_bold_menu() {
        let mut controller = controller(PageVariant::Bold);
        controller.dispatch(ViewEvent::Click {
            target: ClickTarget::MenuToggle,
        });
        assert!(controller.menu().is_open());

        let update = controller.dispatch(ViewEvent::Click {
            target: ClickTarget::Elsewhere,
        });
        assert!(!controller.menu().is_open());
        assert!(update
            .directives
            .contains(&Directive::SetScrollLock { locked: false }));
    }

    #[test]
    fn test_nav_link_scrolls_and_closes_menu() {
        let mut controller = controller(PageVariant::Classic);
        controller.dispatch(ViewEvent::Click {
            target: ClickTarget::MenuToggle,
        });
        let update = controller.dispatch(ViewEvent::Click {
            target: ClickTarget::NavLink { index: 1 },
        });
        assert!(!controller.menu().is_open());
        assert_eq!(
            update.directives.last(),
            Some(&Directive::ScrollIntoView {
                section_id: "work".to_string()
            })
        );
    }

    #[test]
    fn test_set_filter_reports_diff() {
        let mut controller = controller(PageVariant::Modern);
        let update = controller.set_filter(Filter::from("photo"));
        assert_eq!(update.diff.hidden, vec![1]);
        assert!(controller.page().items[1].occupies_layout);
        controller.flush();
        assert!(!controller.page().items[1].occupies_layout);
    }

    #[test]
    fn test_form_error_expires() {
        let mut controller = controller(PageVariant::Classic);
        let mut doc = DocumentModel::new();
        let update = controller.dispatch(ViewEvent::FormSubmit {
            email: "nope".to_string(),
            message: "Hello there, long enough".to_string(),
        });
        doc.apply_all(&update.directives);
        assert_eq!(doc.form_errors().len(), 1);

        doc.apply_all(&controller.advance_time(2999).directives);
        assert_eq!(doc.form_errors().len(), 1);
        doc.apply_all(&controller.advance_time(1).directives);
        assert!(doc.form_errors().is_empty());
    }
}
