#![forbid(unsafe_code)]

//! Step-based page program.
//!
//! [`PageProgram`] is the top-level assembler: it owns every component, the
//! deterministic scheduler and the recording surface, and routes host input
//! to the right handler. The host controls the event loop:
//!
//! 1. Push events via [`PageProgram::push_event`].
//! 2. Advance time via [`PageProgram::advance_time`].
//! 3. Call [`PageProgram::step`] to process pending events and due timers.
//! 4. Apply the effects from [`PageProgram::take_outputs`] to the DOM.
//!
//! # Example
//!
//! ```
//! use sitekit_web::page_program::PageProgram;
//! use sitekit_web::layout::parse_setup;
//! use sitekit_web::PageEvent;
//! use std::time::Duration;
//!
//! let setup = parse_setup(r#"{
//!     "nav_targets": ["home", "about"],
//!     "slide_count": 3,
//!     "sections": [{"id": "home", "top": 0, "height": 500},
//!                  {"id": "about", "top": 500, "height": 400}]
//! }"#).unwrap();
//! let mut page = PageProgram::new(setup);
//! page.init();
//!
//! page.push_event(PageEvent::Scroll(550.0));
//! page.advance_time(Duration::from_millis(5000));
//! page.step();
//!
//! assert_eq!(page.active_section(), Some("about"));
//! assert_eq!(page.current_slide(), 1);
//! ```

use std::collections::VecDeque;
use std::time::Duration;

use sitekit_core::carousel::SlideRotator;
use sitekit_core::config::SiteConfig;
use sitekit_core::navigation::{NavClick, NavigationManager};
use sitekit_core::reveal::{CounterGroup, ScrollReveal};
use sitekit_core::throttle::Throttle;
use sitekit_core::timer::VirtualScheduler;
use sitekit_core::viewport::Section;

use crate::layout::PageSetup;
use crate::{PageEvent, PageOutputs, RecordingSurface};

/// Section the floating location button scrolls to.
pub const LOCATION_SECTION: &str = "contact";

/// Result of a single [`PageProgram::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepResult {
    /// Number of events processed during this step.
    pub events_processed: u32,
    /// Scroll events dropped by the throttle.
    pub scrolls_throttled: u32,
    /// Timer expiries handled during this step.
    pub timers_fired: u32,
}

/// Host-driven, non-blocking page runner.
pub struct PageProgram {
    config: SiteConfig,
    scheduler: VirtualScheduler,
    surface: RecordingSurface,
    queue: VecDeque<PageEvent>,
    navigation: NavigationManager,
    carousel: SlideRotator,
    reveal: ScrollReveal,
    counters: Option<CounterGroup>,
    scroll_throttle: Throttle,
    sections: Vec<Section>,
    scroll_y: f64,
    viewport_height: f64,
    initialized: bool,
    last_nav_click: Option<NavClick>,
}

impl PageProgram {
    /// Build every component from `setup`. Carousel autoplay starts here.
    #[must_use]
    pub fn new(setup: PageSetup) -> Self {
        let PageSetup {
            nav_targets,
            slide_count,
            sections,
            reveal,
            stats,
            viewport_height,
            config,
        } = setup;

        let mut scheduler = VirtualScheduler::new();
        let mut surface = RecordingSurface::new();

        let navigation = NavigationManager::new(nav_targets, &config);
        let carousel = SlideRotator::new(
            slide_count,
            config.autoplay_interval,
            &mut scheduler,
            &mut surface,
        );
        let reveal = ScrollReveal::new(reveal, config.reveal_margin);
        let counters = stats.map(|stats| {
            CounterGroup::new(
                stats.block,
                stats.counters.into_iter().map(|c| (c.id, c.target)),
                config.counter_duration,
                config.reveal_margin,
            )
        });

        Self {
            scroll_throttle: Throttle::new(config.scroll_throttle),
            config,
            scheduler,
            surface,
            queue: VecDeque::new(),
            navigation,
            carousel,
            reveal,
            counters,
            sections,
            scroll_y: 0.0,
            viewport_height,
            initialized: false,
            last_nav_click: None,
        }
    }

    /// Initial pass at page load: header state, cleared navigation, reveals.
    ///
    /// Subsequent calls do nothing.
    pub fn init(&mut self) {
        if self.initialized {
            tracing::warn!("PageProgram::init called more than once");
            return;
        }
        self.initialized = true;
        self.navigation.init(self.scroll_y, &self.sections, &mut self.surface);
        self.check_effects();
        tracing::info!(
            sections = self.sections.len(),
            slides = self.carousel.len(),
            "page initialized"
        );
    }

    /// Queue an event for the next [`step`](Self::step).
    pub fn push_event(&mut self, event: PageEvent) {
        self.queue.push_back(event);
    }

    /// Advance the deterministic clock by `dt`.
    pub fn advance_time(&mut self, dt: Duration) {
        self.scheduler.advance(dt);
    }

    /// Set the deterministic clock to an absolute time (never backwards).
    pub fn set_time(&mut self, now: Duration) {
        self.scheduler.set_now(now);
    }

    /// Current clock reading.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Process every pending event in order, then every due timer in
    /// deadline order.
    pub fn step(&mut self) -> StepResult {
        let mut result = StepResult::default();

        while let Some(event) = self.queue.pop_front() {
            result.events_processed += 1;
            if !self.handle_event(event) {
                result.scrolls_throttled += 1;
            }
        }

        while let Some(id) = self.scheduler.pop_due() {
            result.timers_fired += 1;
            if self.carousel.on_timer(id, &mut self.surface) {
                continue;
            }
            if let Some(counters) = &mut self.counters
                && counters.timer() == Some(id)
            {
                counters.on_timer(id, &mut self.scheduler, &mut self.surface);
                continue;
            }
            tracing::trace!(timer_id = id.raw(), "expiry with no owner");
        }

        result
    }

    /// Take the captured outputs, leaving an empty buffer.
    pub fn take_outputs(&mut self) -> PageOutputs {
        self.surface.take_outputs()
    }

    /// Read the captured outputs without consuming them.
    pub fn outputs(&self) -> &PageOutputs {
        self.surface.outputs()
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    #[must_use]
    pub fn navigation(&self) -> &NavigationManager {
        &self.navigation
    }

    #[must_use]
    pub fn carousel(&self) -> &SlideRotator {
        &self.carousel
    }

    #[must_use]
    pub fn reveal(&self) -> &ScrollReveal {
        &self.reveal
    }

    #[must_use]
    pub fn counters(&self) -> Option<&CounterGroup> {
        self.counters.as_ref()
    }

    #[must_use]
    pub fn scheduler(&self) -> &VirtualScheduler {
        &self.scheduler
    }

    /// Identifier of the highlighted navigation entry.
    #[must_use]
    pub fn active_section(&self) -> Option<&str> {
        self.navigation.links().active()
    }

    #[must_use]
    pub fn current_slide(&self) -> usize {
        self.carousel.current()
    }

    /// Last handled scroll position.
    #[must_use]
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Outcome of the most recent navigation click, for the host's
    /// `preventDefault` decision.
    #[must_use]
    pub fn last_nav_click(&self) -> Option<NavClick> {
        self.last_nav_click
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // --- Private helpers ---

    /// Returns `false` when a scroll event was throttled.
    fn handle_event(&mut self, event: PageEvent) -> bool {
        match event {
            PageEvent::Scroll(y) => {
                if !self.scroll_throttle.admit(self.scheduler.now()) {
                    return false;
                }
                self.scroll_y = y;
                self.navigation.on_scroll(y, &self.sections, &mut self.surface);
                self.check_effects();
            }
            PageEvent::Layout(sections) => {
                tracing::debug!(sections = sections.len(), "layout updated");
                self.sections = sections;
            }
            PageEvent::Viewport { height } => {
                self.viewport_height = height;
            }
            PageEvent::NavClick(href) => {
                let outcome = self
                    .navigation
                    .click(&href, &self.sections, &mut self.surface);
                self.last_nav_click = Some(outcome);
            }
            PageEvent::LocationFab => {
                self.navigation
                    .scroll_to_section(LOCATION_SECTION, &self.sections, &mut self.surface);
            }
            PageEvent::DotClick(index) => {
                let index = i64::try_from(index).unwrap_or(i64::MAX);
                self.carousel.go_to(index, &mut self.surface);
            }
            PageEvent::PrevClick => self.carousel.prev(&mut self.surface),
            PageEvent::NextClick => self.carousel.next(&mut self.surface),
            PageEvent::HoverEnter => self.carousel.hover_enter(&mut self.scheduler),
            PageEvent::HoverLeave => self.carousel.hover_leave(&mut self.scheduler),
            PageEvent::MenuToggle => self.navigation.menu_mut().toggle(&mut self.surface),
            PageEvent::Escape => self.navigation.menu_mut().on_escape(&mut self.surface),
            PageEvent::OutsideClick => {
                self.navigation.menu_mut().on_outside_click(&mut self.surface)
            }
        }
        true
    }

    fn check_effects(&mut self) {
        self.reveal.check(self.scroll_y, self.viewport_height, &mut self.surface);
        if let Some(counters) = &mut self.counters {
            counters.check(
                self.scroll_y,
                self.viewport_height,
                &mut self.scheduler,
                &mut self.surface,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Effect;
    use pretty_assertions::assert_eq;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn setup() -> PageSetup {
        PageSetup {
            nav_targets: vec!["home".into(), "about".into()],
            slide_count: 3,
            sections: vec![Section::new("home", 0.0, 500.0), Section::new("about", 500.0, 400.0)],
            ..PageSetup::default()
        }
    }

    fn page() -> PageProgram {
        let mut p = PageProgram::new(setup());
        p.init();
        p.take_outputs();
        p
    }

    #[test]
    fn construction_starts_autoplay() {
        let p = PageProgram::new(setup());
        assert_eq!(p.outputs().slides(), vec![0]);
        assert_eq!(p.scheduler().live_count(), 1);
        assert!(!p.is_initialized());
    }

    #[test]
    fn init_runs_once() {
        let mut p = PageProgram::new(setup());
        p.init();
        let after_first = p.outputs().effects.len();
        p.init();
        assert!(p.is_initialized());
        assert_eq!(p.outputs().effects.len(), after_first);
        assert_eq!(p.active_section(), None);
    }

    #[test]
    fn scroll_highlights_section() {
        let mut p = page();
        p.push_event(PageEvent::Scroll(550.0));
        let r = p.step();
        assert_eq!(r.events_processed, 1);
        assert_eq!(p.active_section(), Some("about"));
        assert_eq!(
            p.take_outputs().effects,
            vec![Effect::HeaderScrolled(true), Effect::SectionActive(Some("about".into()))]
        );
    }

    #[test]
    fn scroll_burst_is_throttled() {
        let mut p = page();
        p.push_event(PageEvent::Scroll(550.0));
        p.push_event(PageEvent::Scroll(300.0));
        let r = p.step();
        assert_eq!(r.scrolls_throttled, 1);
        assert_eq!(p.active_section(), Some("about"));

        p.advance_time(ms(100));
        p.push_event(PageEvent::Scroll(300.0));
        let r = p.step();
        assert_eq!(r.scrolls_throttled, 0);
        assert_eq!(p.active_section(), Some("home"));
        assert_eq!(p.scroll_y(), 300.0);
    }

    #[test]
    fn timers_drive_carousel() {
        let mut p = page();
        for _ in 0..3 {
            p.advance_time(ms(5000));
            assert_eq!(p.step().timers_fired, 1);
        }
        assert_eq!(p.current_slide(), 0);
        assert_eq!(p.take_outputs().slides(), vec![1, 2, 0]);
    }

    #[test]
    fn missed_ticks_are_not_replayed() {
        let mut p = page();
        p.advance_time(ms(15_000));
        assert_eq!(p.step().timers_fired, 1);
        assert_eq!(p.step().timers_fired, 0);
        assert_eq!(p.take_outputs().slides(), vec![1]);
    }

    #[test]
    fn nav_click_records_outcome() {
        let mut p = page();
        p.push_event(PageEvent::NavClick("#about".into()));
        p.step();
        assert_eq!(p.last_nav_click(), Some(NavClick::Scrolled));
        assert_eq!(
            p.take_outputs().effects,
            vec![Effect::ScrollTo(420.0), Effect::SectionActive(Some("about".into()))]
        );
    }

    #[test]
    fn layout_update_replaces_sections() {
        let mut p = page();
        p.push_event(PageEvent::Layout(vec![Section::new("home", 0.0, 2000.0)]));
        p.push_event(PageEvent::Scroll(1200.0));
        p.step();
        assert_eq!(p.active_section(), Some("home"));
    }
}
