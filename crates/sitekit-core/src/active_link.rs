#![forbid(unsafe_code)]

//! Active navigation link tracking.
//!
//! [`ActiveLinkController`] keeps at most one [`NavEntry`] marked current.
//! The entry changes either because the visitor clicked a link
//! ([`set_active`](ActiveLinkController::set_active)) or because a different
//! section scrolled under the header ([`on_scroll`](ActiveLinkController::on_scroll)).
//!
//! # Invariants
//!
//! 1. After any call, at most one entry is active.
//! 2. `set_active` clears every entry before activating the match, so a stale
//!    entry never survives next to a new one.
//! 3. A scroll position that matches no section leaves the current entry as is.

use crate::surface::Surface;
use crate::viewport::{Section, ViewportTracker};

/// A navigation menu item bound to a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    target: String,
    active: bool,
}

impl NavEntry {
    /// Identifier of the section this entry links to.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Whether this entry is currently highlighted.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Keeps a single navigation entry highlighted.
#[derive(Debug, Clone)]
pub struct ActiveLinkController {
    entries: Vec<NavEntry>,
    tracker: ViewportTracker,
}

impl ActiveLinkController {
    /// Create a controller over `targets` (section identifiers, menu order).
    ///
    /// No entry is active initially.
    pub fn new<I, S>(targets: I, tracker: ViewportTracker) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: targets
                .into_iter()
                .map(|t| NavEntry {
                    target: t.into(),
                    active: false,
                })
                .collect(),
            tracker,
        }
    }

    /// All entries in menu order.
    #[must_use]
    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    /// Identifier of the active entry, if any.
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.active)
            .map(|e| e.target.as_str())
    }

    #[must_use]
    pub fn tracker(&self) -> &ViewportTracker {
        &self.tracker
    }

    /// Clear every entry, then activate the one targeting `id`.
    ///
    /// An unknown id (or `None`) leaves nothing active. Duplicate targets
    /// resolve to the first entry.
    pub fn set_active(&mut self, id: Option<&str>, surface: &mut dyn Surface) {
        let before = self.active().map(str::to_owned);

        let mut matched = false;
        for entry in &mut self.entries {
            entry.active = !matched && id.is_some_and(|id| entry.target == id);
            matched |= entry.active;
        }

        let after = self.active();
        if before.as_deref() != after {
            tracing::debug!(from = before.as_deref(), to = after, "active link changed");
        }
        surface.set_section_active(after);
    }

    /// Highlight the entry for the section under the header at `scroll_y`.
    ///
    /// Returns `true` when a section matched (whether or not the active
    /// entry actually changed).
    pub fn on_scroll(
        &mut self,
        scroll_y: f64,
        sections: &[Section],
        surface: &mut dyn Surface,
    ) -> bool {
        match self.tracker.active_section(scroll_y, sections) {
            Some(section) => {
                self.set_active(Some(&section.id), surface);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Option<String>>,
    }

    impl Surface for Recorder {
        fn set_section_active(&mut self, id: Option<&str>) {
            self.calls.push(id.map(str::to_owned));
        }

        fn set_slide_active(&mut self, _index: usize) {}
    }

    fn sections() -> Vec<Section> {
        vec![Section::new("home", 0.0, 500.0), Section::new("about", 500.0, 400.0)]
    }

    fn controller() -> ActiveLinkController {
        ActiveLinkController::new(["home", "about", "contact"], ViewportTracker::new(130.0))
    }

    fn active_count(c: &ActiveLinkController) -> usize {
        c.entries().iter().filter(|e| e.is_active()).count()
    }

    #[test]
    fn starts_with_nothing_active() {
        let c = controller();
        assert_eq!(c.active(), None);
        assert_eq!(c.entries().len(), 3);
    }

    #[test]
    fn set_active_switches_entry() {
        let mut c = controller();
        let mut r = Recorder::default();
        c.set_active(Some("about"), &mut r);
        c.set_active(Some("contact"), &mut r);
        assert_eq!(c.active(), Some("contact"));
        assert_eq!(active_count(&c), 1);
        assert_eq!(r.calls, vec![Some("about".into()), Some("contact".into())]);
    }

    #[test]
    fn unknown_or_none_clears() {
        let mut c = controller();
        let mut r = Recorder::default();
        c.set_active(Some("about"), &mut r);
        c.set_active(Some("missing"), &mut r);
        assert_eq!(c.active(), None);
        c.set_active(Some("home"), &mut r);
        c.set_active(None, &mut r);
        assert_eq!(c.active(), None);
        assert_eq!(r.calls.last(), Some(&None));
    }

    #[test]
    fn scroll_scenario() {
        let mut c = controller();
        let mut r = Recorder::default();
        let s = sections();

        assert!(c.on_scroll(550.0, &s, &mut r));
        assert_eq!(c.active(), Some("about"));

        assert!(c.on_scroll(300.0, &s, &mut r));
        assert_eq!(c.active(), Some("home"));
        assert_eq!(active_count(&c), 1);
    }

    #[test]
    fn scroll_past_all_sections_keeps_previous() {
        let mut c = controller();
        let mut r = Recorder::default();
        let s = sections();

        c.on_scroll(550.0, &s, &mut r);
        let calls = r.calls.len();
        assert!(!c.on_scroll(5000.0, &s, &mut r));
        assert_eq!(c.active(), Some("about"));
        assert_eq!(r.calls.len(), calls);
    }

    #[test]
    fn section_without_entry_clears() {
        let mut c = ActiveLinkController::new(["home"], ViewportTracker::new(0.0));
        let mut r = Recorder::default();
        let s = sections();
        c.on_scroll(0.0, &s, &mut r);
        assert_eq!(c.active(), Some("home"));
        c.on_scroll(600.0, &s, &mut r);
        assert_eq!(c.active(), None);
    }

    #[test]
    fn duplicate_targets_activate_once() {
        let mut c = ActiveLinkController::new(["home", "home"], ViewportTracker::default());
        c.set_active(Some("home"), &mut Recorder::default());
        assert_eq!(active_count(&c), 1);
        assert!(c.entries()[0].is_active());
    }
}
