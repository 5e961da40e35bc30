#![forbid(unsafe_code)]

//! Site navigation: header state, mobile menu and anchor clicks.
//!
//! [`NavigationManager`] composes the [`ActiveLinkController`] with the
//! smaller pieces of navigation state and is what a page wires its scroll
//! and click events to.

use crate::active_link::ActiveLinkController;
use crate::config::SiteConfig;
use crate::surface::Surface;
use crate::viewport::{Section, ViewportTracker};

/// Tracks whether the page has scrolled past the header threshold.
///
/// Emits only when the state flips (and once on the first update).
#[derive(Debug, Clone)]
pub struct HeaderTracker {
    threshold: f64,
    scrolled: Option<bool>,
}

impl HeaderTracker {
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            scrolled: None,
        }
    }

    /// Last reported state; `None` before the first update.
    #[must_use]
    pub fn is_scrolled(&self) -> Option<bool> {
        self.scrolled
    }

    pub fn update(&mut self, scroll_y: f64, surface: &mut dyn Surface) {
        let scrolled = scroll_y > self.threshold;
        if self.scrolled != Some(scrolled) {
            self.scrolled = Some(scrolled);
            surface.set_header_scrolled(scrolled);
        }
    }
}

/// Open/closed state of the collapsible mobile menu.
#[derive(Debug, Clone, Default)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self, surface: &mut dyn Surface) {
        self.open = true;
        surface.set_menu_open(true);
    }

    pub fn close(&mut self, surface: &mut dyn Surface) {
        self.open = false;
        surface.set_menu_open(false);
    }

    pub fn toggle(&mut self, surface: &mut dyn Surface) {
        if self.open {
            self.close(surface);
        } else {
            self.open(surface);
        }
    }

    /// Escape closes an open menu; otherwise it is ignored.
    pub fn on_escape(&mut self, surface: &mut dyn Surface) {
        if self.open {
            self.close(surface);
        }
    }

    /// A click outside the menu and its toggle closes an open menu.
    pub fn on_outside_click(&mut self, surface: &mut dyn Surface) {
        if self.open {
            self.close(surface);
        }
    }
}

/// What a navigation link click resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavClick {
    /// In-page anchor with a known target: scrolled and highlighted.
    Scrolled,
    /// In-page anchor whose target section does not exist. The default
    /// navigation is still suppressed.
    MissingTarget,
    /// Not an in-page anchor; the host should follow the link normally.
    PassThrough,
}

impl NavClick {
    /// Whether the host should suppress the browser's default navigation.
    #[must_use]
    pub fn prevents_default(self) -> bool {
        !matches!(self, Self::PassThrough)
    }
}

/// Navigation state for a page: active link, header and mobile menu.
#[derive(Debug, Clone)]
pub struct NavigationManager {
    links: ActiveLinkController,
    header: HeaderTracker,
    menu: MobileMenu,
    scroll_offset: f64,
}

impl NavigationManager {
    /// Create navigation over `targets` (section identifiers in menu order).
    pub fn new<I, S>(targets: I, config: &SiteConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            links: ActiveLinkController::new(targets, ViewportTracker::from_config(config)),
            header: HeaderTracker::new(config.header_scrolled_threshold),
            menu: MobileMenu::new(),
            scroll_offset: config.scroll_offset,
        }
    }

    #[must_use]
    pub fn links(&self) -> &ActiveLinkController {
        &self.links
    }

    #[must_use]
    pub fn header(&self) -> &HeaderTracker {
        &self.header
    }

    #[must_use]
    pub fn menu(&self) -> &MobileMenu {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut MobileMenu {
        &mut self.menu
    }

    /// Initial pass at page load: header state for `scroll_y`, no active link.
    pub fn init(&mut self, scroll_y: f64, sections: &[Section], surface: &mut dyn Surface) {
        self.on_scroll(scroll_y, sections, surface);
        self.links.set_active(None, surface);
    }

    /// Update header state and the active link for a new scroll position.
    pub fn on_scroll(&mut self, scroll_y: f64, sections: &[Section], surface: &mut dyn Surface) {
        self.header.update(scroll_y, surface);
        self.links.on_scroll(scroll_y, sections, surface);
    }

    /// Highlight `id` directly (e.g. after a programmatic jump).
    pub fn set_active(&mut self, id: Option<&str>, surface: &mut dyn Surface) {
        self.links.set_active(id, surface);
    }

    /// Scroll so section `id` starts just below the fixed header.
    ///
    /// Returns `false` (and emits nothing) when no such section exists.
    pub fn scroll_to_section(
        &self,
        id: &str,
        sections: &[Section],
        surface: &mut dyn Surface,
    ) -> bool {
        let Some(section) = sections.iter().find(|s| s.id == id) else {
            tracing::debug!(id, "scroll target not found");
            return false;
        };
        surface.scroll_to(section.top - self.scroll_offset);
        true
    }

    /// Handle a click on a navigation link with the given `href`.
    ///
    /// For `#id` anchors whose section exists: scroll so the section starts
    /// just below the fixed header, highlight the link, close the mobile menu.
    pub fn click(
        &mut self,
        href: &str,
        sections: &[Section],
        surface: &mut dyn Surface,
    ) -> NavClick {
        let Some(id) = href.strip_prefix('#') else {
            return NavClick::PassThrough;
        };
        if !self.scroll_to_section(id, sections, surface) {
            return NavClick::MissingTarget;
        }
        self.links.set_active(Some(id), surface);
        if self.menu.is_open() {
            self.menu.close(surface);
        }
        NavClick::Scrolled
    }
}
