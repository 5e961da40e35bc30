#![forbid(unsafe_code)]

//! `sitekit-web` drives the sitekit components from a browser host.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (JS) pushes scroll, click
//!   and hover events and ships layout measurements as JSON.
//! - **Deterministic time**: the host advances a monotonic clock explicitly;
//!   timers run on a [`VirtualScheduler`](sitekit_core::timer::VirtualScheduler).
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! Visible changes are captured as [`Effect`] values in [`PageOutputs`] for the
//! host to apply to the DOM.

pub mod layout;
pub mod page_program;

#[cfg(feature = "tracing-json")]
pub use sitekit_core::logging::init_json;

use sitekit_core::config::ConfigError;
use sitekit_core::surface::Surface;

/// Web host error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// Configuration was rejected.
    Config(ConfigError),
    /// Layout or page description could not be decoded.
    Layout(String),
}

impl core::fmt::Display for PageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Layout(msg) => write!(f, "invalid layout: {msg}"),
        }
    }
}

impl std::error::Error for PageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Layout(_) => None,
        }
    }
}

impl From<ConfigError> for PageError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<serde_json::Error> for PageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Layout(err.to_string())
    }
}

/// Input delivered by the host, processed in push order.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Window scrolled to `y` (px from document top).
    Scroll(f64),
    /// Layout pass produced new section bounds.
    Layout(Vec<sitekit_core::viewport::Section>),
    /// Viewport height changed.
    Viewport { height: f64 },
    /// Navigation link with `href` clicked.
    NavClick(String),
    /// Floating location button clicked: scroll to the contact section.
    LocationFab,
    /// Carousel dot `index` clicked.
    DotClick(usize),
    /// Carousel "previous" arrow clicked.
    PrevClick,
    /// Carousel "next" arrow clicked.
    NextClick,
    /// Pointer entered the carousel.
    HoverEnter,
    /// Pointer left the carousel.
    HoverLeave,
    /// Mobile menu toggle clicked.
    MenuToggle,
    /// Escape key pressed.
    Escape,
    /// Click outside the menu and its toggle.
    OutsideClick,
}

/// A single visible change requested from the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SectionActive(Option<String>),
    SlideActive(usize),
    HeaderScrolled(bool),
    MenuOpen(bool),
    ScrollTo(f64),
    Reveal(String),
    Counter { id: String, value: u64 },
}

/// Captured outputs for host consumption.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PageOutputs {
    /// Effects in emission order.
    pub effects: Vec<Effect>,
}

impl PageOutputs {
    /// Whether nothing was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Slide indices activated, in order.
    #[must_use]
    pub fn slides(&self) -> Vec<usize> {
        self.effects
            .iter()
            .filter_map(|e| match e {
                Effect::SlideActive(i) => Some(*i),
                _ => None,
            })
            .collect()
    }

    /// Last reported active section, if any was reported.
    #[must_use]
    pub fn last_section(&self) -> Option<Option<&str>> {
        self.effects.iter().rev().find_map(|e| match e {
            Effect::SectionActive(id) => Some(id.as_deref()),
            _ => None,
        })
    }
}

/// [`Surface`] that records every effect into [`PageOutputs`].
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    outputs: PageOutputs,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outputs(&self) -> &PageOutputs {
        &self.outputs
    }

    /// Take the captured outputs, leaving an empty buffer.
    pub fn take_outputs(&mut self) -> PageOutputs {
        std::mem::take(&mut self.outputs)
    }
}

impl Surface for RecordingSurface {
    fn set_section_active(&mut self, id: Option<&str>) {
        self.outputs
            .effects
            .push(Effect::SectionActive(id.map(str::to_owned)));
    }

    fn set_slide_active(&mut self, index: usize) {
        self.outputs.effects.push(Effect::SlideActive(index));
    }

    fn set_header_scrolled(&mut self, scrolled: bool) {
        self.outputs.effects.push(Effect::HeaderScrolled(scrolled));
    }

    fn set_menu_open(&mut self, open: bool) {
        self.outputs.effects.push(Effect::MenuOpen(open));
    }

    fn scroll_to(&mut self, y: f64) {
        self.outputs.effects.push(Effect::ScrollTo(y));
    }

    fn reveal(&mut self, id: &str) {
        self.outputs.effects.push(Effect::Reveal(id.to_owned()));
    }

    fn set_counter(&mut self, id: &str, value: u64) {
        self.outputs.effects.push(Effect::Counter {
            id: id.to_owned(),
            value,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn recording_surface_captures_in_order() {
        let mut s = RecordingSurface::new();
        s.set_slide_active(2);
        s.set_section_active(Some("about"));
        s.set_section_active(None);
        s.reveal("card");

        let out = s.take_outputs();
        assert_eq!(out.slides(), vec![2]);
        assert_eq!(out.last_section(), Some(None));
        assert_eq!(out.effects.last(), Some(&Effect::Reveal("card".into())));
        assert!(s.outputs().is_empty());
    }

    #[test]
    fn error_display_and_source() {
        let err = PageError::from(ConfigError::OutOfRange {
            key: "SITEKIT_AUTOPLAY_MS",
            value: "0".into(),
        });
        assert_eq!(
            err.to_string(),
            "invalid configuration: SITEKIT_AUTOPLAY_MS: value 0 is out of range"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
