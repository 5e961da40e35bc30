#![forbid(unsafe_code)]

//! Output effects toward the rendering layer.
//!
//! Components never touch markup themselves. Every visible change is a call
//! on a [`Surface`]; the host decides how it is reflected (class toggling,
//! attributes, a test recorder). All calls are idempotent: applying the same
//! effect twice leaves the page as applying it once.

/// Rendering collaborator driven by the components.
///
/// Only the navigation and carousel effects are mandatory; the remaining
/// hooks default to no-ops so a host can wire the core alone.
pub trait Surface {
    /// Mark the navigation entry bound to `id` as current; `None` clears all.
    fn set_section_active(&mut self, id: Option<&str>);

    /// Mark slide `index` (and its dot) as the visible one, clearing the rest.
    fn set_slide_active(&mut self, index: usize);

    /// Toggle the compact header style.
    fn set_header_scrolled(&mut self, _scrolled: bool) {}

    /// Open or close the mobile navigation menu (and lock body scrolling).
    fn set_menu_open(&mut self, _open: bool) {}

    /// Scroll the document to absolute position `y`.
    fn scroll_to(&mut self, _y: f64) {}

    /// Start the entrance animation of element `id`.
    fn reveal(&mut self, _id: &str) {}

    /// Display `value` in counter `id`.
    fn set_counter(&mut self, _id: &str, _value: u64) {}
}

/// Surface that drops every effect.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn set_section_active(&mut self, _id: Option<&str>) {}

    fn set_slide_active(&mut self, _index: usize) {}
}
