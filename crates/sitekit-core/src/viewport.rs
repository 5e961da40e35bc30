#![forbid(unsafe_code)]

//! Section geometry and the scroll-position probe.
//!
//! A [`Section`] is a vertical band of the document measured during layout.
//! [`ViewportTracker`] decides which band is "current" for a scroll position by
//! probing a fixed distance below the top of the viewport (the fixed header
//! height plus a small look-ahead).
//!
//! # Invariants
//!
//! 1. Membership is half-open: `top <= probe < top + height`.
//! 2. Zero-height (or negative-height) sections never match.
//! 3. When ranges overlap, the last matching section in document order wins.

use crate::config::SiteConfig;

/// A named, vertically positioned region of page content.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    /// Identifier used by navigation entries (the fragment without `#`).
    pub id: String,
    /// Distance from the document top, in px.
    pub top: f64,
    /// Rendered height, in px.
    pub height: f64,
}

impl Section {
    /// Create a section.
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    /// One past the last px covered by this section.
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether `y` falls inside `[top, bottom)`.
    #[inline]
    #[must_use]
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }
}

/// Maps a scroll position to the section currently under the header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTracker {
    probe_offset: f64,
}

impl Default for ViewportTracker {
    fn default() -> Self {
        Self::from_config(&SiteConfig::default())
    }
}

impl ViewportTracker {
    /// Create a tracker that probes `probe_offset` px below the scroll position.
    #[must_use]
    pub const fn new(probe_offset: f64) -> Self {
        Self { probe_offset }
    }

    /// Tracker using [`SiteConfig::probe_offset`].
    #[must_use]
    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.probe_offset())
    }

    #[inline]
    #[must_use]
    pub fn probe_offset(&self) -> f64 {
        self.probe_offset
    }

    /// Document position tested against section bounds.
    #[inline]
    #[must_use]
    pub fn probe(&self, scroll_y: f64) -> f64 {
        scroll_y + self.probe_offset
    }

    /// The section under the probe, if any.
    ///
    /// Scans every section; a later match replaces an earlier one.
    #[must_use]
    pub fn active_section<'a>(
        &self,
        scroll_y: f64,
        sections: &'a [Section],
    ) -> Option<&'a Section> {
        let probe = self.probe(scroll_y);
        let found = sections.iter().filter(|s| s.contains(probe)).last();
        tracing::trace!(
            scroll_y,
            probe,
            section = found.map(|s| s.id.as_str()),
            "viewport probe"
        );
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Vec<Section> {
        vec![Section::new("home", 0.0, 500.0), Section::new("about", 500.0, 400.0)]
    }

    #[test]
    fn default_probe_offset() {
        assert_eq!(ViewportTracker::default().probe_offset(), 130.0);
    }

    #[test]
    fn probe_picks_section_below_header() {
        let t = ViewportTracker::default();
        let sections = page();
        assert_eq!(t.active_section(550.0, &sections).map(|s| s.id.as_str()), Some("about"));
        assert_eq!(t.active_section(300.0, &sections).map(|s| s.id.as_str()), Some("home"));
    }

    #[test]
    fn boundaries_are_half_open() {
        let t = ViewportTracker::new(0.0);
        let sections = page();
        assert_eq!(t.active_section(499.0, &sections).unwrap().id, "home");
        assert_eq!(t.active_section(500.0, &sections).unwrap().id, "about");
        assert!(t.active_section(900.0, &sections).is_none());
        assert!(t.active_section(-1.0, &sections).is_none());
    }

    #[test]
    fn overlapping_sections_last_match_wins() {
        let t = ViewportTracker::new(0.0);
        let sections = vec![
            Section::new("outer", 0.0, 1000.0),
            Section::new("inner", 200.0, 100.0),
            Section::new("tail", 900.0, 100.0),
        ];
        assert_eq!(t.active_section(250.0, &sections).unwrap().id, "inner");
        assert_eq!(t.active_section(100.0, &sections).unwrap().id, "outer");
        assert_eq!(t.active_section(950.0, &sections).unwrap().id, "tail");
    }

    #[test]
    fn zero_height_never_matches() {
        let t = ViewportTracker::new(0.0);
        let sections = vec![Section::new("empty", 100.0, 0.0)];
        assert!(t.active_section(100.0, &sections).is_none());
    }
}
