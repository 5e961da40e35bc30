#![forbid(unsafe_code)]

//! Page description and layout measurements shipped by the host as JSON.
//!
//! ```json
//! {
//!   "nav_targets": ["home", "about", "contact"],
//!   "slide_count": 3,
//!   "sections": [{"id": "home", "top": 0, "height": 500}],
//!   "reveal": [{"id": "card-1", "top": 900, "height": 240}],
//!   "stats": {
//!     "block": {"id": "stats", "top": 1600, "height": 300},
//!     "counters": [{"id": "beds", "target": 250}]
//!   },
//!   "viewport_height": 800,
//!   "config": {"autoplay_interval": 5000}
//! }
//! ```
//!
//! Every field is optional. Section bounds must be finite with a
//! non-negative height.

use serde::{Deserialize, Serialize};
use sitekit_core::config::SiteConfig;
use sitekit_core::viewport::Section;

use crate::PageError;

const DEFAULT_VIEWPORT_HEIGHT: f64 = 800.0;

/// Everything a page program needs at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSetup {
    /// Section identifiers of the navigation links, in menu order.
    pub nav_targets: Vec<String>,
    /// Number of testimonial slides.
    pub slide_count: usize,
    /// Tracked sections in document order.
    pub sections: Vec<Section>,
    /// Elements animated on first appearance.
    pub reveal: Vec<Section>,
    /// Statistics block with count-up counters.
    pub stats: Option<StatsSetup>,
    /// Initial viewport height, in px.
    pub viewport_height: f64,
    pub config: SiteConfig,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            nav_targets: Vec::new(),
            slide_count: 0,
            sections: Vec::new(),
            reveal: Vec::new(),
            stats: None,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            config: SiteConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSetup {
    pub block: Section,
    pub counters: Vec<CounterSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSpec {
    pub id: String,
    pub target: u64,
}

/// Decode a section list (a layout pass result).
pub fn parse_sections(json: &str) -> Result<Vec<Section>, PageError> {
    let sections: Vec<Section> = serde_json::from_str(json)?;
    validate_sections(&sections)?;
    Ok(sections)
}

/// Decode and validate a full page description.
pub fn parse_setup(json: &str) -> Result<PageSetup, PageError> {
    let setup: PageSetup = serde_json::from_str(json)?;
    setup.validate()?;
    Ok(setup)
}

impl PageSetup {
    /// Check bounds and configuration.
    pub fn validate(&self) -> Result<(), PageError> {
        validate_sections(&self.sections)?;
        validate_sections(&self.reveal)?;
        if let Some(stats) = &self.stats {
            validate_sections(std::slice::from_ref(&stats.block))?;
        }
        if !self.viewport_height.is_finite() || self.viewport_height < 0.0 {
            return Err(PageError::Layout(format!(
                "viewport height {} is not a valid size",
                self.viewport_height
            )));
        }
        self.config.validate()?;
        Ok(())
    }
}

fn validate_sections(sections: &[Section]) -> Result<(), PageError> {
    for s in sections {
        if !s.top.is_finite() || !s.height.is_finite() {
            return Err(PageError::Layout(format!("section {:?} has non-finite bounds", s.id)));
        }
        if s.height < 0.0 {
            return Err(PageError::Layout(format!(
                "section {:?} has negative height {}",
                s.id, s.height
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn parses_sections() {
        let json = r#"[
            {"id": "home", "top": 0, "height": 500},
            {"id": "about", "top": 500, "height": 400}
        ]"#;
        let sections = parse_sections(json).unwrap();
        assert_eq!(
            sections,
            vec![Section::new("home", 0.0, 500.0), Section::new("about", 500.0, 400.0)]
        );
    }

    #[test]
    fn rejects_negative_height() {
        let err = parse_sections(r#"[{"id":"x","top":0,"height":-1}]"#).unwrap_err();
        assert_eq!(err, PageError::Layout("section \"x\" has negative height -1".into()));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(parse_sections("[{]"), Err(PageError::Layout(_))));
        assert!(matches!(
            parse_sections(r#"[{"id":"x","top":0}]"#),
            Err(PageError::Layout(_))
        ));
    }

    #[test]
    fn setup_defaults_fill_missing_fields() {
        let json = r#"{"slide_count": 3, "config": {"autoplay_interval": 3000}}"#;
        let setup = parse_setup(json).unwrap();
        assert_eq!(setup.slide_count, 3);
        assert!(setup.nav_targets.is_empty());
        assert_eq!(setup.viewport_height, 800.0);
        assert_eq!(setup.config.autoplay_interval, Duration::from_millis(3000));
        assert_eq!(setup.config.scroll_offset, 80.0);
    }

    #[test]
    fn setup_with_stats() {
        let setup = parse_setup(
            r#"{
                "stats": {
                    "block": {"id": "stats", "top": 1600, "height": 300},
                    "counters": [{"id": "beds", "target": 250}]
                }
            }"#,
        )
        .unwrap();
        let stats = setup.stats.unwrap();
        assert_eq!(stats.block.id, "stats");
        assert_eq!(
            stats.counters,
            vec![CounterSpec {
                id: "beds".into(),
                target: 250
            }]
        );
    }

    #[test]
    fn setup_rejects_zero_autoplay() {
        let err = parse_setup(r#"{"config": {"autoplay_interval": 0}}"#).unwrap_err();
        assert!(matches!(err, PageError::Config(_)));
    }
}
