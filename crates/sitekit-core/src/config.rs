#![forbid(unsafe_code)]

//! Site-wide tuning constants with environment overrides.
//!
//! Defaults match the values the page markup and stylesheet were designed
//! around. Each field can be overridden through an environment variable:
//!
//! | Variable | Field | Unit |
//! |---|---|---|
//! | `SITEKIT_SCROLL_OFFSET` | `scroll_offset` | px |
//! | `SITEKIT_LOOK_AHEAD` | `look_ahead` | px |
//! | `SITEKIT_AUTOPLAY_MS` | `autoplay_interval` | ms |
//! | `SITEKIT_SCROLL_THROTTLE_MS` | `scroll_throttle` | ms |
//! | `SITEKIT_HEADER_THRESHOLD` | `header_scrolled_threshold` | px |
//! | `SITEKIT_REVEAL_MARGIN` | `reveal_margin` | px |
//! | `SITEKIT_COUNTER_MS` | `counter_duration` | ms |

use std::fmt;
use std::time::Duration;

pub const ENV_SCROLL_OFFSET: &str = "SITEKIT_SCROLL_OFFSET";
pub const ENV_LOOK_AHEAD: &str = "SITEKIT_LOOK_AHEAD";
pub const ENV_AUTOPLAY_MS: &str = "SITEKIT_AUTOPLAY_MS";
pub const ENV_SCROLL_THROTTLE_MS: &str = "SITEKIT_SCROLL_THROTTLE_MS";
pub const ENV_HEADER_THRESHOLD: &str = "SITEKIT_HEADER_THRESHOLD";
pub const ENV_REVEAL_MARGIN: &str = "SITEKIT_REVEAL_MARGIN";
pub const ENV_COUNTER_MS: &str = "SITEKIT_COUNTER_MS";

/// Configuration error raised while reading overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The value could not be parsed as a number.
    InvalidNumber { key: &'static str, value: String },
    /// The value parsed but is outside the accepted range.
    OutOfRange { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber { key, value } => {
                write!(f, "{key}: expected a number, got {value:?}")
            }
            Self::OutOfRange { key, value } => write!(f, "{key}: value {value} is out of range"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Tuning constants shared by the navigation, carousel and reveal components.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SiteConfig {
    /// Height of the fixed header; anchor jumps land this far above a section.
    /// Default: 80px
    pub scroll_offset: f64,

    /// Extra distance below the header used when probing for the active section.
    /// Default: 50px
    pub look_ahead: f64,

    /// Period of carousel autoplay.
    /// Default: 5000ms
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub autoplay_interval: Duration,

    /// Minimum spacing between handled scroll events.
    /// Default: 100ms
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub scroll_throttle: Duration,

    /// Scroll distance after which the header switches to its compact style.
    /// Default: 50px
    pub header_scrolled_threshold: f64,

    /// Tolerance around the viewport when deciding if an element is visible.
    /// Default: 100px
    pub reveal_margin: f64,

    /// Total run time of the statistics count-up.
    /// Default: 2000ms
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub counter_duration: Duration,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            scroll_offset: 80.0,
            look_ahead: 50.0,
            autoplay_interval: Duration::from_millis(5000),
            scroll_throttle: Duration::from_millis(100),
            header_scrolled_threshold: 50.0,
            reveal_margin: 100.0,
            counter_duration: Duration::from_millis(2000),
        }
    }
}

impl SiteConfig {
    /// Distance added to the scroll position when probing for the active section.
    #[inline]
    #[must_use]
    pub fn probe_offset(&self) -> f64 {
        self.scroll_offset + self.look_ahead
    }

    /// Defaults with process environment overrides applied.
    ///
    /// Malformed overrides are logged and skipped.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides from a custom lookup (for tests).
    ///
    /// Malformed overrides are logged and skipped.
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        for err in config.apply_overrides(&get_env) {
            tracing::warn!(error = %err, "ignoring configuration override");
        }
        config
    }

    /// Strict variant of [`from_env_with`](Self::from_env_with): the first
    /// malformed override is returned as an error.
    pub fn try_from_env_with<F>(get_env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        match config.apply_overrides(&get_env).into_iter().next() {
            Some(err) => Err(err),
            None => Ok(config),
        }
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.autoplay_interval.is_zero() {
            return Err(ConfigError::OutOfRange {
                key: ENV_AUTOPLAY_MS,
                value: "0".to_owned(),
            });
        }
        if self.counter_duration.is_zero() {
            return Err(ConfigError::OutOfRange {
                key: ENV_COUNTER_MS,
                value: "0".to_owned(),
            });
        }
        for (key, value) in [
            (ENV_SCROLL_OFFSET, self.scroll_offset),
            (ENV_LOOK_AHEAD, self.look_ahead),
            (ENV_HEADER_THRESHOLD, self.header_scrolled_threshold),
            (ENV_REVEAL_MARGIN, self.reveal_margin),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::OutOfRange {
                    key,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    fn apply_overrides<F>(&mut self, get_env: &F) -> Vec<ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut errors = Vec::new();

        let mut px = |key: &'static str, slot: &mut f64| match parse_px(key, get_env(key)) {
            Ok(Some(v)) => *slot = v,
            Ok(None) => {}
            Err(e) => errors.push(e),
        };
        px(ENV_SCROLL_OFFSET, &mut self.scroll_offset);
        px(ENV_LOOK_AHEAD, &mut self.look_ahead);
        px(ENV_HEADER_THRESHOLD, &mut self.header_scrolled_threshold);
        px(ENV_REVEAL_MARGIN, &mut self.reveal_margin);

        let mut ms = |key: &'static str, slot: &mut Duration, allow_zero: bool| {
            match parse_ms(key, get_env(key), allow_zero) {
                Ok(Some(v)) => *slot = v,
                Ok(None) => {}
                Err(e) => errors.push(e),
            }
        };
        ms(ENV_AUTOPLAY_MS, &mut self.autoplay_interval, false);
        ms(ENV_SCROLL_THROTTLE_MS, &mut self.scroll_throttle, true);
        ms(ENV_COUNTER_MS, &mut self.counter_duration, false);

        errors
    }
}

fn parse_px(key: &'static str, raw: Option<String>) -> Result<Option<f64>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            value: raw.clone(),
        })?;
    if !value.is_finite() {
        return Err(ConfigError::OutOfRange { key, value: raw });
    }
    Ok(Some(value))
}

fn parse_ms(
    key: &'static str,
    raw: Option<String>,
    allow_zero: bool,
) -> Result<Option<Duration>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let value: u64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            value: raw.clone(),
        })?;
    if value == 0 && !allow_zero {
        return Err(ConfigError::OutOfRange { key, value: raw });
    }
    Ok(Some(Duration::from_millis(value)))
}

#[cfg(feature = "serde")]
mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis().min(u128::from(u64::MAX)) as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
