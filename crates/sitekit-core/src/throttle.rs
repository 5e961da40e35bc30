#![forbid(unsafe_code)]

//! Leading-edge throttling for high-frequency signals.
//!
//! Browsers fire scroll events at display rate. [`Throttle`] admits the first
//! event of a burst and drops everything else until the window has elapsed;
//! dropped events are not replayed. The caller supplies the current
//! monotonic time so the throttle works under any clock.
//!
//! ```
//! use sitekit_core::throttle::Throttle;
//! use std::time::Duration;
//!
//! let mut t = Throttle::new(Duration::from_millis(100));
//! assert!(t.admit(Duration::from_millis(0)));
//! assert!(!t.admit(Duration::from_millis(50)));
//! assert!(t.admit(Duration::from_millis(100)));
//! ```

use std::time::Duration;

/// Drops calls arriving within `window` of the last admitted one.
#[derive(Debug, Clone, Default)]
pub struct Throttle {
    window: Duration,
    reopens_at: Option<Duration>,
    dropped: u64,
}

impl Throttle {
    /// Create a throttle with the given window. A zero window admits everything.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            reopens_at: None,
            dropped: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Whether a call at `now` should run.
    pub fn admit(&mut self, now: Duration) -> bool {
        if let Some(reopens_at) = self.reopens_at
            && now < reopens_at
        {
            self.dropped += 1;
            return false;
        }
        self.reopens_at = Some(now.saturating_add(self.window));
        true
    }

    /// Forget the current window so the next call is admitted.
    pub fn reset(&mut self) {
        self.reopens_at = None;
    }

    /// Number of calls dropped since creation (diagnostic).
    #[inline]
    #[must_use]
    pub fn dropped_count(&self) -> u64 {
        self.dropped
    }
}
