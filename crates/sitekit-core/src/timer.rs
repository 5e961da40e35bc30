#![forbid(unsafe_code)]

//! Host timer primitives.
//!
//! Components that need periodic work ask a [`Scheduler`] for an interval and
//! receive an opaque [`TimerId`]. The host later reports each expiry back to
//! the owning component, which compares the id with the one it holds and
//! ignores anything stale.
//!
//! [`VirtualScheduler`] is a deterministic implementation driven by explicit
//! time advancement. It backs the host-driven page program and every timer
//! test in this workspace.

use std::time::Duration;

/// Opaque handle for a scheduled interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Wrap a raw host handle.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw host handle.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Schedule and cancel repeating timers.
pub trait Scheduler {
    /// Fire every `period` until cancelled. The first expiry is one period from now.
    fn schedule_every(&mut self, period: Duration) -> TimerId;

    /// Cancel `id`. Cancelling an unknown or already cancelled id is a no-op.
    fn cancel(&mut self, id: TimerId);
}

/// Shortest period the virtual scheduler accepts.
const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
struct Interval {
    id: TimerId,
    period: Duration,
    due: Duration,
    fired_at: Option<Duration>,
}

/// Deterministic scheduler with a host-controlled monotonic clock.
///
/// Expiries are delivered by [`pop_due`](Self::pop_due) in deadline order
/// (ties broken by creation order). Missed periods are not replayed: an
/// interval that fell behind fires once and re-arms one period after the
/// current time, like a browser `setInterval` after the tab wakes up.
#[derive(Debug, Default, Clone)]
pub struct VirtualScheduler {
    now: Duration,
    next_id: u64,
    intervals: Vec<Interval>,
}

impl VirtualScheduler {
    /// Create a scheduler whose clock starts at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current monotonic time.
    #[inline]
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Advance the clock by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Set the clock to `now`. Moving backwards is ignored.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Number of live intervals.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.intervals.len()
    }

    /// Whether `id` is still scheduled.
    #[must_use]
    pub fn is_live(&self, id: TimerId) -> bool {
        self.intervals.iter().any(|i| i.id == id)
    }

    /// Next deadline across all live intervals.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.intervals.iter().map(|i| i.due).min()
    }

    /// Take the earliest expiry at or before the current time.
    ///
    /// Each interval fires at most once per clock reading. It is re-armed one
    /// period after its deadline, or one period after now when that deadline
    /// is already past.
    pub fn pop_due(&mut self) -> Option<TimerId> {
        let now = self.now;
        let slot = self
            .intervals
            .iter_mut()
            .filter(|i| i.due <= now && i.fired_at != Some(now))
            .min_by_key(|i| (i.due, i.id))?;
        let next = slot.due.saturating_add(slot.period);
        slot.due = if next <= now {
            now.saturating_add(slot.period)
        } else {
            next
        };
        slot.fired_at = Some(now);
        Some(slot.id)
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule_every(&mut self, period: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let period = period.max(MIN_PERIOD);
        self.intervals.push(Interval {
            id,
            period,
            due: self.now.saturating_add(period),
            fired_at: None,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.intervals.retain(|i| i.id != id);
    }
}
