#![forbid(unsafe_code)]

//! Testimonial carousel rotation.
//!
//! [`SlideRotator`] keeps exactly one of N slides visible and advances it on a
//! fixed autoplay interval. The interval timer is an explicit resource taken
//! from a host [`Scheduler`]; the rotator holds at most one live [`TimerId`]
//! at any time.
//!
//! # State machine
//!
//! ```text
//!            start()                     hover_leave()
//!   Stopped ─────────► Running    Stopped ─────────────► Running
//!      ▲                  │          ▲                       │
//!      └──── stop() ──────┘          └──── hover_enter() ────┘
//! ```
//!
//! `go_to`, `next` and `prev` are valid in both states and never touch the
//! timer. A click therefore advances immediately while the autoplay cadence
//! continues from the last `start()`, so a tick can land shortly after a
//! click and advance a second time.
//!
//! # Invariants
//!
//! 1. `current < len` whenever `len >= 1`; indices wrap (Euclidean) both ways.
//! 2. Every transition emits a single `set_slide_active`, so no "all inactive"
//!    state is observable.
//! 3. `start()` cancels the previous timer before scheduling a new one.
//! 4. `stop()` is idempotent.
//! 5. With `len == 0` the rotator is inert: no timer, no effects.

use std::time::Duration;

use crate::surface::Surface;
use crate::timer::{Scheduler, TimerId};

/// Autoplay state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationPhase {
    /// No timer is live.
    Stopped,
    /// An autoplay timer is live.
    Running,
}

/// Rotates the active slide among `len` slides.
#[derive(Debug, Clone)]
pub struct SlideRotator {
    len: usize,
    current: usize,
    interval: Duration,
    timer: Option<TimerId>,
}

impl SlideRotator {
    /// Create a rotator over `len` slides and start autoplay.
    ///
    /// Slide 0 is activated immediately. With `len == 0` nothing is emitted
    /// and no timer is scheduled.
    pub fn new(
        len: usize,
        interval: Duration,
        scheduler: &mut dyn Scheduler,
        surface: &mut dyn Surface,
    ) -> Self {
        let mut rotator = Self {
            len,
            current: 0,
            interval,
            timer: None,
        };
        if rotator.is_inert() {
            tracing::debug!("carousel has no slides; rotation disabled");
            return rotator;
        }
        surface.set_slide_active(0);
        rotator.start(scheduler);
        rotator
    }

    /// Number of slides.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the rotator ignores every call (no slides).
    #[inline]
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.is_empty()
    }

    /// Index of the visible slide.
    #[inline]
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    #[inline]
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Handle of the live autoplay timer.
    #[inline]
    #[must_use]
    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    #[must_use]
    pub fn phase(&self) -> RotationPhase {
        if self.timer.is_some() {
            RotationPhase::Running
        } else {
            RotationPhase::Stopped
        }
    }

    /// Whether autoplay is paused (hover or explicit stop).
    #[must_use]
    pub fn is_paused(&self) -> bool {
        !self.is_inert() && self.timer.is_none()
    }

    /// Show slide `index` modulo `len`.
    pub fn go_to(&mut self, index: i64, surface: &mut dyn Surface) {
        if self.is_inert() {
            return;
        }
        let len = i64::try_from(self.len).unwrap_or(i64::MAX);
        // rem_euclid keeps the result in [0, len).
        let next = index.rem_euclid(len) as usize;
        if next != self.current {
            tracing::trace!(from = self.current, to = next, "slide change");
        }
        self.current = next;
        surface.set_slide_active(next);
    }

    /// Show the following slide, wrapping to the first.
    pub fn next(&mut self, surface: &mut dyn Surface) {
        self.go_to(self.current as i64 + 1, surface);
    }

    /// Show the preceding slide, wrapping to the last.
    pub fn prev(&mut self, surface: &mut dyn Surface) {
        self.go_to(self.current as i64 - 1, surface);
    }

    /// (Re)start autoplay with a fresh timer.
    pub fn start(&mut self, scheduler: &mut dyn Scheduler) {
        if self.is_inert() {
            return;
        }
        self.stop(scheduler);
        let id = scheduler.schedule_every(self.interval);
        tracing::debug!(
            timer_id = id.raw(),
            interval_ms = self.interval.as_millis() as u64,
            "autoplay started"
        );
        self.timer = Some(id);
    }

    /// Cancel autoplay. Calling this while stopped does nothing.
    pub fn stop(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(id) = self.timer.take() {
            scheduler.cancel(id);
            tracing::debug!(timer_id = id.raw(), "autoplay stopped");
        }
    }

    /// Pointer entered the carousel: pause autoplay.
    pub fn hover_enter(&mut self, scheduler: &mut dyn Scheduler) {
        self.stop(scheduler);
    }

    /// Pointer left the carousel: resume autoplay with a fresh timer.
    pub fn hover_leave(&mut self, scheduler: &mut dyn Scheduler) {
        self.start(scheduler);
    }

    /// Handle a timer expiry reported by the host.
    ///
    /// Advances one slide when `id` is the live autoplay timer; expiries from
    /// any other handle are ignored. Returns whether the slide advanced.
    pub fn on_timer(&mut self, id: TimerId, surface: &mut dyn Surface) -> bool {
        if self.timer != Some(id) {
            tracing::trace!(timer_id = id.raw(), "ignoring stale autoplay tick");
            return false;
        }
        self.next(surface);
        true
    }
}
