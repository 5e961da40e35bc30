#![forbid(unsafe_code)]

//! Scroll-triggered entrance effects.
//!
//! - [`ScrollReveal`] reveals each tracked element once, the first time it
//!   fits inside the viewport (with a tolerance margin).
//! - [`CounterGroup`] runs a one-shot count-up over the statistics block the
//!   first time that block is in view, one step per animation frame.
//!
//! Both take document-space bounds (a [`Section`]) and convert them to
//! viewport space with the current scroll position.

use std::time::Duration;

use crate::surface::Surface;
use crate::timer::{Scheduler, TimerId};
use crate::viewport::Section;

/// Nominal animation frame period used by the count-up.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Whether `bounds` lies within the viewport, allowing `margin` px of
/// overhang above the top and below the bottom edge.
#[must_use]
pub fn in_viewport(bounds: &Section, scroll_y: f64, viewport_height: f64, margin: f64) -> bool {
    let top = bounds.top - scroll_y;
    let bottom = top + bounds.height;
    top >= -margin && bottom <= viewport_height + margin
}

#[derive(Debug, Clone)]
struct RevealTarget {
    bounds: Section,
    revealed: bool,
}

/// Reveals elements once as they scroll into view.
#[derive(Debug, Clone)]
pub struct ScrollReveal {
    margin: f64,
    targets: Vec<RevealTarget>,
}

impl ScrollReveal {
    #[must_use]
    pub fn new(targets: Vec<Section>, margin: f64) -> Self {
        Self {
            margin,
            targets: targets
                .into_iter()
                .map(|bounds| RevealTarget {
                    bounds,
                    revealed: false,
                })
                .collect(),
        }
    }

    /// Reveal every pending element now in view. Returns how many were revealed.
    pub fn check(
        &mut self,
        scroll_y: f64,
        viewport_height: f64,
        surface: &mut dyn Surface,
    ) -> usize {
        let mut revealed = 0;
        for target in self.targets.iter_mut().filter(|t| !t.revealed) {
            if in_viewport(&target.bounds, scroll_y, viewport_height, self.margin) {
                target.revealed = true;
                surface.reveal(&target.bounds.id);
                revealed += 1;
            }
        }
        if revealed > 0 {
            tracing::trace!(revealed, pending = self.pending(), "scroll reveal");
        }
        revealed
    }

    /// Elements not yet revealed.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.targets.iter().filter(|t| !t.revealed).count()
    }

    #[must_use]
    pub fn is_revealed(&self, id: &str) -> bool {
        self.targets.iter().any(|t| t.revealed && t.bounds.id == id)
    }
}

/// One animated statistic.
#[derive(Debug, Clone)]
pub struct Counter {
    id: String,
    target: u64,
    step: f64,
    current: f64,
    frames_left: u32,
    done: bool,
}

impl Counter {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn target(&self) -> u64 {
        self.target
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }

    fn frame(&mut self, surface: &mut dyn Surface) {
        if self.done {
            return;
        }
        self.current += self.step;
        self.frames_left = self.frames_left.saturating_sub(1);
        // The frame budget bounds float drift on targets that do not divide evenly.
        if self.current < self.target as f64 && self.frames_left > 0 {
            surface.set_counter(&self.id, self.current.floor() as u64);
        } else {
            self.done = true;
            surface.set_counter(&self.id, self.target);
        }
    }
}

/// Lifecycle of the count-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterState {
    /// Waiting for the statistics block to come into view.
    Idle,
    /// Frames are being produced.
    Running,
    /// Every counter shows its target. Never restarts.
    Finished,
}

/// Count-up animation for the statistics block.
#[derive(Debug, Clone)]
pub struct CounterGroup {
    block: Section,
    margin: f64,
    counters: Vec<Counter>,
    state: CounterState,
    timer: Option<TimerId>,
}

impl CounterGroup {
    /// Create a group for the counters inside `block`.
    ///
    /// Each counter advances by `target / (duration / 16ms)` per frame.
    pub fn new<I, S>(block: Section, counters: I, duration: Duration, margin: f64) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let frames = (duration.as_secs_f64() / FRAME_INTERVAL.as_secs_f64()).max(1.0);
        Self {
            block,
            margin,
            counters: counters
                .into_iter()
                .map(|(id, target)| Counter {
                    id: id.into(),
                    target,
                    step: target as f64 / frames,
                    current: 0.0,
                    frames_left: frames.ceil() as u32,
                    done: false,
                })
                .collect(),
            state: CounterState::Idle,
            timer: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> CounterState {
        self.state
    }

    #[must_use]
    pub fn counters(&self) -> &[Counter] {
        &self.counters
    }

    /// Live frame timer, while running.
    #[must_use]
    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Start the count-up if the block is in view and it has not run yet.
    ///
    /// The first frame is produced immediately. Returns whether it started.
    pub fn check(
        &mut self,
        scroll_y: f64,
        viewport_height: f64,
        scheduler: &mut dyn Scheduler,
        surface: &mut dyn Surface,
    ) -> bool {
        if self.state != CounterState::Idle
            || !in_viewport(&self.block, scroll_y, viewport_height, self.margin)
        {
            return false;
        }
        tracing::debug!(counters = self.counters.len(), "statistics count-up started");
        self.state = CounterState::Running;
        self.timer = Some(scheduler.schedule_every(FRAME_INTERVAL));
        self.frame(scheduler, surface);
        true
    }

    /// Handle a frame timer expiry. Returns whether the group is still running.
    pub fn on_timer(
        &mut self,
        id: TimerId,
        scheduler: &mut dyn Scheduler,
        surface: &mut dyn Surface,
    ) -> bool {
        if self.timer != Some(id) {
            return false;
        }
        self.frame(scheduler, surface);
        self.state == CounterState::Running
    }

    fn frame(&mut self, scheduler: &mut dyn Scheduler, surface: &mut dyn Surface) {
        for counter in &mut self.counters {
            counter.frame(surface);
        }
        if self.counters.iter().all(Counter::is_done) {
            if let Some(id) = self.timer.take() {
                scheduler.cancel(id);
            }
            self.state = CounterState::Finished;
            tracing::debug!("statistics count-up finished");
        }
    }
}
