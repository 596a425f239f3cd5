//! Wall-clock periodic producers and the queue that serializes them into the tick.
//!
//! Timers never touch entities. A firing, whether produced by [`interval_timer_system`] or pushed
//! by a host thread through a [`TimerQueue`] handle, waits in the queue until
//! [`drain_timer_queue_system`] turns it into a [`TimerFired`] event at the start of the update set.

use std::collections::VecDeque;
use std::sync::Arc;

use bevy_ecs::{
    event::{Event, EventWriter},
    resource::Resource,
    system::{Res, ResMut},
};
use parking_lot::Mutex;
use tracing::trace;

use crate::constants::timers;
use crate::events::TimerKind;
use crate::systems::DeltaTime;

/// A timer firing, delivered to the systems that react to it during the tick it was drained.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerFired(pub TimerKind);

/// Cloneable, thread-safe handle to the pending timer firings.
#[derive(Resource, Clone, Debug, Default)]
pub struct TimerQueue {
    pending: Arc<Mutex<VecDeque<TimerKind>>>,
}

impl TimerQueue {
    pub fn push(&self, kind: TimerKind) {
        self.pending.lock().push_back(kind);
    }

    /// Removes and returns every pending firing, oldest first.
    pub fn drain(&self) -> Vec<TimerKind> {
        self.pending.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalTimer {
    pub kind: TimerKind,
    /// Seconds between firings.
    pub period: f32,
    /// Seconds accumulated toward the next firing.
    pub elapsed: f32,
}

impl IntervalTimer {
    pub fn new(kind: TimerKind, period: f32) -> Self {
        Self {
            kind,
            period,
            elapsed: 0.0,
        }
    }

    /// Accumulates `seconds` and returns how many periods completed.
    ///
    /// Non-finite or negative durations count as zero, so the accumulator always stays finite.
    pub fn advance(&mut self, seconds: f32) -> u32 {
        if seconds.is_finite() && seconds > 0.0 {
            self.elapsed += seconds;
        }
        if self.elapsed < self.period {
            return 0;
        }

        let fired = (self.elapsed / self.period).floor();
        self.elapsed %= self.period;
        fired as u32
    }
}

/// The session's wall-clock timers. They only advance while the session runs.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct IntervalTimers(pub [IntervalTimer; 3]);

impl Default for IntervalTimers {
    fn default() -> Self {
        Self([
            IntervalTimer::new(TimerKind::Difficulty, timers::DIFFICULTY_PERIOD),
            IntervalTimer::new(TimerKind::HealthPack, timers::HEALTH_PACK_PERIOD),
            IntervalTimer::new(TimerKind::Boss, timers::BOSS_PERIOD),
        ])
    }
}

pub fn interval_timer_system(dt: Res<DeltaTime>, mut intervals: ResMut<IntervalTimers>, queue: Res<TimerQueue>) {
    for timer in intervals.0.iter_mut() {
        for _ in 0..timer.advance(dt.seconds) {
            trace!(kind = ?timer.kind, "Interval timer fired");
            queue.push(timer.kind);
        }
    }
}

pub fn drain_timer_queue_system(queue: Res<TimerQueue>, mut events: EventWriter<TimerFired>) {
    for kind in queue.drain() {
        events.write(TimerFired(kind));
    }
}
