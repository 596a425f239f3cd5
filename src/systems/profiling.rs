use bevy_ecs::system::IntoSystem;
use bevy_ecs::world::World;
use bevy_ecs::{resource::Resource, system::System};
use circular_buffer::CircularBuffer;
use parking_lot::Mutex;
use smallvec::SmallVec;
use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{EnumCount, EnumIter, IntoStaticStr};

/// The maximum number of systems that can be profiled.
const MAX_SYSTEMS: usize = SystemId::COUNT;
/// Ticks of history kept per system.
const TIMING_WINDOW_SIZE: usize = 30;
/// A single system at or above this on one tick is always blamed for a slow tick.
const SLOW_SYSTEM_THRESHOLD: Duration = Duration::from_millis(2);

/// A timing buffer that tracks durations and automatically inserts zero durations for skipped ticks.
#[derive(Debug, Default)]
pub struct TimingBuffer {
    buffer: CircularBuffer<TIMING_WINDOW_SIZE, Duration>,
    /// The last tick when this buffer was updated
    last_tick: u64,
}

impl TimingBuffer {
    /// Adds a timing duration for the current tick. Timings from an earlier tick are ignored.
    pub fn add_timing(&mut self, duration: Duration, current_tick: u64) {
        if current_tick < self.last_tick {
            return;
        }

        // Systems gated off by the session state leave gaps; count them as free
        if current_tick > self.last_tick {
            for _ in 0..current_tick - self.last_tick - 1 {
                self.buffer.push_back(Duration::ZERO);
            }
        }

        self.buffer.push_back(duration);
        self.last_tick = current_tick;
    }

    pub fn get_most_recent_timing(&self) -> Duration {
        self.buffer.back().copied().unwrap_or(Duration::ZERO)
    }

    /// Sample mean and standard deviation of the durations in the window.
    pub fn get_stats(&self) -> (Duration, Duration) {
        let samples = self.buffer.len();
        if samples == 0 {
            return (Duration::ZERO, Duration::ZERO);
        }

        let mean = self.buffer.iter().map(Duration::as_secs_f32).sum::<f32>() / samples as f32;
        let variance = if samples > 1 {
            let squared_error: f32 = self
                .buffer
                .iter()
                .map(|duration| (duration.as_secs_f32() - mean).powi(2))
                .sum();
            squared_error / (samples - 1) as f32
        } else {
            0.0
        };

        (Duration::from_secs_f32(mean), Duration::from_secs_f32(variance.sqrt()))
    }
}

/// The number of ticks the schedule has run, shared by every profiled system.
#[derive(Resource, Debug, Default)]
pub struct Timing {
    current_tick: AtomicU64,
}

impl Timing {
    pub fn get_current_tick(&self) -> u64 {
        self.current_tick.load(Ordering::Relaxed)
    }

    /// Increments the tick counter and returns the new value
    pub fn increment_tick(&self) -> u64 {
        self.current_tick.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[derive(EnumCount, EnumIter, IntoStaticStr, Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum SystemId {
    Total,
    Input,
    Session,
    Timers,
    PlayerMovement,
    Steering,
    Weapons,
    Bullets,
    Contact,
    Items,
    Lifetime,
    Deaths,
    Progression,
    Spawn,
    GameOver,
}

impl Display for SystemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Into::<&'static str>::into(self).to_ascii_lowercase())
    }
}

#[derive(Resource, Debug)]
pub struct SystemTimings {
    /// One window per [`SystemId`], filled up front.
    pub timings: micromap::Map<SystemId, Mutex<TimingBuffer>, MAX_SYSTEMS>,
}

impl Default for SystemTimings {
    fn default() -> Self {
        let mut timings = micromap::Map::new();

        for id in SystemId::iter() {
            timings.insert(id, Mutex::new(TimingBuffer::default()));
        }
        Self { timings }
    }
}

impl SystemTimings {
    pub fn add_timing(&self, id: SystemId, duration: Duration, current_tick: u64) {
        if let Some(buffer) = self.timings.get(&id) {
            buffer.lock().add_timing(duration, current_tick);
        }
    }

    /// Records the duration of the whole schedule run.
    pub fn add_total_timing(&self, duration: Duration, current_tick: u64) {
        self.add_timing(SystemId::Total, duration, current_tick);
    }

    pub fn get_stats(&self) -> micromap::Map<SystemId, (Duration, Duration), MAX_SYSTEMS> {
        let mut stats = micromap::Map::new();
        for (id, buffer) in self.timings.iter() {
            stats.insert(*id, buffer.lock().get_stats());
        }
        stats
    }

    /// Returns the systems most likely responsible for a slow tick.
    ///
    /// Any system taking 2ms or more on the most recent tick is reported. Otherwise,
    /// systems are taken from the slowest until 30% of the tick is covered, at most five.
    pub fn get_slowest_systems(&self) -> SmallVec<[(SystemId, Duration); 5]> {
        let mut recent: SmallVec<[(SystemId, Duration); MAX_SYSTEMS]> = SystemId::iter()
            .filter(|id| *id != SystemId::Total)
            .filter_map(|id| self.timings.get(&id).map(|buffer| (id, buffer.lock().get_most_recent_timing())))
            .collect();
        recent.sort_by(|a, b| b.1.cmp(&a.1));

        let heavy: SmallVec<[(SystemId, Duration); 5]> = recent
            .iter()
            .copied()
            .filter(|(_, duration)| *duration >= SLOW_SYSTEM_THRESHOLD)
            .take(5)
            .collect();
        if !heavy.is_empty() {
            return heavy;
        }

        let share = recent.iter().map(|(_, duration)| *duration).sum::<Duration>().mul_f64(0.3);
        let mut covered = Duration::ZERO;
        let mut culprits = SmallVec::new();
        for (id, duration) in recent.into_iter().take(5) {
            culprits.push((id, duration));
            covered += duration;
            if covered >= share {
                break;
            }
        }
        culprits
    }
}

/// Wraps a system so every run is timed into [`SystemTimings`] under `id`.
pub fn profile<S, M>(id: SystemId, system: S) -> impl FnMut(&mut World)
where
    S: IntoSystem<(), (), M> + 'static,
{
    let mut system: S::System = IntoSystem::into_system(system);
    let mut ready = false;
    move |world: &mut World| {
        if !ready {
            system.initialize(world);
            ready = true;
        }

        let start = Instant::now();
        system.run((), world);
        let elapsed = start.elapsed();

        if let (Some(timings), Some(timing)) = (world.get_resource::<SystemTimings>(), world.get_resource::<Timing>()) {
            timings.add_timing(id, elapsed, timing.get_current_tick());
        }
    }
}
