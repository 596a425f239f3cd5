//! The spawn director: zombie respawns, the boss singleton, and difficulty escalation.

use bevy_ecs::{
    event::{EventReader, EventWriter},
    query::With,
    resource::Resource,
    system::{Commands, Query, Res, ResMut},
};
use glam::Vec2;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use tracing::{debug, warn};

use crate::constants::{hostile, spawn, timers};
use crate::events::{GameEvent, TimerKind};
use crate::systems::collision::Aabb;
use crate::systems::{
    Arena, Boss, BossBundle, PlayerControlled, Position, SafeZone, Speed, TimerFired, Zombie, ZombieBundle,
};

/// The session's random source. Seeded from the configuration when a seed is given.
#[derive(Resource, Debug, Clone)]
pub struct SimRng(pub SmallRng);

impl SimRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(SmallRng::seed_from_u64(seed)),
            None => Self(SmallRng::from_rng(&mut rand::rng())),
        }
    }
}

/// Tick-driven spawn counters.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SpawnDirector {
    /// Ticks until the next zombie. A zombie spawns on the tick this is at or below zero.
    pub zombie_countdown: f32,
    /// Ticks removed from every freshly rolled respawn interval.
    pub interval_reduction: f32,
    /// Ticks until the tick counter requests a boss.
    pub boss_countdown: u32,
}

impl Default for SpawnDirector {
    fn default() -> Self {
        Self {
            zombie_countdown: 0.0,
            interval_reduction: 0.0,
            boss_countdown: spawn::BOSS_TICK_INTERVAL,
        }
    }
}

impl SpawnDirector {
    /// Rolls a fresh respawn interval, shortened by escalation and floored.
    pub fn roll_interval(&self, rng: &mut impl Rng) -> f32 {
        let base = rng.random_range(spawn::ZOMBIE_INTERVAL_MIN..spawn::ZOMBIE_INTERVAL_MAX);
        (base - self.interval_reduction).max(spawn::ZOMBIE_INTERVAL_FLOOR)
    }

    /// Applies one difficulty escalation to the respawn schedule.
    pub fn escalate(&mut self) {
        self.interval_reduction += timers::RESPAWN_INTERVAL_STEP;
        if self.zombie_countdown > spawn::ZOMBIE_INTERVAL_FLOOR {
            self.zombie_countdown = (self.zombie_countdown - timers::RESPAWN_INTERVAL_STEP).max(spawn::ZOMBIE_INTERVAL_FLOOR);
        }
    }
}

/// How many times difficulty has escalated this session.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Difficulty {
    pub escalations: u32,
}

/// Picks a top-left position for a hostile of `size` at least `min_distance` from `player`.
///
/// Sampling is bounded. When every attempt fails, the corner of the sampling area farthest from
/// the player is used; configuration validation guarantees that corner is far enough.
pub fn find_spawn_point(
    rng: &mut impl Rng,
    arena: &Arena,
    zone: &SafeZone,
    player: Vec2,
    size: f32,
    min_distance: f32,
) -> Vec2 {
    let area = (arena.size - Vec2::splat(size)).max(Vec2::ZERO);

    for _ in 0..spawn::MAX_PLACEMENT_ATTEMPTS {
        let candidate = Vec2::new(rng.random_range(0.0..=area.x), rng.random_range(0.0..=area.y));
        if candidate.distance(player) >= min_distance && !zone.blocks(&Aabb::new(candidate, Vec2::splat(size))) {
            return candidate;
        }
    }

    let fallback = [Vec2::ZERO, Vec2::new(area.x, 0.0), Vec2::new(0.0, area.y), area]
        .into_iter()
        .max_by(|a, b| a.distance_squared(player).total_cmp(&b.distance_squared(player)))
        .unwrap_or_default();
    warn!(?fallback, min_distance, "Spawn sampling exhausted, using farthest corner");
    fallback
}

/// Counts down the respawn timer and places a zombie when it runs out.
pub fn zombie_spawn_system(
    mut commands: Commands,
    mut director: ResMut<SpawnDirector>,
    mut rng: ResMut<SimRng>,
    arena: Res<Arena>,
    zone: Res<SafeZone>,
    player: Query<&Position, With<PlayerControlled>>,
) {
    if director.zombie_countdown > 0.0 {
        director.zombie_countdown -= 1.0;
        return;
    }
    let Ok(player) = player.single() else {
        return;
    };

    let position = find_spawn_point(
        &mut rng.0,
        &arena,
        &zone,
        player.0,
        hostile::ZOMBIE_SIZE,
        spawn::ZOMBIE_MIN_DISTANCE,
    );
    commands.spawn(ZombieBundle::new(position));
    director.zombie_countdown = director.roll_interval(&mut rng.0);
    debug!(?position, next = director.zombie_countdown, "Zombie spawned");
}

/// Spawns the boss when either the tick counter or the wall-clock timer asks for one.
///
/// Both producers target the same singleton; a request while a boss lives does nothing.
#[allow(clippy::too_many_arguments)]
pub fn boss_spawn_system(
    mut commands: Commands,
    mut director: ResMut<SpawnDirector>,
    mut fired: EventReader<TimerFired>,
    mut rng: ResMut<SimRng>,
    arena: Res<Arena>,
    zone: Res<SafeZone>,
    player: Query<&Position, With<PlayerControlled>>,
    bosses: Query<(), With<Boss>>,
    mut events: EventWriter<GameEvent>,
) {
    let mut requested = fired.read().any(|timer| timer.0 == TimerKind::Boss);
    if director.boss_countdown == 0 {
        director.boss_countdown = spawn::BOSS_TICK_INTERVAL;
        requested = true;
    } else {
        director.boss_countdown -= 1;
    }

    if !requested {
        return;
    }
    if !bosses.is_empty() {
        debug!("Boss spawn requested while one is alive");
        return;
    }
    let Ok(player) = player.single() else {
        return;
    };

    let position = find_spawn_point(
        &mut rng.0,
        &arena,
        &zone,
        player.0,
        hostile::BOSS_SIZE,
        spawn::BOSS_MIN_DISTANCE,
    );
    commands.spawn(BossBundle::new(position));
    events.write(GameEvent::BossSpawned { position });
    debug!(?position, "Boss spawned");
}

/// Speeds up every live zombie and shortens respawns each time the difficulty timer fires.
pub fn difficulty_system(
    mut fired: EventReader<TimerFired>,
    mut difficulty: ResMut<Difficulty>,
    mut director: ResMut<SpawnDirector>,
    mut zombies: Query<&mut Speed, With<Zombie>>,
    mut events: EventWriter<GameEvent>,
) {
    for _ in fired.read().filter(|timer| timer.0 == TimerKind::Difficulty) {
        difficulty.escalations += 1;
        director.escalate();
        for mut speed in zombies.iter_mut() {
            speed.0 += timers::ZOMBIE_SPEED_STEP;
        }

        debug!(
            escalations = difficulty.escalations,
            reduction = director.interval_reduction,
            "Difficulty increased"
        );
        events.write(GameEvent::DifficultyIncreased {
            escalations: difficulty.escalations,
        });
    }
}
