//! The session facade: owns the world, builds the schedule, and advances it one tick at a time.

use std::time::{Duration, Instant};

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::world::World;
use tracing::{debug, info, trace, warn};

use crate::config::SessionConfig;
use crate::constants::{hostile, spawn};
use crate::error::GameResult;
use crate::events::{GameCommand, GameEvent};
use crate::snapshot::WorldSnapshot;
use crate::systems::{
    self, find_spawn_point, profile, Arena, DeltaTime, Difficulty, InputSnapshot, IntervalTimers, PlayerBundle, SafeZone,
    ScoreResource, SessionState, SimRng, SpawnDirector, SystemId, SystemTimings, TimerFired, TimerQueue, Timing,
    ZombieBundle,
};

/// System sets for the tick pipeline, run in declaration order
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum GameplaySet {
    /// Turns the input snapshot into commands and drives the session state machine. Always runs.
    Input,
    /// Movement, combat, and pickups
    Update,
    /// Deaths, progression, spawning, and the terminal check
    Respond,
}

/// A single survival session built on the Bevy ECS.
///
/// All simulation state lives in `world`; `schedule` advances it by exactly one tick per
/// [`Game::tick`] call. Nothing in here blocks, and nothing else holds a copy of the state.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
    config: SessionConfig,
}

impl Game {
    /// Validates the configuration and builds a fresh session, waiting for its start command.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Config` when the arena cannot host the session, for instance when no
    /// spawn point far enough from the player is guaranteed to exist.
    pub fn new(config: SessionConfig) -> GameResult<Game> {
        info!(
            width = config.arena_width,
            height = config.arena_height,
            seed = ?config.seed,
            "Creating session"
        );
        config.validate()?;

        let mut world = World::default();
        let mut schedule = Schedule::default();

        Self::setup_ecs(&mut world);
        Self::insert_resources(&mut world, &config);
        Self::configure_schedule(&mut schedule);
        Self::spawn_entities(&mut world, &config);

        Ok(Game { world, schedule, config })
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<GameCommand>(world);
        EventRegistry::register_event::<GameEvent>(world);
        EventRegistry::register_event::<TimerFired>(world);
    }

    fn insert_resources(world: &mut World, config: &SessionConfig) {
        let arena = Arena::new(config.arena_width, config.arena_height);

        world.insert_resource(SafeZone::centered(&arena));
        world.insert_resource(arena);
        world.insert_resource(config.clone());
        world.insert_resource(SessionState::default());
        world.insert_resource(InputSnapshot::default());
        world.insert_resource(DeltaTime { seconds: 0.0, ticks: 0 });
        world.insert_resource(ScoreResource(0));
        world.insert_resource(SpawnDirector::default());
        world.insert_resource(Difficulty::default());
        world.insert_resource(IntervalTimers::default());
        world.insert_resource(TimerQueue::default());
        world.insert_resource(SimRng::new(config.seed));
        world.insert_resource(SystemTimings::default());
        world.insert_resource(Timing::default());
    }

    fn configure_schedule(schedule: &mut Schedule) {
        let input_system = profile(SystemId::Input, systems::input_system);
        let session_system = profile(SystemId::Session, systems::handle_session_command);
        let interval_timer_system = profile(SystemId::Timers, systems::interval_timer_system);
        let drain_timer_queue_system = profile(SystemId::Timers, systems::drain_timer_queue_system);
        let player_movement_system = profile(SystemId::PlayerMovement, systems::player_movement_system);
        let zombie_steering_system = profile(SystemId::Steering, systems::zombie_steering_system);
        let boss_steering_system = profile(SystemId::Steering, systems::boss_steering_system);
        let weapon_switch_system = profile(SystemId::Weapons, systems::weapon_switch_system);
        let attack_system = profile(SystemId::Weapons, systems::attack_system);
        let bullet_system = profile(SystemId::Bullets, systems::bullet_system);
        let contact_damage_system = profile(SystemId::Contact, systems::contact_damage_system);
        let health_pack_collection_system = profile(SystemId::Items, systems::health_pack_collection_system);
        let time_to_live_system = profile(SystemId::Lifetime, systems::time_to_live_system);
        let death_system = profile(SystemId::Deaths, systems::death_system);
        let safe_zone_activation_system = profile(SystemId::Progression, systems::safe_zone_activation_system);
        let safe_zone_eviction_system = profile(SystemId::Progression, systems::safe_zone_eviction_system);
        let difficulty_system = profile(SystemId::Spawn, systems::difficulty_system);
        let zombie_spawn_system = profile(SystemId::Spawn, systems::zombie_spawn_system);
        let boss_spawn_system = profile(SystemId::Spawn, systems::boss_spawn_system);
        let health_pack_spawn_system = profile(SystemId::Spawn, systems::health_pack_spawn_system);
        let cooldown_system = profile(SystemId::Weapons, systems::cooldown_system);
        let game_over_system = profile(SystemId::GameOver, systems::game_over_system);

        schedule
            .add_systems((
                (input_system, session_system).chain().in_set(GameplaySet::Input),
                (
                    interval_timer_system,
                    drain_timer_queue_system,
                    player_movement_system,
                    zombie_steering_system,
                    boss_steering_system,
                    weapon_switch_system,
                    attack_system,
                    bullet_system,
                    contact_damage_system,
                    health_pack_collection_system,
                    time_to_live_system,
                )
                    .chain()
                    .in_set(GameplaySet::Update),
                (
                    death_system,
                    safe_zone_activation_system,
                    safe_zone_eviction_system,
                    difficulty_system,
                    zombie_spawn_system,
                    boss_spawn_system,
                    health_pack_spawn_system,
                    cooldown_system,
                    game_over_system,
                )
                    .chain()
                    .in_set(GameplaySet::Respond),
            ))
            .configure_sets(
                (
                    GameplaySet::Input,
                    GameplaySet::Update.run_if(systems::session_running),
                    GameplaySet::Respond.run_if(systems::session_running),
                )
                    .chain(),
            );
    }

    fn spawn_entities(world: &mut World, config: &SessionConfig) {
        let arena = *world.resource::<Arena>();
        let zone = *world.resource::<SafeZone>();
        let origin = arena.center();

        let player = world.spawn(PlayerBundle::new(origin)).id();
        debug!(?player, position = ?origin, "Player spawned");

        for _ in 0..config.initial_zombies {
            let position = {
                let mut rng = world.resource_mut::<SimRng>();
                find_spawn_point(
                    &mut rng.0,
                    &arena,
                    &zone,
                    origin,
                    hostile::ZOMBIE_SIZE,
                    spawn::ZOMBIE_MIN_DISTANCE,
                )
            };
            world.spawn(ZombieBundle::new(position));
            trace!(?position, "Initial zombie spawned");
        }
    }

    /// Advances the simulation by one tick.
    ///
    /// Installs `input` and the delta time, runs the schedule once, discards the tick's commands
    /// and timer firings, and returns the game events emitted along the way. While the session is
    /// not running, only the session state machine reacts to the input.
    ///
    /// # Arguments
    ///
    /// * `dt` - Wall-clock seconds this tick stands for; drives the periodic timers
    /// * `input` - The input captured for this tick
    pub fn tick(&mut self, dt: f32, input: InputSnapshot) -> Vec<GameEvent> {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!(dt, "Ignoring unusable tick duration");
            0.0
        };
        self.world.insert_resource(DeltaTime { seconds: dt, ticks: 1 });
        self.world.insert_resource(input);

        let start = Instant::now();
        self.schedule.run(&mut self.world);
        let total_duration = start.elapsed();

        if let Some(mut commands) = self.world.get_resource_mut::<Events<GameCommand>>() {
            commands.clear();
        }
        if let Some(mut fired) = self.world.get_resource_mut::<Events<TimerFired>>() {
            fired.clear();
        }

        if let (Some(timings), Some(timing)) = (
            self.world.get_resource::<SystemTimings>(),
            self.world.get_resource::<Timing>(),
        ) {
            let new_tick = timing.increment_tick();
            timings.add_total_timing(total_duration, new_tick);

            let tick_budget = Duration::try_from_secs_f32(dt * 1.2).unwrap_or(Duration::MAX);
            if !tick_budget.is_zero() && total_duration > tick_budget {
                let stats = timings.get_stats();
                let (average, deviation) = stats.get(&SystemId::Total).copied().unwrap_or_default();
                let slowest_systems = timings.get_slowest_systems();
                let systems_context = if slowest_systems.is_empty() {
                    "No specific systems identified".to_string()
                } else {
                    slowest_systems
                        .iter()
                        .map(|(id, duration)| {
                            let (mean, _) = stats.get(id).copied().unwrap_or_default();
                            format!("{id} ({duration:.2?}, avg {mean:.2?})")
                        })
                        .collect::<Vec<String>>()
                        .join(", ")
                };

                warn!(
                    total = format!("{:.3?}", total_duration),
                    average = format!("{:.3?}", average),
                    deviation = format!("{:.3?}", deviation),
                    tick = new_tick,
                    systems = systems_context,
                    budget = format!("{:.1?}", tick_budget),
                    "Tick took longer than expected"
                );
            }
        }

        self.world
            .get_resource_mut::<Events<GameEvent>>()
            .map(|mut events| events.drain().collect())
            .unwrap_or_default()
    }

    pub fn snapshot(&mut self) -> WorldSnapshot {
        WorldSnapshot::capture(&mut self.world)
    }

    pub fn state(&self) -> SessionState {
        self.world.get_resource::<SessionState>().copied().unwrap_or_default()
    }

    pub fn score(&self) -> u32 {
        self.world.get_resource::<ScoreResource>().map_or(0, |score| score.0)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// A handle through which other threads may request timer firings.
    ///
    /// Firings are applied at the next running tick boundary. The handle stays valid across
    /// [`Game::reset`].
    pub fn timer_handle(&self) -> TimerQueue {
        self.world.get_resource::<TimerQueue>().cloned().unwrap_or_default()
    }

    /// Discards the whole session and builds a fresh one from the same configuration.
    ///
    /// Pending timer firings are dropped, but existing [`TimerQueue`] handles keep working.
    pub fn reset(&mut self) -> GameResult<()> {
        info!(state = ?self.state(), score = self.score(), "Resetting session");
        let queue = self.timer_handle();
        queue.drain();

        let mut fresh = Game::new(self.config.clone())?;
        fresh.world.insert_resource(queue);
        *self = fresh;
        Ok(())
    }
}
