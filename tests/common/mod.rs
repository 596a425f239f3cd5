#![allow(dead_code)]

use bevy_ecs::{
    entity::Entity,
    event::{EventRegistry, Events},
    world::World,
};
use glam::Vec2;
use horde::{
    config::SessionConfig,
    events::{GameCommand, GameEvent, TimerKind},
    systems::{
        Arena, BossBundle, Buttons, DeltaTime, Difficulty, InputSnapshot, IntervalTimers, PlayerBundle, SafeZone,
        ScoreResource, SessionState, SimRng, SpawnDirector, TimerFired, TimerQueue, ZombieBundle,
    },
};

pub const TEST_SEED: u64 = 0x5eed;

/// A world holding every resource the gameplay systems expect, already running.
pub fn create_test_world() -> World {
    let mut world = World::default();

    EventRegistry::register_event::<GameCommand>(&mut world);
    EventRegistry::register_event::<GameEvent>(&mut world);
    EventRegistry::register_event::<TimerFired>(&mut world);

    let arena = Arena::new(1280.0, 720.0);
    world.insert_resource(SafeZone::centered(&arena));
    world.insert_resource(arena);
    world.insert_resource(SessionState::Running);
    world.insert_resource(InputSnapshot::default());
    world.insert_resource(DeltaTime::from_ticks(1));
    world.insert_resource(ScoreResource(0));
    world.insert_resource(SpawnDirector::default());
    world.insert_resource(Difficulty::default());
    world.insert_resource(IntervalTimers::default());
    world.insert_resource(TimerQueue::default());
    world.insert_resource(SimRng::new(Some(TEST_SEED)));

    world
}

pub fn spawn_test_player(world: &mut World, position: Vec2) -> Entity {
    world.spawn(PlayerBundle::new(position)).id()
}

pub fn spawn_test_zombie(world: &mut World, position: Vec2) -> Entity {
    world.spawn(ZombieBundle::new(position)).id()
}

pub fn spawn_test_boss(world: &mut World, position: Vec2) -> Entity {
    world.spawn(BossBundle::new(position)).id()
}

pub fn activate_safe_zone(world: &mut World) {
    world.resource_mut::<SafeZone>().active = true;
}

/// Replaces any pending commands with the given ones.
pub fn send_commands(world: &mut World, commands: impl IntoIterator<Item = GameCommand>) {
    let mut events = world.resource_mut::<Events<GameCommand>>();
    events.clear();
    for command in commands {
        events.send(command);
    }
}

pub fn send_command(world: &mut World, command: GameCommand) {
    send_commands(world, [command]);
}

/// Replaces any pending timer firings with the given one.
pub fn fire_timer(world: &mut World, kind: TimerKind) {
    let mut events = world.resource_mut::<Events<TimerFired>>();
    events.clear();
    events.send(TimerFired(kind));
}

pub fn drain_game_events(world: &mut World) -> Vec<GameEvent> {
    world.resource_mut::<Events<GameEvent>>().drain().collect()
}

pub fn pending_commands(world: &mut World) -> Vec<GameCommand> {
    world.resource_mut::<Events<GameCommand>>().drain().collect()
}

/// A valid configuration with a fixed seed and no zombies at creation.
pub fn test_config() -> SessionConfig {
    SessionConfig {
        seed: Some(TEST_SEED),
        initial_zombies: 0,
        ..Default::default()
    }
}

pub fn press(buttons: Buttons) -> InputSnapshot {
    InputSnapshot::new(buttons, Vec2::ZERO)
}

pub fn aim(buttons: Buttons, pointer: Vec2) -> InputSnapshot {
    InputSnapshot::new(buttons, pointer)
}

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}
