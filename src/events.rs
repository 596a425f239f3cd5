use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::systems::combat::Weapon;

/// Commands derived from the input snapshot. They never outlive the tick that produced them.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum GameCommand {
    Start,
    TogglePause,
    SwitchWeapon,
    Attack { target: Vec2 },
}

/// Discrete notifications for audio and UI collaborators. They carry no obligation back into the simulation.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    SessionStarted,
    Paused,
    Resumed,
    AttackFired { weapon: Weapon },
    WeaponSwitched { weapon: Weapon },
    ZombieKilled { position: Vec2 },
    BossSpawned { position: Vec2 },
    BossKilled { position: Vec2 },
    HealthPackSpawned { position: Vec2 },
    HealthPackCollected { health: f32 },
    LevelUp { level: u32 },
    DifficultyIncreased { escalations: u32 },
    GameOver { score: u32 },
}

/// The independent periodic producers that run on their own wall-clock cadence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Difficulty,
    HealthPack,
    Boss,
}
