//! Read-only views of the simulation for renderers and other observers.

use bevy_ecs::query::With;
use bevy_ecs::world::World;
use glam::Vec2;

use crate::systems::{
    Arena, Arsenal, Behavior, Boss, Bullet, Collider, Difficulty, Experience, Health, HealthPack, PlayerControlled,
    Position, SafeZone, ScoreResource, SessionState, SpawnDirector, Stamina, TimeToLive, Timing, Weapon, Zombie,
};

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub position: Vec2,
    pub size: f32,
    /// Never below zero.
    pub health: f32,
    pub stamina: f32,
    pub max_stamina: f32,
    pub weapon: Option<Weapon>,
    pub inventory: Vec<Weapon>,
    pub cooldown: u32,
    /// Nonzero while the player should be drawn highlighted.
    pub flash: u32,
    pub level: u32,
    pub experience: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostileView {
    pub position: Vec2,
    pub size: f32,
    pub health: f32,
    /// The boss is always pursuing.
    pub behavior: Behavior,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthPackView {
    pub position: Vec2,
    pub size: f32,
    pub remaining_ticks: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafeZoneView {
    pub position: Vec2,
    pub size: Vec2,
    pub active: bool,
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldSnapshot {
    pub state: SessionState,
    pub tick: u64,
    pub score: u32,
    pub escalations: u32,
    /// Ticks until the tick-driven boss request, for countdown and "incoming" displays.
    pub boss_countdown: u32,
    pub arena: Vec2,
    pub safe_zone: SafeZoneView,
    pub player: Option<PlayerView>,
    pub zombies: Vec<HostileView>,
    pub boss: Option<HostileView>,
    pub bullets: Vec<Vec2>,
    pub health_packs: Vec<HealthPackView>,
}

impl WorldSnapshot {
    pub fn capture(world: &mut World) -> Self {
        let player = world
            .query_filtered::<(&Position, &Collider, &Health, &Stamina, &Arsenal, &Experience), With<PlayerControlled>>()
            .iter(world)
            .next()
            .map(|(position, collider, health, stamina, arsenal, experience)| PlayerView {
                position: position.0,
                size: collider.size,
                health: health.displayed(),
                stamina: stamina.current,
                max_stamina: stamina.max,
                weapon: arsenal.active_weapon(),
                inventory: arsenal.inventory.to_vec(),
                cooldown: arsenal.cooldown,
                flash: arsenal.flash,
                level: experience.level,
                experience: experience.points,
            });

        let zombies = world
            .query_filtered::<(&Position, &Collider, &Health, &Behavior), With<Zombie>>()
            .iter(world)
            .map(|(position, collider, health, behavior)| HostileView {
                position: position.0,
                size: collider.size,
                health: health.displayed(),
                behavior: *behavior,
            })
            .collect();

        let boss = world
            .query_filtered::<(&Position, &Collider, &Health), With<Boss>>()
            .iter(world)
            .next()
            .map(|(position, collider, health)| HostileView {
                position: position.0,
                size: collider.size,
                health: health.displayed(),
                behavior: Behavior::Aggro,
            });

        let bullets = world
            .query_filtered::<&Position, With<Bullet>>()
            .iter(world)
            .map(|position| position.0)
            .collect();

        let health_packs = world
            .query_filtered::<(&Position, &Collider, &TimeToLive), With<HealthPack>>()
            .iter(world)
            .map(|(position, collider, ttl)| HealthPackView {
                position: position.0,
                size: collider.size,
                remaining_ticks: ttl.remaining_ticks,
            })
            .collect();

        let safe_zone = world.get_resource::<SafeZone>().map(|zone| SafeZoneView {
            position: zone.bounds.min,
            size: zone.bounds.size(),
            active: zone.active,
        });

        Self {
            state: world.get_resource::<SessionState>().copied().unwrap_or_default(),
            tick: world.get_resource::<Timing>().map_or(0, Timing::get_current_tick),
            score: world.get_resource::<ScoreResource>().map_or(0, |score| score.0),
            escalations: world.get_resource::<Difficulty>().map_or(0, |difficulty| difficulty.escalations),
            boss_countdown: world
                .get_resource::<SpawnDirector>()
                .map_or(0, |director| director.boss_countdown),
            arena: world.get_resource::<Arena>().map_or(Vec2::ZERO, |arena| arena.size),
            safe_zone: safe_zone.unwrap_or(SafeZoneView {
                position: Vec2::ZERO,
                size: Vec2::ZERO,
                active: false,
            }),
            player,
            zombies,
            boss,
            bullets,
            health_packs,
        }
    }
}
