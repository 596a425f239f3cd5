//! Health packs: placement, pickup, and healing.

use bevy_ecs::{
    entity::Entity,
    event::{EventReader, EventWriter},
    query::{With, Without},
    system::{Commands, Query, Res, ResMut},
};
use glam::Vec2;
use rand::Rng;
use tracing::{debug, warn};

use crate::constants::{player, spawn};
use crate::events::{GameEvent, TimerKind};
use crate::systems::collision::{check_collision, Aabb};
use crate::systems::{
    Arena, Collider, Health, HealthPack, HealthPackBundle, PlayerControlled, Position, SafeZone, SimRng, TimerFired,
};

/// Samples a spot for a health pack that does not touch the safe zone, active or not.
///
/// Returns `None` when sampling is exhausted.
pub fn find_pack_point(rng: &mut impl Rng, arena: &Arena, zone: &SafeZone) -> Option<Vec2> {
    let size = Vec2::splat(spawn::HEALTH_PACK_SIZE);
    let area = (arena.size - size).max(Vec2::ZERO);

    (0..spawn::MAX_PLACEMENT_ATTEMPTS)
        .map(|_| Vec2::new(rng.random_range(0.0..=area.x), rng.random_range(0.0..=area.y)))
        .find(|candidate| !zone.bounds.overlaps(&Aabb::new(*candidate, size)))
}

pub fn health_pack_spawn_system(
    mut commands: Commands,
    mut fired: EventReader<TimerFired>,
    mut rng: ResMut<SimRng>,
    arena: Res<Arena>,
    zone: Res<SafeZone>,
    mut events: EventWriter<GameEvent>,
) {
    for _ in fired.read().filter(|timer| timer.0 == TimerKind::HealthPack) {
        let Some(position) = find_pack_point(&mut rng.0, &arena, &zone) else {
            warn!("No room for a health pack, skipping");
            continue;
        };

        commands.spawn(HealthPackBundle::new(position));
        events.write(GameEvent::HealthPackSpawned { position });
        debug!(?position, "Health pack spawned");
    }
}

/// Heals a live player touching a health pack, capped at full health, and removes the pack.
pub fn health_pack_collection_system(
    mut commands: Commands,
    mut players: Query<(&Position, &Collider, &mut Health), With<PlayerControlled>>,
    packs: Query<(Entity, &Position, &Collider), (With<HealthPack>, Without<PlayerControlled>)>,
    mut events: EventWriter<GameEvent>,
) {
    let Ok((player_position, player_collider, mut health)) = players.single_mut() else {
        return;
    };

    for (entity, position, collider) in packs.iter() {
        if !health.is_alive() || !check_collision(player_position, player_collider, position, collider) {
            continue;
        }

        health.0 = (health.0 + spawn::HEALTH_PACK_HEAL).min(player::MAX_HEALTH);
        commands.entity(entity).despawn();
        events.write(GameEvent::HealthPackCollected { health: health.0 });
        debug!(health = health.0, "Health pack collected");
    }
}
