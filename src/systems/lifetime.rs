use bevy_ecs::{
    component::Component,
    entity::Entity,
    system::{Commands, Query, Res},
};
use tracing::trace;

use crate::systems::DeltaTime;

/// Ticks an entity has left before it is removed. Carried by health packs.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeToLive {
    pub remaining_ticks: u32,
}

impl TimeToLive {
    pub fn new(ticks: u32) -> Self {
        Self { remaining_ticks: ticks }
    }
}

/// Counts lifetimes down by the tick delta and removes entities whose lifetime ran out.
pub fn time_to_live_system(mut commands: Commands, dt: Res<DeltaTime>, mut query: Query<(Entity, &mut TimeToLive)>) {
    for (entity, mut ttl) in query.iter_mut() {
        if ttl.remaining_ticks <= dt.ticks {
            trace!(?entity, "Lifetime expired");
            commands.entity(entity).despawn();
        } else {
            ttl.remaining_ticks -= dt.ticks;
        }
    }
}
