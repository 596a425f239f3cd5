use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Query, Res};
use glam::Vec2;
use tracing::trace;

use crate::constants::hostile::{AGGRO_RADIUS, IDLE_RADIUS};
use crate::systems::{Behavior, Boss, Collider, Health, PlayerControlled, Position, SafeZone, Speed, Zombie};

/// Hysteresis between the aggro and idle radii. Inside the band, the current behavior holds.
pub fn next_behavior(current: Behavior, distance: f32) -> Behavior {
    if distance < AGGRO_RADIUS {
        Behavior::Aggro
    } else if distance > IDLE_RADIUS {
        Behavior::Idle
    } else {
        current
    }
}

/// The displacement of one step of `speed` from `from` toward `to`. Zero when the two coincide.
pub fn pursuit_step(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    (to - from).normalize_or_zero() * speed
}

/// Updates zombie behavior and moves aggressive zombies toward the player.
///
/// A step that would end inside the enforced safe zone is skipped.
pub fn zombie_steering_system(
    zone: Res<SafeZone>,
    player: Query<&Position, With<PlayerControlled>>,
    mut zombies: Query<(&mut Position, &mut Behavior, &Collider, &Speed, &Health), (With<Zombie>, Without<PlayerControlled>)>,
) {
    let Ok(target) = player.single() else {
        return;
    };

    for (mut position, mut behavior, collider, speed, health) in zombies.iter_mut() {
        let next = next_behavior(*behavior, position.0.distance(target.0));
        if next != *behavior {
            trace!(from = ?*behavior, to = ?next, "Zombie behavior changed");
            *behavior = next;
        }

        if *behavior != Behavior::Aggro || !health.is_alive() {
            continue;
        }

        let destination = position.0 + pursuit_step(position.0, target.0, speed.0);
        if zone.blocks(&collider.bounds(destination)) {
            continue;
        }
        position.0 = destination;
    }
}

/// Moves the boss toward the player every tick, undoing any step that lands in the enforced safe zone.
pub fn boss_steering_system(
    zone: Res<SafeZone>,
    player: Query<&Position, With<PlayerControlled>>,
    mut bosses: Query<(&mut Position, &Collider, &Speed, &Health), (With<Boss>, Without<PlayerControlled>)>,
) {
    let Ok(target) = player.single() else {
        return;
    };

    for (mut position, collider, speed, health) in bosses.iter_mut() {
        if !health.is_alive() {
            continue;
        }

        let step = pursuit_step(position.0, target.0, speed.0);
        position.0 += step;
        if zone.blocks(&collider.bounds(position.0)) {
            position.0 -= step;
        }
    }
}
