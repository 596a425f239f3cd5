use bevy_ecs::{
    component::Component,
    query::{Or, With, Without},
    system::{Query, Res, ResMut},
};
use tracing::{debug, info};

use crate::constants::{player, progression};
use crate::systems::{Arena, Boss, Collider, Health, PlayerControlled, Position, SafeZone, Stamina, Zombie};

/// Level and experience toward the next level.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Experience {
    pub level: u32,
    pub points: u32,
}

impl Experience {
    /// Adds experience, carrying the excess over each threshold. Returns the number of levels gained.
    pub fn gain(&mut self, amount: u32) -> u32 {
        self.points += amount;
        let mut gained = 0;
        while self.points >= progression::EXPERIENCE_PER_LEVEL {
            self.points -= progression::EXPERIENCE_PER_LEVEL;
            self.level += 1;
            gained += 1;
        }
        gained
    }
}

/// Applies the rewards of a single level-up.
pub fn level_up_rewards(health: &mut Health, stamina: &mut Stamina) {
    health.0 = (health.0 + progression::LEVEL_UP_HEAL).min(player::MAX_HEALTH);
    stamina.max += progression::LEVEL_UP_STAMINA;
}

/// Enforces the safe zone once the player has reached the required level.
pub fn safe_zone_activation_system(player: Query<&Experience, With<PlayerControlled>>, mut zone: ResMut<SafeZone>) {
    let Ok(experience) = player.single() else {
        return;
    };

    let active = experience.level >= progression::SAFE_ZONE_LEVEL;
    if active != zone.active {
        info!(level = experience.level, "Safe zone activated");
        zone.active = active;
    }
}

/// Pushes hostiles that already stand inside an enforced safe zone out to its nearest edge.
///
/// Steering keeps hostiles from walking in, so this only matters on the tick the zone activates.
pub fn safe_zone_eviction_system(
    zone: Res<SafeZone>,
    arena: Res<Arena>,
    mut hostiles: Query<(&mut Position, &Collider), (Or<(With<Zombie>, With<Boss>)>, Without<PlayerControlled>)>,
) {
    let Some(bounds) = zone.enforced() else {
        return;
    };

    for (mut position, collider) in hostiles.iter_mut() {
        if let Some(exit) = bounds.exit_position(position.0, collider.size, &arena) {
            debug!(from = ?position.0, to = ?exit, "Evicted hostile from safe zone");
            position.0 = exit;
        }
    }
}
