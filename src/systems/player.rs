use bevy_ecs::{
    query::With,
    system::{Query, Res},
};

use crate::constants::player;
use crate::systems::{Arena, Collider, InputSnapshot, PlayerControlled, Position, Stamina};

/// Chooses the player's speed for this tick and updates stamina accordingly.
///
/// Running needs stamina left; regeneration only happens while the run button is released.
pub fn apply_stamina(stamina: &mut Stamina, running: bool) -> f32 {
    let speed = if running && stamina.current > 0.0 {
        stamina.current -= player::STAMINA_DRAIN;
        player::RUN_SPEED
    } else {
        if !running && stamina.current < stamina.max {
            stamina.current += player::STAMINA_REGEN;
        }
        player::NORMAL_SPEED
    };

    stamina.current = stamina.current.clamp(0.0, stamina.max);
    speed
}

pub fn player_movement_system(
    input: Res<InputSnapshot>,
    arena: Res<Arena>,
    mut players: Query<(&mut Position, &mut Stamina, &Collider), With<PlayerControlled>>,
) {
    for (mut position, mut stamina, collider) in players.iter_mut() {
        let speed = apply_stamina(&mut stamina, input.running());
        let target = position.0 + input.movement_intent() * speed;
        position.0 = arena.clamp(target, collider.size);
    }
}
