//! A scripted player for headless runs: starts the session, kites the nearest hostile and shoots it.

use glam::Vec2;

use crate::snapshot::{HostileView, WorldSnapshot};
use crate::systems::{Buttons, InputSnapshot, SessionState, Weapon};

/// Hostiles closer than this make the autopilot back off.
const FLEE_DISTANCE: f32 = 220.0;
/// Hostiles closer than this make the autopilot run, stamina permitting.
const PANIC_DISTANCE: f32 = 120.0;
const RUN_STAMINA_RESERVE: f32 = 30.0;
/// Below this health, the nearest health pack takes priority over fleeing.
const HEAL_THRESHOLD: f32 = 60.0;

#[derive(Debug, Default, Clone)]
pub struct Autopilot {
    ticks: u64,
}

impl Autopilot {
    /// Decides the input for the next tick from the current state of the world.
    pub fn next_input(&mut self, snapshot: &WorldSnapshot) -> InputSnapshot {
        self.ticks += 1;

        match snapshot.state {
            SessionState::NotStarted => return InputSnapshot::new(Buttons::START, Vec2::ZERO),
            SessionState::Paused => return InputSnapshot::new(Buttons::PAUSE, Vec2::ZERO),
            SessionState::GameOver => return InputSnapshot::default(),
            SessionState::Running => {}
        }
        let Some(player) = &snapshot.player else {
            return InputSnapshot::default();
        };

        let center = player.position + Vec2::splat(player.size / 2.0);
        let mut buttons = Buttons::empty();
        let mut pointer = center;

        // Fists need contact, which the autopilot avoids
        if player.weapon == Some(Weapon::Fists) {
            buttons |= Buttons::SWITCH_WEAPON;
        }

        let nearest = snapshot
            .zombies
            .iter()
            .chain(snapshot.boss.iter())
            .map(|hostile| (hostile_center(hostile), hostile))
            .min_by(|(a, _), (b, _)| a.distance_squared(center).total_cmp(&b.distance_squared(center)));

        if let Some((target, _)) = nearest {
            pointer = target;
            buttons |= Buttons::ATTACK;

            let distance = target.distance(center);
            if distance < FLEE_DISTANCE {
                buttons |= directional_buttons(center - target);
            }
            if distance < PANIC_DISTANCE && player.stamina > RUN_STAMINA_RESERVE {
                buttons |= Buttons::RUN;
            }
        }

        if player.health < HEAL_THRESHOLD {
            let pack = snapshot
                .health_packs
                .iter()
                .map(|pack| pack.position + Vec2::splat(pack.size / 2.0))
                .min_by(|a, b| a.distance_squared(center).total_cmp(&b.distance_squared(center)));
            if let Some(pack) = pack {
                buttons -= Buttons::UP | Buttons::DOWN | Buttons::LEFT | Buttons::RIGHT;
                buttons |= directional_buttons(pack - center);
            }
        }

        InputSnapshot::new(buttons, pointer)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

fn hostile_center(hostile: &HostileView) -> Vec2 {
    hostile.position + Vec2::splat(hostile.size / 2.0)
}

/// Movement buttons pushing along `direction`, ignoring axes it barely moves on.
fn directional_buttons(direction: Vec2) -> Buttons {
    let mut buttons = Buttons::empty();
    if direction.x > 1.0 {
        buttons |= Buttons::RIGHT;
    } else if direction.x < -1.0 {
        buttons |= Buttons::LEFT;
    }
    if direction.y > 1.0 {
        buttons |= Buttons::DOWN;
    } else if direction.y < -1.0 {
        buttons |= Buttons::UP;
    }
    buttons
}
