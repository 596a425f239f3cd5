use bevy_ecs::{event::EventWriter, resource::Resource, system::Res};
use bitflags::bitflags;
use glam::Vec2;

use crate::events::GameCommand;
use crate::systems::SessionState;

bitflags! {
    /// Buttons held or pressed during the tick the snapshot was taken.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Buttons: u16 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const RUN = 1 << 4;
        const ATTACK = 1 << 5;
        const SWITCH_WEAPON = 1 << 6;
        const PAUSE = 1 << 7;
        const START = 1 << 8;
    }
}

/// Normalized input for a single tick, produced by whatever captures the raw devices.
///
/// `ATTACK`, `SWITCH_WEAPON`, `PAUSE` and `START` are edge-triggered: the capture layer sets them
/// only on the tick the press happened.
#[derive(Resource, Default, Clone, Copy, Debug, PartialEq)]
pub struct InputSnapshot {
    pub buttons: Buttons,
    /// Where the pointer is, in arena coordinates.
    pub pointer: Vec2,
}

impl InputSnapshot {
    pub fn new(buttons: Buttons, pointer: Vec2) -> Self {
        Self { buttons, pointer }
    }

    /// Per-axis movement intent. Diagonals are not normalized.
    pub fn movement_intent(&self) -> Vec2 {
        let axis = |negative: Buttons, positive: Buttons| {
            (self.buttons.contains(positive) as i8 - self.buttons.contains(negative) as i8) as f32
        };
        Vec2::new(axis(Buttons::LEFT, Buttons::RIGHT), axis(Buttons::UP, Buttons::DOWN))
    }

    pub fn running(&self) -> bool {
        self.buttons.contains(Buttons::RUN)
    }
}

/// Turns the snapshot's edge-triggered buttons into commands.
///
/// Gameplay commands are only produced while the session is running, so nothing issued during a
/// pause can fire once it resumes.
pub fn input_system(input: Res<InputSnapshot>, state: Res<SessionState>, mut writer: EventWriter<GameCommand>) {
    let buttons = input.buttons;

    if buttons.contains(Buttons::START) && *state == SessionState::NotStarted {
        writer.write(GameCommand::Start);
    }
    if buttons.contains(Buttons::PAUSE) && matches!(*state, SessionState::Running | SessionState::Paused) {
        writer.write(GameCommand::TogglePause);
    }

    if *state != SessionState::Running {
        return;
    }
    if buttons.contains(Buttons::SWITCH_WEAPON) {
        writer.write(GameCommand::SwitchWeapon);
    }
    if buttons.contains(Buttons::ATTACK) {
        writer.write(GameCommand::Attack { target: input.pointer });
    }
}
