use bevy_ecs::{
    event::{EventReader, EventWriter},
    query::With,
    resource::Resource,
    system::{Query, Res, ResMut},
};
use tracing::info;

use crate::events::{GameCommand, GameEvent};
use crate::systems::{Health, PlayerControlled, ScoreResource};

/// The session lifecycle. Only `Running` advances the simulation.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    NotStarted,
    Running,
    Paused,
    /// Terminal. Only a full session reset leaves it.
    GameOver,
}

impl SessionState {
    pub fn is_running(&self) -> bool {
        matches!(self, SessionState::Running)
    }
}

/// Run condition for every gameplay system.
pub fn session_running(state: Res<SessionState>) -> bool {
    state.is_running()
}

pub fn handle_session_command(
    mut commands: EventReader<GameCommand>,
    mut state: ResMut<SessionState>,
    mut events: EventWriter<GameEvent>,
) {
    for command in commands.read() {
        match (command, *state) {
            (GameCommand::Start, SessionState::NotStarted) => {
                info!("Session started");
                *state = SessionState::Running;
                events.write(GameEvent::SessionStarted);
            }
            (GameCommand::TogglePause, SessionState::Running) => {
                info!("Session paused");
                *state = SessionState::Paused;
                events.write(GameEvent::Paused);
            }
            (GameCommand::TogglePause, SessionState::Paused) => {
                info!("Session resumed");
                *state = SessionState::Running;
                events.write(GameEvent::Resumed);
            }
            _ => {}
        }
    }
}

/// Ends the session once the player's health is gone.
pub fn game_over_system(
    player: Query<&Health, With<PlayerControlled>>,
    score: Res<ScoreResource>,
    mut state: ResMut<SessionState>,
    mut events: EventWriter<GameEvent>,
) {
    if !state.is_running() {
        return;
    }
    let Ok(health) = player.single() else {
        return;
    };

    if !health.is_alive() {
        info!(score = score.0, "Player died, game over");
        *state = SessionState::GameOver;
        events.write(GameEvent::GameOver { score: score.0 });
    }
}
