use bevy_ecs::system::RunSystemOnce;
use glam::Vec2;
use horde::events::{GameCommand, GameEvent};
use horde::systems::{
    game_over_system, handle_session_command, input_system, Buttons, Health, InputSnapshot, ScoreResource, SessionState,
};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

fn commands_for(state: SessionState, input: InputSnapshot) -> Vec<GameCommand> {
    let mut world = common::create_test_world();
    world.insert_resource(state);
    world.insert_resource(input);
    world.run_system_once(input_system).expect("System should run successfully");
    common::pending_commands(&mut world)
}

#[test]
fn test_movement_intent_is_per_axis() {
    let input = common::press(Buttons::UP | Buttons::LEFT | Buttons::RIGHT);
    assert_that(&input.movement_intent()).is_equal_to(Vec2::new(0.0, -1.0));
    assert_that(&common::press(Buttons::DOWN | Buttons::RIGHT).movement_intent()).is_equal_to(Vec2::ONE);
    assert_that(&common::press(Buttons::RUN).running()).is_true();
}

#[test]
fn test_start_only_before_the_session() {
    let start = common::press(Buttons::START);
    assert_eq!(commands_for(SessionState::NotStarted, start), vec![GameCommand::Start]);
    assert_eq!(commands_for(SessionState::Running, start), Vec::<GameCommand>::new());
    assert_eq!(commands_for(SessionState::GameOver, start), Vec::<GameCommand>::new());
}

#[test]
fn test_gameplay_commands_only_while_running() {
    let input = common::aim(Buttons::ATTACK | Buttons::SWITCH_WEAPON, Vec2::new(10.0, 20.0));
    assert_eq!(
        commands_for(SessionState::Running, input),
        vec![
            GameCommand::SwitchWeapon,
            GameCommand::Attack {
                target: Vec2::new(10.0, 20.0)
            }
        ]
    );
    assert_eq!(commands_for(SessionState::Paused, input), Vec::<GameCommand>::new());
    assert_eq!(commands_for(SessionState::NotStarted, input), Vec::<GameCommand>::new());
}

#[test]
fn test_pause_toggle_in_running_or_paused() {
    let pause = common::press(Buttons::PAUSE);
    assert_eq!(commands_for(SessionState::Running, pause), vec![GameCommand::TogglePause]);
    assert_eq!(commands_for(SessionState::Paused, pause), vec![GameCommand::TogglePause]);
    assert_eq!(commands_for(SessionState::GameOver, pause), Vec::<GameCommand>::new());
}

#[test]
fn test_session_transitions() {
    let mut world = common::create_test_world();
    world.insert_resource(SessionState::NotStarted);

    let steps = [
        (GameCommand::TogglePause, SessionState::NotStarted, None),
        (GameCommand::Start, SessionState::Running, Some(GameEvent::SessionStarted)),
        (GameCommand::Start, SessionState::Running, None),
        (GameCommand::TogglePause, SessionState::Paused, Some(GameEvent::Paused)),
        (GameCommand::TogglePause, SessionState::Running, Some(GameEvent::Resumed)),
    ];

    for (command, expected_state, expected_event) in steps {
        common::send_command(&mut world, command);
        world.run_system_once(handle_session_command).expect("System should run successfully");

        assert_that(world.resource::<SessionState>()).is_equal_to(&expected_state);
        assert_eq!(common::drain_game_events(&mut world), expected_event.into_iter().collect::<Vec<_>>());
    }
}

#[test]
fn test_game_over_is_terminal() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, Vec2::new(500.0, 300.0));
    world.insert_resource(ScoreResource(120));

    world.run_system_once(game_over_system).expect("System should run successfully");
    assert_that(world.resource::<SessionState>()).is_equal_to(&SessionState::Running);

    world.get_mut::<Health>(player).unwrap().0 = 0.0;
    world.run_system_once(game_over_system).expect("System should run successfully");
    assert_that(world.resource::<SessionState>()).is_equal_to(&SessionState::GameOver);
    assert_eq!(
        common::drain_game_events(&mut world),
        vec![GameEvent::GameOver { score: 120 }]
    );

    common::send_command(&mut world, GameCommand::Start);
    world.run_system_once(handle_session_command).expect("System should run successfully");
    common::send_command(&mut world, GameCommand::TogglePause);
    world.run_system_once(handle_session_command).expect("System should run successfully");
    assert_that(world.resource::<SessionState>()).is_equal_to(&SessionState::GameOver);
}
