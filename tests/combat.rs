use bevy_ecs::system::RunSystemOnce;
use glam::Vec2;
use horde::constants::weapon;
use horde::events::{GameCommand, GameEvent};
use horde::systems::{
    attack_system, bullet_system, contact_damage_system, cooldown_system, death_system, weapon_switch_system, Arsenal,
    Bullet, BulletBundle, Experience, Health, Position, ScoreResource, Stamina, Weapon, Zombie,
};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;
use strum::IntoEnumIterator;

mod common;

fn select(world: &mut bevy_ecs::world::World, player: bevy_ecs::entity::Entity, weapon: Weapon) {
    let mut arsenal = world.get_mut::<Arsenal>(player).unwrap();
    arsenal.active = arsenal.inventory.iter().position(|w| *w == weapon).unwrap();
}

#[test]
fn test_weapon_properties() {
    assert_that(&Weapon::Fists.cooldown()).is_equal_to(20);
    assert_that(&Weapon::Gun.cooldown()).is_equal_to(10);
    assert_that(&Weapon::Shotgun.cooldown()).is_equal_to(30);
    assert_that(&Weapon::Sniper.cooldown()).is_greater_than(Weapon::Gun.cooldown());
    assert_that(&Weapon::Shotgun.to_string()).is_equal_to("shotgun".to_string());
}

#[test]
fn test_arsenal_cycles_in_order() {
    let mut arsenal = Arsenal::default();
    let expected: Vec<Weapon> = Weapon::iter().collect();
    assert_eq!(arsenal.inventory.to_vec(), expected);
    assert_that(&arsenal.active_weapon()).is_equal_to(Some(Weapon::Fists));

    assert_that(&arsenal.cycle()).is_equal_to(Some(Weapon::Gun));
    assert_that(&arsenal.flash).is_equal_to(weapon::SWITCH_FLASH);
    arsenal.cycle();
    arsenal.cycle();
    assert_that(&arsenal.cycle()).is_equal_to(Some(Weapon::Fists));
}

#[test]
fn test_arsenal_deduplicates_and_handles_empty() {
    let arsenal = Arsenal::new([Weapon::Gun, Weapon::Gun, Weapon::Sniper]);
    assert_eq!(arsenal.inventory.to_vec(), vec![Weapon::Gun, Weapon::Sniper]);

    let mut empty = Arsenal::new([]);
    assert_that(&empty.active_weapon()).is_none();
    assert_that(&empty.cycle()).is_none();
}

#[test]
fn test_weapon_switch_system_emits_event() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, Vec2::new(500.0, 300.0));

    common::send_command(&mut world, GameCommand::SwitchWeapon);
    world.run_system_once(weapon_switch_system).expect("System should run successfully");

    let arsenal = world.get::<Arsenal>(player).unwrap();
    assert_that(&arsenal.active_weapon()).is_equal_to(Some(Weapon::Gun));
    assert_eq!(
        common::drain_game_events(&mut world),
        vec![GameEvent::WeaponSwitched { weapon: Weapon::Gun }]
    );
}

#[test]
fn test_three_melee_hits_kill_a_zombie() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, Vec2::new(500.0, 300.0));
    let zombie = common::spawn_test_zombie(&mut world, Vec2::new(530.0, 300.0));

    for expected in [30.0, 10.0] {
        common::send_command(&mut world, GameCommand::Attack { target: Vec2::ZERO });
        world.run_system_once(attack_system).expect("System should run successfully");
        world.run_system_once(death_system).expect("System should run successfully");

        assert_that(&world.get::<Health>(zombie).unwrap().0).is_equal_to(expected);
        world.get_mut::<Arsenal>(player).unwrap().cooldown = 0;
    }

    common::send_command(&mut world, GameCommand::Attack { target: Vec2::ZERO });
    world.run_system_once(attack_system).expect("System should run successfully");
    world.run_system_once(death_system).expect("System should run successfully");

    assert_that(&world.get_entity(zombie).is_err()).is_true();
    assert_that(&world.resource::<ScoreResource>().0).is_equal_to(10);
    assert_that(&world.get::<Experience>(player).unwrap().points).is_equal_to(20);

    let kills = common::drain_game_events(&mut world)
        .into_iter()
        .filter(|event| matches!(event, GameEvent::ZombieKilled { .. }))
        .count();
    assert_that(&kills).is_equal_to(1);
}

#[test]
fn test_attack_respects_cooldown() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, Vec2::new(500.0, 300.0));
    let zombie = common::spawn_test_zombie(&mut world, Vec2::new(520.0, 310.0));

    common::send_commands(
        &mut world,
        [
            GameCommand::Attack { target: Vec2::ZERO },
            GameCommand::Attack { target: Vec2::ZERO },
        ],
    );
    world.run_system_once(attack_system).expect("System should run successfully");

    assert_that(&world.get::<Health>(zombie).unwrap().0).is_equal_to(30.0);
    let arsenal = world.get::<Arsenal>(player).unwrap();
    assert_that(&arsenal.cooldown).is_equal_to(weapon::FISTS_COOLDOWN);
    assert_that(&arsenal.flash).is_equal_to(weapon::MELEE_FLASH);
}

#[test]
fn test_melee_ignores_distant_zombies_and_boss() {
    let mut world = common::create_test_world();
    common::spawn_test_player(&mut world, Vec2::new(500.0, 300.0));
    let distant = common::spawn_test_zombie(&mut world, Vec2::new(560.0, 300.0));
    let boss = common::spawn_test_boss(&mut world, Vec2::new(510.0, 300.0));

    common::send_command(&mut world, GameCommand::Attack { target: Vec2::ZERO });
    world.run_system_once(attack_system).expect("System should run successfully");

    assert_that(&world.get::<Health>(distant).unwrap().0).is_equal_to(50.0);
    assert_that(&world.get::<Health>(boss).unwrap().0).is_equal_to(500.0);
}

#[test]
fn test_cooldown_system_counts_down() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, Vec2::new(500.0, 300.0));
    {
        let mut arsenal = world.get_mut::<Arsenal>(player).unwrap();
        arsenal.cooldown = 2;
        arsenal.flash = 1;
    }

    for _ in 0..3 {
        world.run_system_once(cooldown_system).expect("System should run successfully");
    }

    let arsenal = world.get::<Arsenal>(player).unwrap();
    assert_that(&arsenal.cooldown).is_equal_to(0);
    assert_that(&arsenal.flash).is_equal_to(0);
    assert_that(&arsenal.ready()).is_true();
}

#[test]
fn test_shotgun_fires_five_spread_bullets() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, Vec2::new(500.0, 300.0));
    select(&mut world, player, Weapon::Shotgun);

    // Straight to the right of the player's center
    common::send_command(&mut world, GameCommand::Attack { target: Vec2::new(715.0, 315.0) });
    world.run_system_once(attack_system).expect("System should run successfully");

    let bullets: Vec<(Vec2, Bullet)> = world
        .query::<(&Position, &Bullet)>()
        .iter(&world)
        .map(|(position, bullet)| (position.0, *bullet))
        .collect();
    assert_that(&bullets.len()).is_equal_to(5);

    let mut angles: Vec<f32> = bullets
        .iter()
        .map(|(_, bullet)| bullet.velocity.y.atan2(bullet.velocity.x))
        .collect();
    angles.sort_by(f32::total_cmp);
    for (angle, expected) in angles.iter().zip(weapon::SHOTGUN_SPREAD) {
        assert!(common::approx_eq(*angle, expected), "angle {angle} != {expected}");
    }

    for (origin, bullet) in &bullets {
        assert_that(origin).is_equal_to(&Vec2::new(515.0, 315.0));
        assert!(common::approx_eq(bullet.velocity.length(), weapon::SHOTGUN_SPEED));
        assert_that(&bullet.damage).is_equal_to(weapon::DEFAULT_BULLET_DAMAGE);
    }
}

#[test]
fn test_sniper_fires_one_heavy_bullet() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, Vec2::new(500.0, 300.0));
    select(&mut world, player, Weapon::Sniper);

    common::send_command(&mut world, GameCommand::Attack { target: Vec2::new(515.0, 0.0) });
    world.run_system_once(attack_system).expect("System should run successfully");

    let bullets: Vec<Bullet> = world.query::<&Bullet>().iter(&world).copied().collect();
    assert_that(&bullets.len()).is_equal_to(1);
    assert_that(&bullets[0].damage).is_equal_to(weapon::SNIPER_DAMAGE);
    assert!(common::approx_eq(bullets[0].velocity.y, -weapon::SNIPER_SPEED));
    assert_that(&world.get::<Arsenal>(player).unwrap().cooldown).is_equal_to(weapon::SNIPER_COOLDOWN);
    assert_eq!(
        common::drain_game_events(&mut world),
        vec![GameEvent::AttackFired { weapon: Weapon::Sniper }]
    );
}

#[test]
fn test_bullet_damages_at_most_one_target() {
    let mut world = common::create_test_world();
    let first = common::spawn_test_zombie(&mut world, Vec2::new(600.0, 300.0));
    let second = common::spawn_test_zombie(&mut world, Vec2::new(600.0, 300.0));
    let bullet = world
        .spawn(BulletBundle::new(Vec2::new(595.0, 310.0), Vec2::new(6.0, 0.0), 10.0))
        .id();

    world.run_system_once(bullet_system).expect("System should run successfully");

    let total: f32 = [first, second].iter().map(|e| world.get::<Health>(*e).unwrap().0).sum();
    assert_that(&total).is_equal_to(90.0);
    assert_that(&world.get_entity(bullet).is_err()).is_true();
}

#[test]
fn test_bullet_prefers_zombie_over_boss() {
    let mut world = common::create_test_world();
    let boss = common::spawn_test_boss(&mut world, Vec2::new(580.0, 280.0));
    let zombie = common::spawn_test_zombie(&mut world, Vec2::new(600.0, 300.0));
    world.spawn(BulletBundle::new(Vec2::new(604.0, 310.0), Vec2::new(6.0, 0.0), 10.0));

    world.run_system_once(bullet_system).expect("System should run successfully");

    assert_that(&world.get::<Health>(zombie).unwrap().0).is_equal_to(40.0);
    assert_that(&world.get::<Health>(boss).unwrap().0).is_equal_to(500.0);
}

#[test]
fn test_bullets_keep_hitting_a_boss_killed_this_tick() {
    let mut world = common::create_test_world();
    let boss = common::spawn_test_boss(&mut world, Vec2::new(580.0, 280.0));
    world.get_mut::<Health>(boss).unwrap().0 = 5.0;
    let first = world.spawn(BulletBundle::new(Vec2::new(600.0, 300.0), Vec2::new(6.0, 0.0), 10.0)).id();
    let second = world.spawn(BulletBundle::new(Vec2::new(600.0, 320.0), Vec2::new(6.0, 0.0), 10.0)).id();

    world.run_system_once(bullet_system).expect("System should run successfully");

    assert_that(&world.get_entity(first).is_err()).is_true();
    assert_that(&world.get_entity(second).is_err()).is_true();
    assert_that(&world.get::<Health>(boss).unwrap().0).is_equal_to(-15.0);
}

#[test]
fn test_consumed_bullet_never_strikes_again() {
    let mut bullet = Bullet::new(Vec2::X, 10.0);
    let mut health = Health(50.0);

    assert_that(&bullet.strike(&mut health)).is_true();
    assert_that(&bullet.strike(&mut health)).is_false();
    assert_that(&health.0).is_equal_to(40.0);
}

#[test]
fn test_bullet_leaving_arena_is_removed() {
    let mut world = common::create_test_world();
    let bullet = world
        .spawn(BulletBundle::new(Vec2::new(1278.0, 10.0), Vec2::new(6.0, 0.0), 10.0))
        .id();
    let inside = world
        .spawn(BulletBundle::new(Vec2::new(100.0, 10.0), Vec2::new(6.0, 0.0), 10.0))
        .id();

    world.run_system_once(bullet_system).expect("System should run successfully");

    assert_that(&world.get_entity(bullet).is_err()).is_true();
    assert_that(&world.get::<Position>(inside).unwrap().0).is_equal_to(Vec2::new(106.0, 10.0));
}

#[test]
fn test_contact_damage_is_clamped_at_zero() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, Vec2::new(500.0, 300.0));
    common::spawn_test_boss(&mut world, Vec2::new(480.0, 280.0));
    common::spawn_test_zombie(&mut world, Vec2::new(510.0, 310.0));
    world.get_mut::<Health>(player).unwrap().0 = 0.5;

    world.run_system_once(contact_damage_system).expect("System should run successfully");

    assert_that(&world.get::<Health>(player).unwrap().0).is_equal_to(0.0);
}

#[test]
fn test_boss_contact_damage_accumulates() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, Vec2::new(500.0, 300.0));
    common::spawn_test_boss(&mut world, Vec2::new(480.0, 280.0));

    world.run_system_once(contact_damage_system).expect("System should run successfully");
    assert_that(&world.get::<Health>(player).unwrap().0).is_equal_to(99.0);

    world.run_system_once(contact_damage_system).expect("System should run successfully");
    assert_that(&world.get::<Health>(player).unwrap().0).is_equal_to(98.0);
}

#[test]
fn test_contact_damage_per_hostile() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, Vec2::new(500.0, 300.0));
    common::spawn_test_zombie(&mut world, Vec2::new(510.0, 310.0));
    // Touching edges are not contact
    common::spawn_test_zombie(&mut world, Vec2::new(530.0, 300.0));

    world.run_system_once(contact_damage_system).expect("System should run successfully");

    let health = world.get::<Health>(player).unwrap().0;
    assert!(common::approx_eq(health, 99.7), "health was {health}");
}

#[test]
fn test_zombie_kill_can_level_up() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, Vec2::new(500.0, 300.0));
    *world.get_mut::<Experience>(player).unwrap() = Experience { level: 0, points: 90 };
    world.get_mut::<Health>(player).unwrap().0 = 50.0;
    let zombie = common::spawn_test_zombie(&mut world, Vec2::new(900.0, 300.0));
    world.get_mut::<Health>(zombie).unwrap().0 = -5.0;

    world.run_system_once(death_system).expect("System should run successfully");

    assert_that(world.get::<Experience>(player).unwrap()).is_equal_to(&Experience { level: 1, points: 10 });
    assert_that(&world.get::<Health>(player).unwrap().0).is_equal_to(70.0);
    assert_that(&world.get::<Stamina>(player).unwrap().max).is_equal_to(110.0);
    assert_that(&world.query::<&Zombie>().iter(&world).count()).is_equal_to(0);

    let events = common::drain_game_events(&mut world);
    assert_that(&events.contains(&GameEvent::LevelUp { level: 1 })).is_true();
}

#[test]
fn test_boss_kill_scores_without_experience() {
    let mut world = common::create_test_world();
    let player = common::spawn_test_player(&mut world, Vec2::new(500.0, 300.0));
    let boss = common::spawn_test_boss(&mut world, Vec2::new(900.0, 300.0));
    world.get_mut::<Health>(boss).unwrap().0 = 0.0;

    world.run_system_once(death_system).expect("System should run successfully");

    assert_that(&world.get_entity(boss).is_err()).is_true();
    assert_that(&world.resource::<ScoreResource>().0).is_equal_to(100);
    assert_that(world.get::<Experience>(player).unwrap()).is_equal_to(&Experience::default());
    assert_eq!(
        common::drain_game_events(&mut world),
        vec![GameEvent::BossKilled {
            position: Vec2::new(900.0, 300.0)
        }]
    );
}
