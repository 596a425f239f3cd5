//! Weapons, projectiles, contact damage, and death handling.

use bevy_ecs::{
    component::Component,
    entity::Entity,
    event::{EventReader, EventWriter},
    query::{With, Without},
    system::{Commands, Query, Res, ResMut},
};
use glam::Vec2;
use smallvec::SmallVec;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter};
use tracing::{debug, trace};

use crate::constants::weapon;
use crate::events::{GameCommand, GameEvent};
use crate::systems::collision::check_collision;
use crate::systems::progression::{level_up_rewards, Experience};
use crate::systems::{
    Arena, Boss, BulletBundle, Collider, EntityType, Health, PlayerControlled, Position, ScoreResource, Stamina, Zombie,
};

/// Every weapon the player can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Weapon {
    Fists,
    Gun,
    Shotgun,
    Sniper,
}

/// How a weapon turns an attack command into damage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dispatch {
    /// Immediate damage to every live zombie within `range`.
    Melee { range: f32, damage: f32 },
    /// One bullet per angular offset around the aim direction.
    Projectile {
        speed: f32,
        damage: f32,
        spread: &'static [f32],
    },
}

impl Weapon {
    /// Ticks before another attack is accepted.
    pub const fn cooldown(self) -> u32 {
        match self {
            Weapon::Fists => weapon::FISTS_COOLDOWN,
            Weapon::Gun => weapon::GUN_COOLDOWN,
            Weapon::Shotgun => weapon::SHOTGUN_COOLDOWN,
            Weapon::Sniper => weapon::SNIPER_COOLDOWN,
        }
    }

    pub const fn dispatch(self) -> Dispatch {
        match self {
            Weapon::Fists => Dispatch::Melee {
                range: weapon::MELEE_RANGE,
                damage: weapon::MELEE_DAMAGE,
            },
            Weapon::Gun => Dispatch::Projectile {
                speed: weapon::GUN_SPEED,
                damage: weapon::GUN_DAMAGE,
                spread: &[0.0],
            },
            Weapon::Shotgun => Dispatch::Projectile {
                speed: weapon::SHOTGUN_SPEED,
                damage: weapon::DEFAULT_BULLET_DAMAGE,
                spread: &weapon::SHOTGUN_SPREAD,
            },
            Weapon::Sniper => Dispatch::Projectile {
                speed: weapon::SNIPER_SPEED,
                damage: weapon::SNIPER_DAMAGE,
                spread: &[0.0],
            },
        }
    }
}

/// The player's weapons, the selected one, and the timers attacks and switches start.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Arsenal {
    /// Ordered, without duplicates.
    pub inventory: SmallVec<[Weapon; 4]>,
    pub active: usize,
    /// Ticks until the next attack is accepted.
    pub cooldown: u32,
    /// Ticks the player is drawn highlighted. No gameplay effect.
    pub flash: u32,
}

impl Default for Arsenal {
    fn default() -> Self {
        Self::new(Weapon::iter())
    }
}

impl Arsenal {
    pub fn new(weapons: impl IntoIterator<Item = Weapon>) -> Self {
        let mut inventory = SmallVec::new();
        for weapon in weapons {
            if !inventory.contains(&weapon) {
                inventory.push(weapon);
            }
        }

        Self {
            inventory,
            active: 0,
            cooldown: 0,
            flash: 0,
        }
    }

    pub fn active_weapon(&self) -> Option<Weapon> {
        self.inventory.get(self.active).copied()
    }

    /// Selects the next weapon, wrapping around.
    pub fn cycle(&mut self) -> Option<Weapon> {
        if self.inventory.is_empty() {
            return None;
        }
        self.active = (self.active + 1) % self.inventory.len();
        self.flash = weapon::SWITCH_FLASH;
        self.active_weapon()
    }

    pub fn ready(&self) -> bool {
        self.cooldown == 0
    }

    /// Counts both timers down by one tick.
    pub fn tick(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
        self.flash = self.flash.saturating_sub(1);
    }
}

/// A projectile. It may damage at most one target over its lifetime.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Bullet {
    pub velocity: Vec2,
    pub damage: f32,
    pub consumed: bool,
}

impl Bullet {
    pub fn new(velocity: Vec2, damage: f32) -> Self {
        Self {
            velocity,
            damage,
            consumed: false,
        }
    }

    /// Applies this bullet's damage unless it already hit something. Returns whether it did.
    pub fn strike(&mut self, health: &mut Health) -> bool {
        if self.consumed {
            return false;
        }
        health.0 -= self.damage;
        self.consumed = true;
        true
    }
}

/// Unit directions for each offset (in radians) around the line from `origin` to `target`.
pub fn spread_directions(origin: Vec2, target: Vec2, offsets: &[f32]) -> SmallVec<[Vec2; 5]> {
    let aim = target - origin;
    let angle = aim.y.atan2(aim.x);
    offsets.iter().map(|offset| Vec2::from_angle(angle + offset)).collect()
}

pub fn weapon_switch_system(
    mut commands: EventReader<GameCommand>,
    mut arsenals: Query<&mut Arsenal, With<PlayerControlled>>,
    mut events: EventWriter<GameEvent>,
) {
    for command in commands.read() {
        if !matches!(command, GameCommand::SwitchWeapon) {
            continue;
        }
        for mut arsenal in arsenals.iter_mut() {
            if let Some(weapon) = arsenal.cycle() {
                debug!(%weapon, "Switched weapon");
                events.write(GameEvent::WeaponSwitched { weapon });
            }
        }
    }
}

/// Resolves attack commands against the active weapon.
pub fn attack_system(
    mut commands: Commands,
    mut reader: EventReader<GameCommand>,
    mut players: Query<(&Position, &Collider, &mut Arsenal), With<PlayerControlled>>,
    mut zombies: Query<(&Position, &mut Health), (With<Zombie>, Without<PlayerControlled>)>,
    mut events: EventWriter<GameEvent>,
) {
    let Ok((position, collider, mut arsenal)) = players.single_mut() else {
        return;
    };

    for command in reader.read() {
        let GameCommand::Attack { target } = *command else {
            continue;
        };
        if !arsenal.ready() {
            trace!(cooldown = arsenal.cooldown, "Attack ignored during cooldown");
            continue;
        }
        let Some(weapon) = arsenal.active_weapon() else {
            continue;
        };

        match weapon.dispatch() {
            Dispatch::Melee { range, damage } => {
                let mut hits = 0;
                for (zombie_position, mut health) in zombies.iter_mut() {
                    if health.is_alive() && position.0.distance(zombie_position.0) < range {
                        health.0 -= damage;
                        hits += 1;
                    }
                }
                arsenal.flash = weapon::MELEE_FLASH;
                trace!(hits, "Melee attack resolved");
            }
            Dispatch::Projectile { speed, damage, spread } => {
                let origin = collider.center(position.0);
                for direction in spread_directions(origin, target, spread) {
                    commands.spawn(BulletBundle::new(origin, direction * speed, damage));
                }
                trace!(count = spread.len(), %weapon, "Bullets fired");
            }
        }

        arsenal.cooldown = weapon.cooldown();
        events.write(GameEvent::AttackFired { weapon });
    }
}

pub fn cooldown_system(mut arsenals: Query<&mut Arsenal>) {
    for mut arsenal in arsenals.iter_mut() {
        arsenal.tick();
    }
}

/// Advances bullets, resolves their first hit, and removes spent or escaped bullets.
///
/// Zombies are tested before the boss.
pub fn bullet_system(
    mut commands: Commands,
    arena: Res<Arena>,
    mut bullets: Query<(Entity, &mut Position, &mut Bullet)>,
    mut zombies: Query<(&Position, &Collider, &mut Health), (With<Zombie>, Without<Bullet>)>,
    mut bosses: Query<(&Position, &Collider, &mut Health), (With<Boss>, Without<Zombie>, Without<Bullet>)>,
) {
    for (entity, mut position, mut bullet) in bullets.iter_mut() {
        position.0 += bullet.velocity;

        for (target, collider, mut health) in zombies.iter_mut() {
            if bullet.consumed {
                break;
            }
            if health.is_alive() && collider.bounds(target.0).contains_point(position.0) {
                bullet.strike(&mut health);
            }
        }
        // A boss stays solid until it is removed, even after a lethal hit this tick
        for (target, collider, mut health) in bosses.iter_mut() {
            if !bullet.consumed && collider.bounds(target.0).contains_point(position.0) {
                bullet.strike(&mut health);
            }
        }

        if bullet.consumed || !arena.contains(position.0) {
            commands.entity(entity).despawn();
        }
    }
}

/// Drains player health for every tick a live hostile overlaps them.
pub fn contact_damage_system(
    mut players: Query<(&Position, &Collider, &mut Health), With<PlayerControlled>>,
    hostiles: Query<(&Position, &Collider, &Health, &EntityType), Without<PlayerControlled>>,
) {
    let Ok((player_position, player_collider, mut player_health)) = players.single_mut() else {
        return;
    };

    for (position, collider, health, entity_type) in hostiles.iter() {
        let Some(damage) = entity_type.contact_damage() else {
            continue;
        };
        if health.is_alive()
            && player_health.is_alive()
            && check_collision(player_position, player_collider, position, collider)
        {
            player_health.0 = (player_health.0 - damage).max(0.0);
        }
    }
}

/// Removes dead hostiles and credits the kill.
pub fn death_system(
    mut commands: Commands,
    mut score: ResMut<ScoreResource>,
    mut players: Query<(&mut Health, &mut Stamina, &mut Experience), With<PlayerControlled>>,
    hostiles: Query<(Entity, &Position, &Health, &EntityType), Without<PlayerControlled>>,
    mut events: EventWriter<GameEvent>,
) {
    for (entity, position, health, entity_type) in hostiles.iter() {
        if !entity_type.is_hostile() || health.is_alive() {
            continue;
        }

        commands.entity(entity).despawn();
        score.0 += entity_type.score_value().unwrap_or(0);
        events.write(match entity_type {
            EntityType::Boss => GameEvent::BossKilled { position: position.0 },
            _ => GameEvent::ZombieKilled { position: position.0 },
        });
        debug!(?entity_type, ?entity, score = score.0, "Hostile killed");

        let Some(amount) = entity_type.experience_value() else {
            continue;
        };
        let Ok((mut player_health, mut stamina, mut experience)) = players.single_mut() else {
            continue;
        };
        let gained = experience.gain(amount);
        for reached in (experience.level + 1 - gained)..=experience.level {
            level_up_rewards(&mut player_health, &mut stamina);
            debug!(level = reached, max_stamina = stamina.max, "Level up");
            events.write(GameEvent::LevelUp { level: reached });
        }
    }
}
