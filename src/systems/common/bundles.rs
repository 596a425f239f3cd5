use bevy_ecs::bundle::Bundle;
use glam::Vec2;

use crate::constants::{hostile, player, spawn};
use crate::systems::{
    Arsenal, Behavior, Boss, Bullet, Collider, EntityType, Experience, Health, HealthPack, PlayerControlled, Position, Speed,
    Stamina, TimeToLive, Zombie,
};

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub position: Position,
    pub collider: Collider,
    pub health: Health,
    pub stamina: Stamina,
    pub arsenal: Arsenal,
    pub experience: Experience,
    pub entity_type: EntityType,
}

impl PlayerBundle {
    pub fn new(position: Vec2) -> Self {
        Self {
            player: PlayerControlled,
            position: Position(position),
            collider: Collider { size: player::SIZE },
            health: Health(player::MAX_HEALTH),
            stamina: Stamina::new(player::STARTING_STAMINA),
            arsenal: Arsenal::default(),
            experience: Experience::default(),
            entity_type: EntityType::Player,
        }
    }
}

#[derive(Bundle)]
pub struct ZombieBundle {
    pub zombie: Zombie,
    pub position: Position,
    pub collider: Collider,
    pub health: Health,
    pub speed: Speed,
    pub behavior: Behavior,
    pub entity_type: EntityType,
}

impl ZombieBundle {
    pub fn new(position: Vec2) -> Self {
        Self {
            zombie: Zombie,
            position: Position(position),
            collider: Collider {
                size: hostile::ZOMBIE_SIZE,
            },
            health: Health(hostile::ZOMBIE_HEALTH),
            speed: Speed(hostile::ZOMBIE_SPEED),
            behavior: Behavior::Idle,
            entity_type: EntityType::Zombie,
        }
    }
}

/// The boss never idles, so it carries no [`Behavior`].
#[derive(Bundle)]
pub struct BossBundle {
    pub boss: Boss,
    pub position: Position,
    pub collider: Collider,
    pub health: Health,
    pub speed: Speed,
    pub entity_type: EntityType,
}

impl BossBundle {
    pub fn new(position: Vec2) -> Self {
        Self {
            boss: Boss,
            position: Position(position),
            collider: Collider { size: hostile::BOSS_SIZE },
            health: Health(hostile::BOSS_HEALTH),
            speed: Speed(hostile::BOSS_SPEED),
            entity_type: EntityType::Boss,
        }
    }
}

#[derive(Bundle)]
pub struct BulletBundle {
    pub position: Position,
    pub bullet: Bullet,
    pub entity_type: EntityType,
}

impl BulletBundle {
    pub fn new(position: Vec2, velocity: Vec2, damage: f32) -> Self {
        Self {
            position: Position(position),
            bullet: Bullet::new(velocity, damage),
            entity_type: EntityType::Bullet,
        }
    }
}

#[derive(Bundle)]
pub struct HealthPackBundle {
    pub pack: HealthPack,
    pub position: Position,
    pub collider: Collider,
    pub lifetime: TimeToLive,
    pub entity_type: EntityType,
}

impl HealthPackBundle {
    pub fn new(position: Vec2) -> Self {
        Self {
            pack: HealthPack,
            position: Position(position),
            collider: Collider {
                size: spawn::HEALTH_PACK_SIZE,
            },
            lifetime: TimeToLive::new(spawn::HEALTH_PACK_LIFETIME),
            entity_type: EntityType::HealthPack,
        }
    }
}
