use bevy_ecs::{component::Component, resource::Resource};
use glam::Vec2;

use crate::constants::{hostile, progression};
use crate::systems::collision::Aabb;

/// A tag component denoting the type of entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Player,
    Zombie,
    Boss,
    Bullet,
    HealthPack,
}

impl EntityType {
    /// Score credited when an entity of this type is killed.
    pub fn score_value(&self) -> Option<u32> {
        match self {
            EntityType::Zombie => Some(progression::ZOMBIE_SCORE),
            EntityType::Boss => Some(progression::BOSS_SCORE),
            _ => None,
        }
    }

    /// Experience credited when an entity of this type is killed.
    ///
    /// Boss kills grant none.
    pub fn experience_value(&self) -> Option<u32> {
        match self {
            EntityType::Zombie => Some(progression::ZOMBIE_EXPERIENCE),
            _ => None,
        }
    }

    /// Health drained from the player for every tick of overlap.
    pub fn contact_damage(&self) -> Option<f32> {
        match self {
            EntityType::Zombie => Some(hostile::ZOMBIE_CONTACT_DAMAGE),
            EntityType::Boss => Some(hostile::BOSS_CONTACT_DAMAGE),
            _ => None,
        }
    }

    pub fn is_hostile(&self) -> bool {
        matches!(self, EntityType::Zombie | EntityType::Boss)
    }
}

/// The top-left corner of an entity. Bullets are points, so this is their exact location.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec2);

/// Square bounding box anchored at the entity's [`Position`].
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub size: f32,
}

impl Collider {
    pub fn bounds(&self, position: Vec2) -> Aabb {
        Aabb::new(position, Vec2::splat(self.size))
    }

    pub fn center(&self, position: Vec2) -> Vec2 {
        position + Vec2::splat(self.size / 2.0)
    }
}

/// Hit points. May go negative while damage resolves; the entity is removed at or below zero.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Health(pub f32);

impl Health {
    pub fn is_alive(&self) -> bool {
        self.0 > 0.0
    }

    /// Health as shown to the player, never below zero.
    pub fn displayed(&self) -> f32 {
        self.0.max(0.0)
    }
}

/// A tag component for the entity driven by the input snapshot.
#[derive(Default, Component)]
pub struct PlayerControlled;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Stamina {
    pub current: f32,
    pub max: f32,
}

impl Stamina {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }
}

/// Marker for regular hostiles.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Zombie;

/// Marker for the singleton boss.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Boss;

/// Marker for pickups that restore health.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct HealthPack;

/// Whether a hostile is pursuing the player.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Behavior {
    #[default]
    Idle,
    Aggro,
}

/// Distance covered per tick while pursuing.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Speed(pub f32);

#[derive(Resource, Debug, Default)]
pub struct ScoreResource(pub u32);

#[derive(Resource, Debug, Clone, Copy)]
pub struct DeltaTime {
    /// Floating-point delta time in seconds
    pub seconds: f32,
    /// Integer tick delta (usually 1, but can be different for testing)
    pub ticks: u32,
}

impl DeltaTime {
    /// Creates a new DeltaTime from an integer tick delta at the nominal tick rate.
    ///
    /// While this method exists as a helper, it does not mean that seconds and ticks are interchangeable.
    pub fn from_ticks(ticks: u32) -> Self {
        Self {
            seconds: ticks as f32 / crate::constants::TICKS_PER_SECOND,
            ticks,
        }
    }
}

/// The playfield. Entities are kept fully inside it.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub size: Vec2,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    /// Strict containment, as used for bullets.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > 0.0 && point.x < self.size.x && point.y > 0.0 && point.y < self.size.y
    }

    /// Clamps a top-left position so a box of `size` stays inside the arena.
    pub fn clamp(&self, position: Vec2, size: f32) -> Vec2 {
        position.clamp(Vec2::ZERO, (self.size - Vec2::splat(size)).max(Vec2::ZERO))
    }

    pub fn center(&self) -> Vec2 {
        self.size / 2.0
    }
}

/// A fixed square hostiles may not enter once the player has leveled up.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SafeZone {
    pub bounds: Aabb,
    pub active: bool,
}

impl SafeZone {
    /// A zone of the standard size centered in the arena.
    pub fn centered(arena: &Arena) -> Self {
        let size = Vec2::splat(progression::SAFE_ZONE_SIZE);
        Self {
            bounds: Aabb::new(arena.center() - size / 2.0, size),
            active: false,
        }
    }

    /// The zone's bounds, only while it is enforced.
    pub fn enforced(&self) -> Option<Aabb> {
        self.active.then_some(self.bounds)
    }

    /// Whether a box at `bounds` would violate the zone. Always false before activation.
    pub fn blocks(&self, bounds: &Aabb) -> bool {
        self.active && self.bounds.overlaps(bounds)
    }
}
