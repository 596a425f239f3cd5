use glam::Vec2;

use crate::systems::{Arena, Collider, Position};

/// An axis-aligned box. Overlap and containment tests are strict, so touching edges do not count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x && self.max.x > other.min.x && self.min.y < other.max.y && self.max.y > other.min.y
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x > self.min.x && point.x < self.max.x && point.y > self.min.y && point.y < self.max.y
    }

    /// The nearest top-left position for a box of `size` that no longer overlaps `self`,
    /// restricted to positions inside the arena.
    ///
    /// Returns `None` if the box does not overlap, or if no exit stays inside the arena.
    pub fn exit_position(&self, position: Vec2, size: f32, arena: &Arena) -> Option<Vec2> {
        let occupied = Aabb::new(position, Vec2::splat(size));
        if !self.overlaps(&occupied) {
            return None;
        }

        let limit = arena.size - Vec2::splat(size);
        [
            Vec2::new(self.min.x - size, position.y),
            Vec2::new(self.max.x, position.y),
            Vec2::new(position.x, self.min.y - size),
            Vec2::new(position.x, self.max.y),
        ]
        .into_iter()
        .filter(|candidate| candidate.cmpge(Vec2::ZERO).all() && candidate.cmple(limit).all())
        .min_by(|a, b| a.distance_squared(position).total_cmp(&b.distance_squared(position)))
    }
}

/// Helper function to check collision between two entities with colliders.
pub fn check_collision(pos1: &Position, collider1: &Collider, pos2: &Position, collider2: &Collider) -> bool {
    collider1.bounds(pos1.0).overlaps(&collider2.bounds(pos2.0))
}
