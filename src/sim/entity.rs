//! Entity model shared by placement, movement and contact handling

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Entity identifier, unique within one session
pub type EntityId = u32;

/// What an entity is, as far as contacts are concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// The plane steered by the player
    Player,
    /// Clouds: touching one ends the session
    Obstacle,
    /// Coins: touching one adds to the score
    Bonus,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Player => "player",
            Category::Obstacle => "obstacle",
            Category::Bonus => "bonus",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap test: boxes sharing only an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// A live game object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub category: Category,
    /// Centre position
    pub pos: Vec2,
    /// Full extent (width, height)
    pub size: Vec2,
    /// Constant velocity; zero for the player, which follows input instead
    pub vel: Vec2,
    /// Seconds left before the entity leaves the field (None = lives for the session)
    pub remaining_secs: Option<f32>,
}

impl Entity {
    /// The player entity at a fixed position
    pub fn player(id: EntityId, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            category: Category::Player,
            pos,
            size,
            vel: Vec2::ZERO,
            remaining_secs: None,
        }
    }

    /// A moving entity that crosses the field in `traversal_secs`
    pub fn mover(
        id: EntityId,
        category: Category,
        pos: Vec2,
        size: Vec2,
        vel: Vec2,
        traversal_secs: f32,
    ) -> Self {
        Self {
            id,
            category,
            pos,
            size,
            vel,
            remaining_secs: Some(traversal_secs),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.pos, self.size)
    }

    pub fn is_player(&self) -> bool {
        self.category == Category::Player
    }

    /// Advance along the trajectory. Returns true once the traversal is complete.
    pub fn step(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.remaining_secs else {
            return false;
        };
        // Never overshoot the end of the trajectory
        let step = dt.min(remaining).max(0.0);
        self.pos += self.vel * step;
        let remaining = remaining - step;
        self.remaining_secs = Some(remaining);
        remaining <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::from_center_size(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Aabb::from_center_size(Vec2::new(8.0, 3.0), Vec2::new(10.0, 10.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));

        let far = Aabb::from_center_size(Vec2::new(50.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.intersects(&far));
    }

    #[test]
    fn test_aabb_touching_edges_do_not_intersect() {
        let a = Aabb::from_center_size(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Aabb::from_center_size(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_mover_expires_after_traversal() {
        let mut e = Entity::mover(
            1,
            Category::Obstacle,
            Vec2::new(100.0, 0.0),
            Vec2::new(20.0, 20.0),
            Vec2::new(-10.0, 0.0),
            2.0,
        );
        assert!(!e.step(1.0));
        assert!((e.pos.x - 90.0).abs() < 1e-4);

        // Large step is clamped to the remaining time
        assert!(e.step(5.0));
        assert!((e.pos.x - 80.0).abs() < 1e-4);
    }

    #[test]
    fn test_player_never_expires() {
        let mut p = Entity::player(1, Vec2::ZERO, Vec2::new(10.0, 10.0));
        assert!(!p.step(100.0));
        assert_eq!(p.pos, Vec2::ZERO);
    }
}
