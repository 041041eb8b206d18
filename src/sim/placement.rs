//! Spawn placement
//!
//! Candidates appear just beyond the right edge at a random height. A
//! candidate overlapping any live entity is dropped on the spot: no retry,
//! no error. This only declutters; it does not guarantee spacing.

use glam::Vec2;
use rand::Rng;

use super::entity::{Aabb, Category, Entity, EntityId};
use super::state::Session;
use crate::consts::MIN_SPAWN_PERIOD;
use crate::settings::Settings;

/// A proposed spawn, not yet registered
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub category: Category,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Candidate {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.pos, self.size)
    }
}

/// Decides where obstacles and bonuses appear and whether they fit
#[derive(Debug, Clone)]
pub struct PlacementPolicy {
    field: Vec2,
    margin: f32,
    traversal_secs: f32,
    obstacle_size: Vec2,
    bonus_size: Vec2,
}

impl PlacementPolicy {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            field: Vec2::new(settings.field_width, settings.field_height),
            margin: settings.spawn_margin,
            traversal_secs: settings.traversal_secs.max(MIN_SPAWN_PERIOD),
            obstacle_size: settings.obstacle_size,
            bonus_size: settings.bonus_size,
        }
    }

    fn size_of(&self, category: Category) -> Option<Vec2> {
        match category {
            Category::Obstacle => Some(self.obstacle_size),
            Category::Bonus => Some(self.bonus_size),
            Category::Player => None,
        }
    }

    /// Spawn x: right edge plus margin
    pub fn spawn_x(&self) -> f32 {
        self.field.x / 2.0 + self.margin
    }

    /// Propose a spawn. Only obstacles and bonuses are ever spawned.
    pub fn candidate<R: Rng>(&self, category: Category, rng: &mut R) -> Option<Candidate> {
        let size = self.size_of(category)?;
        let half_h = self.field.y / 2.0;
        let y = if half_h.is_finite() && half_h > 0.0 {
            rng.random_range(-half_h..=half_h)
        } else {
            0.0
        };
        Some(Candidate {
            category,
            pos: Vec2::new(self.spawn_x(), y),
            size,
        })
    }

    /// True when the candidate overlaps none of the live entities
    pub fn fits(&self, candidate: &Candidate, live: &[Entity]) -> bool {
        let bounds = candidate.bounds();
        !live.iter().any(|e| e.bounds().intersects(&bounds))
    }

    /// Velocity that moves an entity across the whole field (plus its own
    /// width) in the fixed traversal time, whatever the field width
    pub fn trajectory(&self, size: Vec2) -> Vec2 {
        Vec2::new(-(self.field.x + size.x) / self.traversal_secs, 0.0)
    }

    /// Register the candidate if it fits. Rejections are silent.
    pub fn place(&self, session: &mut Session, candidate: Candidate) -> Option<EntityId> {
        if !self.fits(&candidate, &session.entities) {
            log::trace!(
                "Dropped {} spawn at y={:.1}: overlaps a live entity",
                candidate.category,
                candidate.pos.y
            );
            return None;
        }

        let id = session.next_entity_id();
        let entity = Entity::mover(
            id,
            candidate.category,
            candidate.pos,
            candidate.size,
            self.trajectory(candidate.size),
            self.traversal_secs,
        );
        log::debug!(
            "Spawned {} #{} at ({:.1}, {:.1})",
            entity.category,
            id,
            entity.pos.x,
            entity.pos.y
        );
        session.insert(entity);
        Some(id)
    }

    /// Propose and place in one step
    pub fn try_spawn<R: Rng>(
        &self,
        session: &mut Session,
        category: Category,
        rng: &mut R,
    ) -> Option<EntityId> {
        let candidate = self.candidate(category, rng)?;
        self.place(session, candidate)
    }
}
