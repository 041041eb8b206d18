//! Session state
//!
//! One `Session` is one Running-to-GameOver lifecycle. Restart replaces the
//! whole session; nothing here carries over except the session counter.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Category, Entity, EntityId};
use super::spawn::SpawnScheduler;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Entities move, timers run, contacts are handled
    Running,
    /// Frozen after a fatal contact, waiting for restart
    GameOver,
}

/// Why an entity left the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalReason {
    /// Finished crossing the field
    Expired,
    /// Collected by the player
    Collected,
    /// Discarded with its session on restart
    SessionReset,
}

/// Notifications for the display collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EntitySpawned {
        id: EntityId,
        category: Category,
        pos: Vec2,
    },
    EntityRemoved {
        id: EntityId,
        category: Category,
        reason: RemovalReason,
    },
    BonusCollected {
        score: u64,
    },
    /// Show the terminal marker and the restart control
    GameOver {
        score: u64,
    },
    Restarted {
        session: u32,
    },
}

/// Complete state of one play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Session number (1-based, increments on restart)
    pub number: u32,
    /// Current phase
    pub phase: GamePhase,
    /// Simulated seconds while Running
    pub elapsed_secs: f32,
    /// Live entities (sorted by id, player first)
    pub entities: Vec<Entity>,
    /// Spawn timers
    pub scheduler: SpawnScheduler,
    /// Undrained notifications
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl Session {
    /// Create a Running session holding only the player
    pub fn new(number: u32, settings: &Settings) -> Self {
        let mut session = Self {
            number,
            phase: GamePhase::Running,
            elapsed_secs: 0.0,
            entities: Vec::new(),
            scheduler: SpawnScheduler::from_settings(settings),
            events: Vec::new(),
            next_id: 1,
        };
        session.spawn_player(settings.player_start(), settings.player_size);
        session
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn spawn_player(&mut self, pos: Vec2, size: Vec2) {
        let id = self.next_entity_id();
        self.insert(Entity::player(id, pos, size));
    }

    /// Register an entity and announce it
    pub fn insert(&mut self, entity: Entity) {
        self.events.push(GameEvent::EntitySpawned {
            id: entity.id,
            category: entity.category,
            pos: entity.pos,
        });
        self.entities.push(entity);
    }

    /// Remove an entity by id. The player cannot be removed.
    pub fn remove(&mut self, id: EntityId, reason: RemovalReason) -> Option<Entity> {
        let idx = self
            .entities
            .iter()
            .position(|e| e.id == id && !e.is_player())?;
        let entity = self.entities.remove(idx);
        self.events.push(GameEvent::EntityRemoved {
            id,
            category: entity.category,
            reason,
        });
        Some(entity)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn player(&self) -> Option<&Entity> {
        self.entities.iter().find(|e| e.is_player())
    }

    fn player_mut(&mut self) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.is_player())
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Move the player vertically. Ignored unless Running.
    pub fn set_player_y(&mut self, y: f32) -> bool {
        if !self.is_running() {
            return false;
        }
        match self.player_mut() {
            Some(player) => {
                player.pos.y = y;
                true
            }
            None => false,
        }
    }

    /// Freeze the session after a fatal contact
    pub fn game_over(&mut self, score: u64) {
        if !self.is_running() {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver { score });
        log::info!(
            "Session {} over after {:.1}s (score {})",
            self.number,
            self.elapsed_secs,
            score
        );
    }

    pub fn count(&self, category: Category) -> usize {
        self.entities.iter().filter(|e| e.category == category).count()
    }

    /// Take all pending notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_has_only_player() {
        let settings = Settings::default();
        let session = Session::new(1, &settings);
        assert_eq!(session.phase, GamePhase::Running);
        assert_eq!(session.entities.len(), 1);
        assert_eq!(session.count(Category::Player), 1);
        assert_eq!(session.player().unwrap().pos, settings.player_start());
        assert!(session.scheduler.at_phase_zero());
    }

    #[test]
    fn test_player_cannot_be_removed() {
        let mut session = Session::new(1, &Settings::default());
        let player_id = session.player().unwrap().id;
        assert!(session.remove(player_id, RemovalReason::Collected).is_none());
        assert_eq!(session.count(Category::Player), 1);
    }

    #[test]
    fn test_input_ignored_after_game_over() {
        let mut session = Session::new(1, &Settings::default());
        assert!(session.set_player_y(42.0));
        assert_eq!(session.player().unwrap().pos.y, 42.0);

        session.game_over(0);
        assert!(!session.set_player_y(-100.0));
        assert_eq!(session.player().unwrap().pos.y, 42.0);
    }

    #[test]
    fn test_game_over_emits_once() {
        let mut session = Session::new(1, &Settings::default());
        session.drain_events();
        session.game_over(10);
        session.game_over(10);
        assert_eq!(session.drain_events(), vec![GameEvent::GameOver { score: 10 }]);
    }
}
