//! Per-frame input and movement

use super::entity::EntityId;
use super::state::{RemovalReason, Session};

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Target player height (from pointer/touch tracking)
    pub target_y: Option<f32>,
    /// Restart control activated
    pub restart: bool,
}

impl TickInput {
    pub fn steer(y: f32) -> Self {
        Self {
            target_y: Some(y),
            ..Default::default()
        }
    }

    pub fn restart() -> Self {
        Self {
            restart: true,
            ..Default::default()
        }
    }
}

/// Move every entity along its trajectory and drop the ones that finished
/// crossing the field. Does nothing unless the session is Running.
///
/// Returns the ids that expired.
pub fn move_entities(session: &mut Session, dt: f32) -> Vec<EntityId> {
    if !session.is_running() {
        return Vec::new();
    }
    session.elapsed_secs += dt;

    let expired: Vec<EntityId> = session
        .entities
        .iter_mut()
        .filter_map(|e| e.step(dt).then_some(e.id))
        .collect();
    for &id in &expired {
        session.remove(id, RemovalReason::Expired);
    }
    expired
}
