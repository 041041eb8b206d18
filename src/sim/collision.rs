//! Contact classification and response
//!
//! A contact names two entities. Their categories pick a rule from a fixed
//! pairwise table; the rule decides whether the session ends, a bonus is
//! collected, or nothing happens.

use serde::{Deserialize, Serialize};

use super::entity::{Category, EntityId};
use super::state::{GameEvent, RemovalReason, Session};
use crate::audio::{AudioCue, AudioSink};
use crate::persistence::{KeyValueStore, Result};
use crate::score::ScoreStore;

/// What a category pairing does on contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactRule {
    /// Player hit an obstacle: the session ends
    Fatal,
    /// Player touched a bonus: collect it
    Collect,
    /// Not a contact-worthy pairing
    Ignore,
}

/// Result of handling one contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactOutcome {
    GameOver,
    Collected { bonus: EntityId, score: u64 },
    Ignored,
}

/// Look up the rule for a pairing. Symmetric in its arguments.
///
/// Obstacle involvement is tested before bonus involvement, so a pairing
/// that could match both resolves as fatal.
pub fn classify(a: Category, b: Category) -> ContactRule {
    use Category::*;
    match (a, b) {
        (Player, Obstacle) | (Obstacle, Player) => ContactRule::Fatal,
        (Player, Bonus) | (Bonus, Player) => ContactRule::Collect,
        _ => ContactRule::Ignore,
    }
}

/// Whether contacts between these categories are reported at all
#[inline]
pub fn is_contact_worthy(a: Category, b: Category) -> bool {
    classify(a, b) != ContactRule::Ignore
}

/// Apply one reported contact to the session.
///
/// Contacts are ignored unless the session is Running and both ids are
/// live. Only a score persistence failure is an error.
pub fn resolve_contact<S: KeyValueStore, A: AudioSink>(
    session: &mut Session,
    score: &mut ScoreStore<S>,
    audio: &mut A,
    a: EntityId,
    b: EntityId,
) -> Result<ContactOutcome> {
    if !session.is_running() || a == b {
        return Ok(ContactOutcome::Ignored);
    }
    let (Some(cat_a), Some(cat_b)) = (
        session.entity(a).map(|e| e.category),
        session.entity(b).map(|e| e.category),
    ) else {
        log::trace!("Contact #{}/#{} with a removed entity ignored", a, b);
        return Ok(ContactOutcome::Ignored);
    };

    match classify(cat_a, cat_b) {
        ContactRule::Fatal => {
            log::debug!("Player hit obstacle (#{} / #{})", a, b);
            session.game_over(score.get());
            Ok(ContactOutcome::GameOver)
        }
        ContactRule::Collect => {
            let bonus = if cat_a == Category::Bonus { a } else { b };
            audio.play(AudioCue::BonusCollected);
            // Gone before the score is written, so a failed write can't
            // leave it live to be collected twice
            session.remove(bonus, RemovalReason::Collected);
            let new_score = score.add_bonus()?;
            session.events.push(GameEvent::BonusCollected { score: new_score });
            log::debug!("Collected bonus #{} (score {})", bonus, new_score);
            Ok(ContactOutcome::Collected {
                bonus,
                score: new_score,
            })
        }
        ContactRule::Ignore => Ok(ContactOutcome::Ignored),
    }
}
