//! Reference contact detection
//!
//! Stand-in for an engine's physics world: reports every overlapping pair
//! of live entities whose categories are contact-worthy. Hosts with their
//! own physics can skip this and feed contacts to `Game::on_contact`.

use serde::{Deserialize, Serialize};

use super::collision::is_contact_worthy;
use super::entity::{Entity, EntityId};

/// Two entities whose bounds overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub a: EntityId,
    pub b: EntityId,
}

/// Find contact-worthy overlaps, ordered by (a, b) id
pub fn detect_contacts(entities: &[Entity]) -> Vec<Contact> {
    let mut contacts = Vec::new();
    for (i, first) in entities.iter().enumerate() {
        for second in &entities[i + 1..] {
            if !is_contact_worthy(first.category, second.category) {
                continue;
            }
            if first.bounds().intersects(&second.bounds()) {
                let (a, b) = if first.id < second.id {
                    (first.id, second.id)
                } else {
                    (second.id, first.id)
                };
                contacts.push(Contact { a, b });
            }
        }
    }
    contacts.sort_by_key(|c| (c.a, c.b));
    contacts
}
