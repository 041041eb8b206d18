//! Session simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering,
//! audio backends and storage formats:
//! - Time only advances through an explicit `dt`
//! - Randomness comes from a caller-supplied RNG
//! - Stable iteration order (by entity ID)

pub mod collision;
pub mod contact;
pub mod entity;
pub mod placement;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{ContactOutcome, ContactRule, classify, is_contact_worthy, resolve_contact};
pub use contact::{Contact, detect_contacts};
pub use entity::{Aabb, Category, Entity, EntityId};
pub use placement::{Candidate, PlacementPolicy};
pub use spawn::{SpawnScheduler, SpawnTimer};
pub use state::{GameEvent, GamePhase, RemovalReason, Session};
pub use tick::{TickInput, move_entities};
