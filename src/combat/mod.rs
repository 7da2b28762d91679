//! Combat resolver - single weapon-fire actions resolved into outcomes
//!
//! Owns the authoritative registry of combat entities (position, health,
//! weapon state). Fire resolution is a single raycast hit test with
//! directional spread, a distance/armor damage curve, and categorical
//! cover mitigation - not a flight-path simulation. Every operation
//! completes deterministically or returns a sentinel; nothing throws.

pub mod constants;
pub mod cover;
pub mod entity;
pub mod events;
pub mod resolution;
pub mod weapons;

pub use constants::*;
pub use cover::{cover_effectiveness, CoverEffectiveness};
pub use entity::{CombatEntity, EntityKind};
pub use events::{CombatEvent, CombatEventKind, CombatEventLog};
pub use resolution::{CombatResolver, FireOutcome};
pub use weapons::WeaponState;
