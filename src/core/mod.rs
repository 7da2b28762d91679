//! Shared identifiers, time units, and the crate error type

pub mod error;
pub mod types;

pub use error::{Result, SimError};
pub use types::{EntityId, SquadId, Tick, UnitId};
