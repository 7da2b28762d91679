//! AI director
//!
//! The opposing force's brain: unit lifecycle and squads, the alert and
//! morale state machines, tactical objective selection, and adaptive
//! difficulty. The director reads the navigation layer for paths and
//! sight lines and writes movement and fire orders into the combat
//! resolver.

pub mod behavior;
pub mod constants;
pub mod difficulty;
pub mod force;
pub mod morale;
pub mod objectives;
pub mod squad;
pub mod units;
pub mod update;

pub use behavior::{advance_alert_state, select_objective, PlayerContact};
pub use difficulty::{DifficultyController, PerformanceMetrics};
pub use force::{AiDirector, EnemyStats};
pub use morale::{is_broken, retreat_objective, update_morale};
pub use objectives::{SquadRole, TacticalObjective};
pub use squad::Squad;
pub use units::{AiDifficulty, AlertState, Doctrine, OpForUnit, UnitType};
