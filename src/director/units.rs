//! OpFor units - AI state wrapped around a combat entity reference
//!
//! Units reference their combat entity by id only; the resolver stays
//! authoritative for position and health. The `position` field here is a
//! per-tick cached mirror, synced at the start of every director update.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, SquadId, UnitId};
use crate::director::constants::{BASE_DETECTION_RADIUS, MORALE_MAX, PATROL_RADIUS};
use crate::director::objectives::TacticalObjective;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitType {
    Infantry,
    Marksman,
    Support,
}

/// Tactical doctrine - shapes objective selection at the margins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Doctrine {
    Conventional,
    Guerrilla,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiDifficulty {
    Easy,
    Medium,
    Hard,
}

impl AiDifficulty {
    /// Scales how far the unit notices the player
    pub fn detection_multiplier(self) -> f32 {
        match self {
            AiDifficulty::Easy => 0.7,
            AiDifficulty::Medium => 1.0,
            AiDifficulty::Hard => 1.4,
        }
    }

    /// Armor damage-reduction factor for spawned entities
    pub fn armor(self) -> f32 {
        match self {
            AiDifficulty::Easy => 0.0,
            AiDifficulty::Medium => 0.1,
            AiDifficulty::Hard => 0.2,
        }
    }
}

/// Per-unit awareness level
///
/// Transitions climb one step at a time on confirmation and decay one
/// step at a time when contact is lost - never skipped arbitrarily.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertState {
    Unaware,
    Suspicious,
    Alert,
    Combat,
}

impl AlertState {
    pub fn escalated(self) -> Self {
        match self {
            AlertState::Unaware => AlertState::Suspicious,
            AlertState::Suspicious => AlertState::Alert,
            AlertState::Alert | AlertState::Combat => AlertState::Combat,
        }
    }

    pub fn decayed(self) -> Self {
        match self {
            AlertState::Combat => AlertState::Alert,
            AlertState::Alert => AlertState::Suspicious,
            AlertState::Suspicious | AlertState::Unaware => AlertState::Unaware,
        }
    }
}

/// A hostile agent under director control
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpForUnit {
    pub id: UnitId,
    pub entity_id: EntityId,
    pub unit_type: UnitType,
    pub doctrine: Doctrine,
    pub difficulty: AiDifficulty,
    pub squad_id: Option<SquadId>,

    pub alert_state: AlertState,
    pub morale: f32,
    pub objective: TacticalObjective,
    pub last_known_player_position: Option<Vec3>,
    pub detection_radius: f32,

    /// Cached mirror of the resolver's authoritative position
    pub position: Vec3,
    pub spawn_position: Vec3,

    /// Current planned path and progress along it
    pub path: Vec<Vec3>,
    pub path_cursor: usize,

    /// Seconds of sustained contact / sustained loss, driving the FSM
    pub visible_timer: f32,
    pub lost_timer: f32,
}

impl OpForUnit {
    pub fn new(
        entity_id: EntityId,
        unit_type: UnitType,
        position: Vec3,
        difficulty: AiDifficulty,
        doctrine: Doctrine,
    ) -> Self {
        Self {
            id: UnitId::new(),
            entity_id,
            unit_type,
            doctrine,
            difficulty,
            squad_id: None,
            alert_state: AlertState::Unaware,
            morale: MORALE_MAX,
            objective: TacticalObjective::Patrol {
                waypoints: patrol_loop(position),
                current: 0,
            },
            last_known_player_position: None,
            detection_radius: BASE_DETECTION_RADIUS * difficulty.detection_multiplier(),
            position,
            spawn_position: position,
            path: Vec::new(),
            path_cursor: 0,
            visible_timer: 0.0,
            lost_timer: 0.0,
        }
    }

    /// Morale is clamped to [0, 100] after every mutation
    pub fn set_morale(&mut self, value: f32) {
        self.morale = value.clamp(0.0, MORALE_MAX);
    }

    pub fn set_objective(&mut self, objective: TacticalObjective) {
        if objective != self.objective {
            tracing::trace!(unit = ?self.id, from = self.objective.label(), to = objective.label(), "objective changed");
            self.objective = objective;
            self.path.clear();
            self.path_cursor = 0;
        }
    }
}

/// Square loop of patrol waypoints around a spawn point
pub fn patrol_loop(center: Vec3) -> Vec<Vec3> {
    vec![
        center + Vec3::new(PATROL_RADIUS, 0.0, 0.0),
        center + Vec3::new(0.0, 0.0, PATROL_RADIUS),
        center + Vec3::new(-PATROL_RADIUS, 0.0, 0.0),
        center + Vec3::new(0.0, 0.0, -PATROL_RADIUS),
    ]
}
