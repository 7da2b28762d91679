//! Tactical objectives - tagged variants carrying only the data each needs

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::nav::FlankDirection;

/// The current goal assigned to a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TacticalObjective {
    /// Close on and engage a position
    Attack { target: Vec3 },
    /// Approach a target from one side
    Flank {
        target: Vec3,
        direction: FlankDirection,
    },
    /// Hold position and keep fire on a target area
    Suppress { target: Vec3 },
    /// Hold a small zone
    Defend { position: Vec3, radius: f32 },
    /// Fall back to a point away from the threat
    Retreat { to: Vec3 },
    /// Walk a loop of waypoints
    Patrol { waypoints: Vec<Vec3>, current: usize },
}

impl TacticalObjective {
    /// Where the unit should currently be heading
    ///
    /// `position` is the unit's own position, used when the objective
    /// has no movement component of its own.
    pub fn destination(&self, position: Vec3) -> Vec3 {
        match self {
            TacticalObjective::Attack { target } => *target,
            TacticalObjective::Flank { target, .. } => *target,
            TacticalObjective::Suppress { .. } => position,
            TacticalObjective::Defend { position, .. } => *position,
            TacticalObjective::Retreat { to } => *to,
            TacticalObjective::Patrol { waypoints, current } => waypoints
                .get(*current % waypoints.len().max(1))
                .copied()
                .unwrap_or(position),
        }
    }

    pub fn is_retreat(&self) -> bool {
        matches!(self, TacticalObjective::Retreat { .. })
    }

    /// Short name for logging and stats
    pub fn label(&self) -> &'static str {
        match self {
            TacticalObjective::Attack { .. } => "attack",
            TacticalObjective::Flank { .. } => "flank",
            TacticalObjective::Suppress { .. } => "suppress",
            TacticalObjective::Defend { .. } => "defend",
            TacticalObjective::Retreat { .. } => "retreat",
            TacticalObjective::Patrol { .. } => "patrol",
        }
    }
}

/// Role handed out during squad coordination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SquadRole {
    Suppress,
    FlankLeft,
    FlankRight,
    Advance,
}

impl SquadRole {
    /// Round-robin role by member index
    pub fn for_member(index: usize) -> Self {
        match index % 4 {
            0 => SquadRole::Suppress,
            1 => SquadRole::FlankLeft,
            2 => SquadRole::FlankRight,
            _ => SquadRole::Advance,
        }
    }

    pub fn objective(self, target: Vec3) -> TacticalObjective {
        match self {
            SquadRole::Suppress => TacticalObjective::Suppress { target },
            SquadRole::FlankLeft => TacticalObjective::Flank {
                target,
                direction: FlankDirection::Left,
            },
            SquadRole::FlankRight => TacticalObjective::Flank {
                target,
                direction: FlankDirection::Right,
            },
            SquadRole::Advance => TacticalObjective::Attack { target },
        }
    }
}
