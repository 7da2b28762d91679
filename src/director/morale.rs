//! Morale model
//!
//! Morale drains under wounds and player pressure, recovers at distance,
//! and - below the retreat threshold - overrides whatever objective the
//! alert state machine would otherwise pick. Morale is the higher-priority
//! signal; the override is applied after alert-driven selection each tick.

use glam::Vec3;

use crate::director::constants::{
    LOW_HEALTH_FRACTION, MORALE_LOW_HEALTH_DRAIN, MORALE_PROXIMITY_DRAIN, MORALE_RECOVERY_RATE,
    MORALE_RETREAT_THRESHOLD, PLAYER_FAR_RANGE, PLAYER_PROXIMITY_RANGE, RETREAT_DISTANCE,
};
use crate::director::objectives::TacticalObjective;
use crate::director::units::OpForUnit;

/// Apply one tick of morale drift
///
/// `health_fraction` is current/max health from the authoritative entity.
pub fn update_morale(unit: &mut OpForUnit, health_fraction: f32, player_distance: f32, dt: f32) {
    let mut morale = unit.morale;

    if health_fraction < LOW_HEALTH_FRACTION {
        morale -= MORALE_LOW_HEALTH_DRAIN * dt;
    }
    if player_distance < PLAYER_PROXIMITY_RANGE {
        morale -= MORALE_PROXIMITY_DRAIN * dt;
    } else if player_distance > PLAYER_FAR_RANGE {
        morale += MORALE_RECOVERY_RATE * dt;
    }

    unit.set_morale(morale);
}

/// Whether morale forces a retreat regardless of alert state
pub fn is_broken(unit: &OpForUnit) -> bool {
    unit.morale < MORALE_RETREAT_THRESHOLD
}

/// Retreat objective pointing away from the player
pub fn retreat_objective(position: Vec3, player_position: Vec3) -> TacticalObjective {
    let away = (position - player_position).normalize_or_zero();
    let direction = if away == Vec3::ZERO { Vec3::Z } else { away };
    TacticalObjective::Retreat {
        to: position + direction * RETREAT_DISTANCE,
    }
}
