//! Alert state machine and objective selection
//!
//! Each unit climbs Unaware -> Suspicious -> Alert -> Combat while the
//! player stays in view, confirmed by timers so a one-frame glimpse does
//! not trigger a full combat response. Losing contact walks the ladder
//! back down one step at a time after a decay delay. The alert state then
//! drives which tactical objective the unit pursues.

use glam::Vec3;

use crate::director::constants::{
    AGGRESSIVE_MORALE_THRESHOLD, CLOSE_DISTANCE_THRESHOLD, COMBAT_CONFIRM_SECONDS,
    COVER_SEARCH_RADIUS, DEFEND_ZONE_RADIUS, SUSPICIOUS_CONFIRM_SECONDS, VISIBILITY_DECAY_SECONDS,
};
use crate::director::objectives::TacticalObjective;
use crate::director::units::{AlertState, OpForUnit};
use crate::nav::Pathfinder;

/// One frame of sensing against the player
#[derive(Debug, Clone, Copy)]
pub struct PlayerContact {
    pub visible: bool,
    pub position: Vec3,
    pub distance: f32,
}

/// Step the alert ladder for one tick of contact (or absence of it)
pub fn advance_alert_state(unit: &mut OpForUnit, contact: PlayerContact, dt: f32) {
    if contact.visible {
        unit.visible_timer += dt;
        unit.lost_timer = 0.0;
        unit.last_known_player_position = Some(contact.position);

        let confirmed = match unit.alert_state {
            AlertState::Unaware => true,
            AlertState::Suspicious => unit.visible_timer >= SUSPICIOUS_CONFIRM_SECONDS,
            AlertState::Alert => unit.visible_timer >= COMBAT_CONFIRM_SECONDS,
            AlertState::Combat => false,
        };
        if confirmed {
            let next = unit.alert_state.escalated();
            tracing::trace!(unit = ?unit.id, from = ?unit.alert_state, to = ?next, "alert escalated");
            unit.alert_state = next;
            unit.visible_timer = 0.0;
        }
    } else {
        unit.visible_timer = 0.0;
        unit.lost_timer += dt;

        if unit.lost_timer >= VISIBILITY_DECAY_SECONDS && unit.alert_state != AlertState::Unaware {
            let decayed = unit.alert_state.decayed();
            tracing::trace!(unit = ?unit.id, from = ?unit.alert_state, to = ?decayed, "alert decayed");
            unit.alert_state = decayed;
            unit.lost_timer = 0.0;
        }
    }
}

/// Pick the objective the current alert state calls for
///
/// Morale-driven retreat is layered on top by the caller; this function
/// only expresses the alert ladder.
pub fn select_objective(unit: &OpForUnit, contact: PlayerContact, nav: &Pathfinder) -> TacticalObjective {
    match unit.alert_state {
        AlertState::Unaware => {
            if unit.objective.label() == "patrol" {
                unit.objective.clone()
            } else {
                TacticalObjective::Patrol {
                    waypoints: crate::director::units::patrol_loop(unit.spawn_position),
                    current: 0,
                }
            }
        }
        AlertState::Suspicious => {
            let target = unit.last_known_player_position.unwrap_or(contact.position);
            TacticalObjective::Attack { target }
        }
        AlertState::Alert => {
            let position = nav
                .find_nearest_cover(unit.position, COVER_SEARCH_RADIUS)
                .unwrap_or(unit.position);
            TacticalObjective::Defend {
                position,
                radius: DEFEND_ZONE_RADIUS,
            }
        }
        AlertState::Combat => {
            if contact.distance > CLOSE_DISTANCE_THRESHOLD {
                TacticalObjective::Attack {
                    target: contact.position,
                }
            } else if unit.morale > AGGRESSIVE_MORALE_THRESHOLD {
                TacticalObjective::Suppress {
                    target: contact.position,
                }
            } else {
                let position = nav
                    .find_nearest_cover(unit.position, COVER_SEARCH_RADIUS)
                    .unwrap_or(unit.position);
                TacticalObjective::Defend {
                    position,
                    radius: DEFEND_ZONE_RADIUS,
                }
            }
        }
    }
}
