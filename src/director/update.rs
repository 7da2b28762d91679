//! Per-tick director update
//!
//! Runs after the resolver has advanced time for the frame: dead units
//! are reaped, each survivor senses the player, walks its alert ladder,
//! updates morale, picks an objective, and moves along a planned path.
//! Entity positions in the resolver are the authoritative write-back.

use glam::Vec3;
use rand::Rng;

use crate::combat::constants::CENTER_MASS_OFFSET;
use crate::combat::resolution::CombatResolver;
use crate::director::behavior::{advance_alert_state, select_objective, PlayerContact};
use crate::director::constants::{
    ADVANCE_SPEED, AIM_ERROR_RADIUS, COMBAT_SPEED, PATROL_SPEED, WAYPOINT_EPSILON,
};
use crate::director::force::AiDirector;
use crate::director::morale::{self, update_morale};
use crate::director::objectives::TacticalObjective;
use crate::director::units::{AlertState, OpForUnit};
use crate::nav::{DangerZone, Pathfinder};

/// Danger disc placed on the player while planning a retreat path
const RETREAT_DANGER_RADIUS: f32 = 12.0;

fn movement_speed(unit: &OpForUnit) -> f32 {
    if unit.objective.is_retreat() {
        return COMBAT_SPEED;
    }
    match unit.alert_state {
        AlertState::Unaware => PATROL_SPEED,
        AlertState::Suspicious | AlertState::Alert => ADVANCE_SPEED,
        AlertState::Combat => COMBAT_SPEED,
    }
}

fn sense_player(unit: &OpForUnit, player_position: Vec3, nav: &Pathfinder) -> PlayerContact {
    let distance = unit.position.distance(player_position);
    let los = nav.has_line_of_sight(unit.position + Vec3::Y, player_position + Vec3::Y);
    // Close-range contact registers even without sight
    let visible =
        (los && distance <= unit.detection_radius) || distance <= unit.detection_radius * 0.3;
    PlayerContact {
        visible,
        position: player_position,
        distance,
    }
}

fn follow_path(unit: &mut OpForUnit, dt: f32) {
    let speed = movement_speed(unit);
    let mut budget = speed * dt;

    while budget > 0.0 {
        let Some(&waypoint) = unit.path.get(unit.path_cursor) else {
            break;
        };
        let to_waypoint = waypoint - unit.position;
        let span = to_waypoint.length();
        if span <= WAYPOINT_EPSILON {
            unit.path_cursor += 1;
            continue;
        }
        let step = budget.min(span);
        unit.position += to_waypoint / span * step;
        budget -= step;
        if step >= span - WAYPOINT_EPSILON {
            unit.path_cursor += 1;
        }
    }

    if unit.path_cursor >= unit.path.len() {
        unit.path.clear();
        unit.path_cursor = 0;
        // Patrol loops cycle to the next waypoint on arrival
        if let TacticalObjective::Patrol { waypoints, current } = &mut unit.objective {
            if !waypoints.is_empty() {
                *current = (*current + 1) % waypoints.len();
            }
        }
    }
}

impl AiDirector {
    /// Run one frame of director logic for every unit
    pub fn update(
        &mut self,
        player_position: Vec3,
        dt: f32,
        nav: &Pathfinder,
        combat: &mut CombatResolver,
    ) {
        self.reap_dead(combat);

        let multiplier = self.difficulty_multiplier();
        let mut fire_orders = Vec::new();

        for unit in self.units_mut() {
            // The resolver owns health; mirror position both ways.
            let Some(entity) = combat.entity(unit.entity_id) else {
                continue;
            };
            let health_fraction = entity.health / entity.max_health;

            let contact = sense_player(unit, player_position, nav);
            advance_alert_state(unit, contact, dt);
            update_morale(unit, health_fraction, contact.distance, dt);

            let objective = if morale::is_broken(unit) {
                morale::retreat_objective(unit.position, player_position)
            } else {
                select_objective(unit, contact, nav)
            };
            unit.set_objective(objective);

            if unit.path.is_empty() {
                let destination = unit.objective.destination(unit.position);
                if unit.position.distance(destination) > WAYPOINT_EPSILON {
                    let planned = match &unit.objective {
                        TacticalObjective::Flank { target, direction } => {
                            nav.find_flanking_path(unit.position, *target, *direction)
                        }
                        TacticalObjective::Retreat { to } => {
                            // Swing wide of the player on the way out
                            let danger =
                                [DangerZone::new(player_position, RETREAT_DANGER_RADIUS)];
                            nav.find_cover_path(unit.position, *to, &danger)
                        }
                        _ => {
                            let avoid_danger = unit.alert_state >= AlertState::Alert;
                            nav.find_path(unit.position, destination, avoid_danger)
                        }
                    };
                    unit.path = planned.unwrap_or_else(|| vec![unit.position, destination]);
                    unit.path_cursor = 0;
                }
            }
            follow_path(unit, dt);
            combat.set_position(unit.entity_id, unit.position);

            if unit.alert_state == AlertState::Combat
                && contact.visible
                && !unit.objective.is_retreat()
            {
                fire_orders.push((unit.entity_id, unit.position));
            }
        }

        for (entity_id, position) in fire_orders {
            let Some(entity) = combat.entity(entity_id) else {
                continue;
            };
            let Some(weapon) = entity.weapon() else {
                continue;
            };
            if weapon.ammo == 0 {
                combat.reload(entity_id);
                continue;
            }
            if !weapon.ready(combat.time()) {
                continue;
            }
            if position.distance(player_position) > weapon.effective_range {
                continue;
            }

            // Higher difficulty tightens the aim jitter
            let error = AIM_ERROR_RADIUS / multiplier;
            let jitter = Vec3::new(
                self.rng_mut().gen_range(-error..=error),
                self.rng_mut().gen_range(-error..=error) * 0.5,
                self.rng_mut().gen_range(-error..=error),
            );
            let aim_point = player_position + Vec3::Y * CENTER_MASS_OFFSET + jitter;
            let origin = position + Vec3::Y * CENTER_MASS_OFFSET;
            let direction = aim_point - origin;
            if direction.length_squared() > 0.0 {
                combat.process_weapon_fire(entity_id, direction, nav);
            }
        }
    }

    fn reap_dead(&mut self, combat: &mut CombatResolver) {
        let dead: Vec<_> = self
            .units()
            .iter()
            .filter(|u| {
                combat
                    .entity(u.entity_id)
                    .map(|e| !e.is_alive())
                    .unwrap_or(true)
            })
            .map(|u| u.id)
            .collect();
        for id in dead {
            tracing::debug!(unit = ?id, "unit eliminated");
            self.despawn_unit(id, combat);
        }
    }
}
