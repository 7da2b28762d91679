//! Squad grouping and coordinated maneuvers

use std::f32::consts::TAU;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::types::SquadId;
use crate::core::types::UnitId;
use crate::director::constants::DEFEND_ZONE_RADIUS;
use crate::director::objectives::{SquadRole, TacticalObjective};
use crate::director::units::OpForUnit;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Squad {
    pub id: SquadId,
    pub members: Vec<UnitId>,
}

impl Squad {
    pub fn new(members: Vec<UnitId>) -> Self {
        Self {
            id: SquadId::new(),
            members,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn remove_member(&mut self, unit: UnitId) {
        self.members.retain(|m| *m != unit);
    }
}

/// Hand out role-based objectives round-robin over squad members
///
/// Member order within the squad is stable, so role assignment is
/// deterministic across ticks. Units outside the squad are untouched.
pub fn coordinate_squad(squad: &Squad, units: &mut [OpForUnit], target: Vec3) {
    for (index, member) in squad.members.iter().enumerate() {
        let role = SquadRole::for_member(index);
        if let Some(unit) = units.iter_mut().find(|u| u.id == *member) {
            unit.set_objective(role.objective(target));
        }
    }
}

/// Place squad members on a ring around a point, each defending its slot
pub fn form_defensive_perimeter(squad: &Squad, units: &mut [OpForUnit], center: Vec3, radius: f32) {
    let count = squad.members.len();
    if count == 0 {
        return;
    }
    for (index, member) in squad.members.iter().enumerate() {
        let angle = index as f32 / count as f32 * TAU;
        let slot = center + Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius);
        if let Some(unit) = units.iter_mut().find(|u| u.id == *member) {
            unit.set_objective(TacticalObjective::Defend {
                position: slot,
                radius: DEFEND_ZONE_RADIUS,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::EntityId;
    use crate::director::units::{AiDifficulty, Doctrine, UnitType};

    fn squad_of(n: usize) -> (Squad, Vec<OpForUnit>) {
        let units: Vec<OpForUnit> = (0..n)
            .map(|i| {
                OpForUnit::new(
                    EntityId::new(),
                    UnitType::Infantry,
                    Vec3::new(i as f32, 0.0, 0.0),
                    AiDifficulty::Medium,
                    Doctrine::Conventional,
                )
            })
            .collect();
        let squad = Squad::new(units.iter().map(|u| u.id).collect());
        (squad, units)
    }

    #[test]
    fn test_coordinate_assigns_roles_in_order() {
        let (squad, mut units) = squad_of(4);
        let target = Vec3::new(20.0, 0.0, 0.0);
        coordinate_squad(&squad, &mut units, target);

        assert!(matches!(units[0].objective, TacticalObjective::Suppress { .. }));
        assert!(matches!(
            units[1].objective,
            TacticalObjective::Flank { .. }
        ));
        assert!(matches!(
            units[2].objective,
            TacticalObjective::Flank { .. }
        ));
        assert!(matches!(units[3].objective, TacticalObjective::Attack { .. }));
    }

    #[test]
    fn test_four_member_perimeter_is_square() {
        let (squad, mut units) = squad_of(4);
        let center = Vec3::new(5.0, 0.0, 5.0);
        form_defensive_perimeter(&squad, &mut units, center, 6.0);

        let slots: Vec<Vec3> = units
            .iter()
            .map(|u| match u.objective {
                TacticalObjective::Defend { position, .. } => position,
                _ => panic!("expected defend"),
            })
            .collect();

        for slot in &slots {
            assert!(((*slot - center).length() - 6.0).abs() < 1e-4);
        }
        // Adjacent slots sit 90 degrees apart
        let a = (slots[0] - center).normalize();
        let b = (slots[1] - center).normalize();
        assert!(a.dot(b).abs() < 1e-4);
    }

    #[test]
    fn test_empty_squad_is_a_no_op() {
        let squad = Squad::new(Vec::new());
        let mut units: Vec<OpForUnit> = Vec::new();
        form_defensive_perimeter(&squad, &mut units, Vec3::ZERO, 5.0);
        coordinate_squad(&squad, &mut units, Vec3::ZERO);
    }

    #[test]
    fn test_remove_member() {
        let (mut squad, units) = squad_of(3);
        squad.remove_member(units[1].id);
        assert_eq!(squad.members.len(), 2);
        assert!(!squad.members.contains(&units[1].id));
    }
}
