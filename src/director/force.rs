//! Opposing-force roster and lifecycle
//!
//! The director owns every hostile unit: spawning them (with a paired
//! combat entity so the resolver can shoot at and through them),
//! grouping them into squads, pacing reinforcements, and feeding player
//! performance into the difficulty controller.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::combat::entity::{CombatEntity, EntityKind};
use crate::combat::resolution::CombatResolver;
use crate::combat::weapons::WeaponState;
use crate::core::types::{SquadId, UnitId};
use crate::director::constants::{
    REINFORCEMENT_BASE_CHANCE, REINFORCEMENT_INTERVAL_SECONDS, SQUAD_SCATTER_RADIUS,
};
use crate::director::difficulty::{DifficultyController, PerformanceMetrics};
use crate::director::squad::{self, Squad};
use crate::director::units::{AiDifficulty, Doctrine, OpForUnit, UnitType};

/// Roster snapshot for telemetry and the runner summary
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EnemyStats {
    pub active: usize,
    pub in_combat: usize,
    pub average_morale: f32,
    pub difficulty_multiplier: f32,
}

/// Owns the opposing force and its shared pacing state
#[derive(Debug)]
pub struct AiDirector {
    units: Vec<OpForUnit>,
    squads: Vec<Squad>,
    difficulty: DifficultyController,
    spawn_points: Vec<Vec3>,
    rng: ChaCha8Rng,
    reinforcement_timer: f32,
}

impl AiDirector {
    pub fn new(seed: u64) -> Self {
        Self {
            units: Vec::new(),
            squads: Vec::new(),
            difficulty: DifficultyController::new(),
            spawn_points: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            reinforcement_timer: 0.0,
        }
    }

    pub fn set_spawn_points(&mut self, points: Vec<Vec3>) {
        self.spawn_points = points;
    }

    pub fn units(&self) -> &[OpForUnit] {
        &self.units
    }

    pub fn units_mut(&mut self) -> &mut [OpForUnit] {
        &mut self.units
    }

    pub(crate) fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn unit(&self, id: UnitId) -> Option<&OpForUnit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn squad(&self, id: SquadId) -> Option<&Squad> {
        self.squads.iter().find(|s| s.id == id)
    }

    pub fn squads(&self) -> &[Squad] {
        &self.squads
    }

    pub fn difficulty_multiplier(&self) -> f32 {
        self.difficulty.multiplier()
    }

    pub fn max_active_enemies(&self) -> u32 {
        self.difficulty.max_active_enemies()
    }

    /// Fold one performance window into the difficulty knobs
    pub fn adjust_difficulty(&mut self, metrics: &PerformanceMetrics) {
        self.difficulty.adjust(metrics);
    }

    fn loadout(unit_type: UnitType) -> Vec<WeaponState> {
        match unit_type {
            UnitType::Infantry => vec![WeaponState::rifle()],
            UnitType::Marksman => vec![WeaponState::marksman(), WeaponState::carbine()],
            UnitType::Support => vec![WeaponState::carbine()],
        }
    }

    /// Spawn one unit and its paired combat entity
    pub fn spawn_enemy(
        &mut self,
        unit_type: UnitType,
        position: Vec3,
        difficulty: AiDifficulty,
        doctrine: Doctrine,
        combat: &mut CombatResolver,
    ) -> UnitId {
        let mut entity = CombatEntity::with_weapons(EntityKind::Hostile, Self::loadout(unit_type));
        entity.position = position;
        entity.armor = difficulty.armor();
        let entity_id = combat.register_entity(entity);

        let unit = OpForUnit::new(entity_id, unit_type, position, difficulty, doctrine);
        let id = unit.id;
        tracing::debug!(unit = ?id, ?unit_type, ?difficulty, "enemy spawned");
        self.units.push(unit);
        id
    }

    /// Spawn a squad scattered around a point and wire up membership
    pub fn spawn_squad(
        &mut self,
        size: usize,
        center: Vec3,
        difficulty: AiDifficulty,
        doctrine: Doctrine,
        combat: &mut CombatResolver,
    ) -> SquadId {
        let mut members = Vec::with_capacity(size);
        for index in 0..size {
            let unit_type = match index {
                0 => UnitType::Support,
                1 => UnitType::Marksman,
                _ => UnitType::Infantry,
            };
            let offset = Vec3::new(
                self.rng.gen_range(-SQUAD_SCATTER_RADIUS..=SQUAD_SCATTER_RADIUS),
                0.0,
                self.rng.gen_range(-SQUAD_SCATTER_RADIUS..=SQUAD_SCATTER_RADIUS),
            );
            members.push(self.spawn_enemy(unit_type, center + offset, difficulty, doctrine, combat));
        }

        let squad = Squad::new(members);
        let squad_id = squad.id;
        for member in &squad.members {
            if let Some(unit) = self.units.iter_mut().find(|u| u.id == *member) {
                unit.squad_id = Some(squad_id);
            }
        }
        tracing::info!(squad = ?squad_id, size, "squad spawned");
        self.squads.push(squad);
        squad_id
    }

    /// Remove a unit from the roster, its squad, and the resolver
    pub fn despawn_unit(&mut self, id: UnitId, combat: &mut CombatResolver) {
        let Some(index) = self.units.iter().position(|u| u.id == id) else {
            return;
        };
        let unit = self.units.remove(index);
        combat.unregister_entity(unit.entity_id);
        for squad in &mut self.squads {
            squad.remove_member(id);
        }
        self.squads.retain(|s| !s.is_empty());
        tracing::debug!(unit = ?id, "unit despawned");
    }

    /// Advance the reinforcement clock; true when a wave should spawn
    ///
    /// Fires at a fixed cadence, gated on the population cap. A force
    /// below half the cap always gets a wave; above that a seeded roll
    /// keeps waves steady but not metronomic.
    pub fn should_spawn_reinforcements(&mut self, dt: f32) -> bool {
        self.reinforcement_timer += dt;
        if self.reinforcement_timer < REINFORCEMENT_INTERVAL_SECONDS {
            return false;
        }
        self.reinforcement_timer = 0.0;

        let active = self.units.len() as u32;
        let cap = self.difficulty.max_active_enemies();
        if active >= cap {
            return false;
        }
        if active < cap / 2 {
            tracing::debug!(active, cap, "force depleted, reinforcing");
            return true;
        }
        let chance = REINFORCEMENT_BASE_CHANCE * self.difficulty.multiplier();
        self.rng.gen::<f32>() < chance
    }

    /// Spawn a reinforcement squad at a random spawn point
    pub fn spawn_reinforcements(
        &mut self,
        size: usize,
        difficulty: AiDifficulty,
        combat: &mut CombatResolver,
    ) -> Option<SquadId> {
        if self.spawn_points.is_empty() {
            return None;
        }
        let headroom = self
            .difficulty
            .max_active_enemies()
            .saturating_sub(self.units.len() as u32) as usize;
        let size = size.min(headroom);
        if size == 0 {
            return None;
        }
        let point = self.spawn_points[self.rng.gen_range(0..self.spawn_points.len())];
        Some(self.spawn_squad(size, point, difficulty, Doctrine::Conventional, combat))
    }

    pub fn coordinate_squad(&mut self, id: SquadId, target: Vec3) {
        if let Some(index) = self.squads.iter().position(|s| s.id == id) {
            let squad = self.squads[index].clone();
            squad::coordinate_squad(&squad, &mut self.units, target);
        }
    }

    pub fn form_defensive_perimeter(&mut self, id: SquadId, center: Vec3, radius: f32) {
        if let Some(index) = self.squads.iter().position(|s| s.id == id) {
            let squad = self.squads[index].clone();
            squad::form_defensive_perimeter(&squad, &mut self.units, center, radius);
        }
    }

    pub fn enemy_stats(&self) -> EnemyStats {
        let active = self.units.len();
        let in_combat = self
            .units
            .iter()
            .filter(|u| u.alert_state == crate::director::units::AlertState::Combat)
            .count();
        let average_morale = if active == 0 {
            0.0
        } else {
            self.units.iter().map(|u| u.morale).sum::<f32>() / active as f32
        };
        EnemyStats {
            active,
            in_combat,
            average_morale,
            difficulty_multiplier: self.difficulty.multiplier(),
        }
    }

    /// Clear the roster and pacing state, keeping the rng stream
    pub fn reset(&mut self, combat: &mut CombatResolver) {
        for unit in self.units.drain(..) {
            combat.unregister_entity(unit.entity_id);
        }
        self.squads.clear();
        self.difficulty.reset();
        self.reinforcement_timer = 0.0;
    }
}
