//! Combat entities - anything that can take damage or fire

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::combat::weapons::WeaponState;
use crate::core::types::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Friendly,
    Hostile,
}

/// Registry record for one combatant
///
/// The resolver's copy is authoritative for position, health, and weapon
/// state; other components reference entities by id only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatEntity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Vec3,
    /// Orientation used for cover effectiveness; defaults to -Z when the
    /// host never updates it
    pub facing: Vec3,
    pub health: f32,
    pub max_health: f32,
    /// Damage-reduction factor in [0, 1]
    pub armor: f32,
    pub weapons: Vec<WeaponState>,
    pub equipped: usize,
}

impl CombatEntity {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            id: EntityId::new(),
            kind,
            position: Vec3::ZERO,
            facing: Vec3::NEG_Z,
            health: 100.0,
            max_health: 100.0,
            armor: 0.0,
            weapons: Vec::new(),
            equipped: 0,
        }
    }

    pub fn with_weapons(kind: EntityKind, weapons: Vec<WeaponState>) -> Self {
        Self {
            weapons,
            ..Self::new(kind)
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn weapon(&self) -> Option<&WeaponState> {
        self.weapons.get(self.equipped)
    }

    pub fn weapon_mut(&mut self) -> Option<&mut WeaponState> {
        self.weapons.get_mut(self.equipped)
    }

    /// Apply damage with clamping; health never drops below zero
    pub fn apply_damage(&mut self, amount: f32) {
        self.health = (self.health - amount.max(0.0)).clamp(0.0, self.max_health);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut entity = CombatEntity::new(EntityKind::Hostile);
        entity.apply_damage(250.0);
        assert_eq!(entity.health, 0.0);
        assert!(!entity.is_alive());
    }

    #[test]
    fn test_negative_damage_is_ignored() {
        let mut entity = CombatEntity::new(EntityKind::Friendly);
        entity.apply_damage(-50.0);
        assert_eq!(entity.health, 100.0);
    }

    #[test]
    fn test_equipped_weapon_lookup() {
        let entity = CombatEntity::with_weapons(
            EntityKind::Friendly,
            vec![WeaponState::rifle(), WeaponState::marksman()],
        );
        assert_eq!(entity.weapon().unwrap().name, "rifle");

        let bare = CombatEntity::new(EntityKind::Friendly);
        assert!(bare.weapon().is_none());
    }
}
