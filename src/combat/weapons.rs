//! Weapon state and the distance/armor damage curve

use serde::{Deserialize, Serialize};

/// Per-weapon mutable state plus its fixed ballistic parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponState {
    pub name: String,
    pub ammo: u32,
    pub magazine_size: u32,
    /// Minimum seconds between shots
    pub fire_interval: f32,
    /// Sim time of the last shot; negative means never fired
    pub last_fired: f32,
    pub base_damage: f32,
    pub effective_range: f32,
    /// Fraction of base damage lost at maximum effective range
    pub falloff: f32,
    /// Scales the directional spread cone
    pub recoil_multiplier: f32,
    pub headshot_multiplier: f32,
}

impl WeaponState {
    /// Standard service rifle
    pub fn rifle() -> Self {
        Self {
            name: "rifle".into(),
            ammo: 30,
            magazine_size: 30,
            fire_interval: 0.12,
            last_fired: -1.0,
            base_damage: 32.0,
            effective_range: 300.0,
            falloff: 0.5,
            recoil_multiplier: 1.0,
            headshot_multiplier: 2.5,
        }
    }

    /// Short-barrel carbine: faster cadence, more spread, shorter reach
    pub fn carbine() -> Self {
        Self {
            name: "carbine".into(),
            ammo: 25,
            magazine_size: 25,
            fire_interval: 0.09,
            last_fired: -1.0,
            base_damage: 26.0,
            effective_range: 180.0,
            falloff: 0.6,
            recoil_multiplier: 1.4,
            headshot_multiplier: 2.0,
        }
    }

    /// Marksman rifle: slow, tight, long reach
    pub fn marksman() -> Self {
        Self {
            name: "marksman".into(),
            ammo: 10,
            magazine_size: 10,
            fire_interval: 0.9,
            last_fired: -1.0,
            base_damage: 70.0,
            effective_range: 600.0,
            falloff: 0.3,
            recoil_multiplier: 0.4,
            headshot_multiplier: 3.0,
        }
    }

    /// Whether the weapon can fire now: has ammo and is off cooldown
    pub fn ready(&self, now: f32) -> bool {
        self.ammo > 0 && (self.last_fired < 0.0 || now - self.last_fired >= self.fire_interval)
    }

    /// Damage as a function of distance, headshot flag, and the target's
    /// armor damage-reduction factor
    pub fn damage_at(&self, distance: f32, headshot: bool, armor: f32) -> f32 {
        let t = (distance / self.effective_range).clamp(0.0, 1.0);
        let mut damage = self.base_damage * (1.0 - self.falloff * t);
        if headshot {
            damage *= self.headshot_multiplier;
        }
        damage * (1.0 - armor.clamp(0.0, 1.0))
    }

    pub fn refill(&mut self) {
        self.ammo = self.magazine_size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_falls_off_with_distance() {
        let weapon = WeaponState::rifle();
        let near = weapon.damage_at(10.0, false, 0.0);
        let far = weapon.damage_at(290.0, false, 0.0);
        assert!(near > far);
        assert!(far > 0.0);
    }

    #[test]
    fn test_damage_capped_beyond_effective_range() {
        let weapon = WeaponState::rifle();
        let at_range = weapon.damage_at(300.0, false, 0.0);
        let beyond = weapon.damage_at(900.0, false, 0.0);
        assert_eq!(at_range, beyond);
    }

    #[test]
    fn test_headshot_multiplies_damage() {
        let weapon = WeaponState::rifle();
        let body = weapon.damage_at(50.0, false, 0.0);
        let head = weapon.damage_at(50.0, true, 0.0);
        assert!((head - body * weapon.headshot_multiplier).abs() < 1e-4);
    }

    #[test]
    fn test_armor_reduces_damage() {
        let weapon = WeaponState::rifle();
        let unarmored = weapon.damage_at(50.0, false, 0.0);
        let armored = weapon.damage_at(50.0, false, 0.3);
        assert!((armored - unarmored * 0.7).abs() < 1e-4);
        // Degenerate armor values clamp instead of inverting damage
        assert_eq!(weapon.damage_at(50.0, false, 2.0), 0.0);
    }

    #[test]
    fn test_ready_gates_on_ammo_and_cooldown() {
        let mut weapon = WeaponState::rifle();
        assert!(weapon.ready(0.0));

        weapon.last_fired = 10.0;
        assert!(!weapon.ready(10.05));
        assert!(weapon.ready(10.0 + weapon.fire_interval));

        weapon.ammo = 0;
        assert!(!weapon.ready(20.0));
    }
}
