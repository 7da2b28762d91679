//! Combat resolution constants - all tunable values in one place

// Hit testing
/// Ray-to-point proximity radius for an entity hit (world units)
pub const HIT_RADIUS: f32 = 0.6;
/// Aim center height above an entity's base position
pub const CENTER_MASS_OFFSET: f32 = 0.9;
/// Hit points at or above this height over the base position count as headshots
pub const HEAD_HEIGHT_OFFSET: f32 = 1.4;

// Spread
/// Maximum aim perturbation (radians) at recoil multiplier 1.0
pub const BASE_SPREAD_RADIANS: f32 = 0.035;

// Cover effectiveness thresholds (cosine of angle between facing and
// incoming fire)
pub const FULL_COVER_COSINE: f32 = 0.7;
pub const PARTIAL_COVER_COSINE: f32 = 0.0;

// Cover damage multipliers
pub const EXPOSED_DAMAGE_MULTIPLIER: f32 = 1.0;
pub const PARTIAL_COVER_DAMAGE_MULTIPLIER: f32 = 0.5;
pub const FULL_COVER_DAMAGE_MULTIPLIER: f32 = 0.1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_above_center_mass() {
        assert!(HEAD_HEIGHT_OFFSET > CENTER_MASS_OFFSET);
        // The top of the hit sphere must be able to reach head height
        assert!(CENTER_MASS_OFFSET + HIT_RADIUS >= HEAD_HEIGHT_OFFSET);
    }

    #[test]
    fn test_cover_multiplier_ordering() {
        assert!(EXPOSED_DAMAGE_MULTIPLIER > PARTIAL_COVER_DAMAGE_MULTIPLIER);
        assert!(PARTIAL_COVER_DAMAGE_MULTIPLIER > FULL_COVER_DAMAGE_MULTIPLIER);
    }
}
