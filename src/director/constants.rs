//! AI director constants - all tunable values in one place

// Adaptive difficulty controller. Disjoint thresholds give hysteresis:
// the multiplier and the population cap each have their own raise/lower
// bands so the controller drifts instead of oscillating.
pub const DIFFICULTY_STEP: f32 = 0.1;
pub const DIFFICULTY_MIN: f32 = 0.5;
pub const DIFFICULTY_MAX: f32 = 2.0;
pub const MULTIPLIER_RAISE_THRESHOLD: f32 = 0.8;
pub const MULTIPLIER_LOWER_THRESHOLD: f32 = 0.4;

pub const POPULATION_STEP: u32 = 2;
pub const POPULATION_MIN: u32 = 10;
pub const POPULATION_MAX: u32 = 30;
pub const POPULATION_RAISE_THRESHOLD: f32 = 0.7;
pub const POPULATION_LOWER_THRESHOLD: f32 = 0.5;
pub const DEFAULT_MAX_ACTIVE: u32 = 20;

/// Casualty count at which the survival term saturates
pub const CASUALTY_SATURATION: u32 = 3;

// Reinforcements - evaluated on a fixed cadence, not every tick
pub const REINFORCEMENT_INTERVAL_SECONDS: f32 = 5.0;
pub const REINFORCEMENT_BASE_CHANCE: f32 = 0.2;

// Morale (0-100). Rates are per simulated second.
pub const MORALE_MAX: f32 = 100.0;
pub const MORALE_RETREAT_THRESHOLD: f32 = 30.0;
pub const MORALE_LOW_HEALTH_DRAIN: f32 = 4.0;
pub const MORALE_PROXIMITY_DRAIN: f32 = 6.0;
pub const MORALE_RECOVERY_RATE: f32 = 3.0;
pub const LOW_HEALTH_FRACTION: f32 = 0.5;
pub const PLAYER_PROXIMITY_RANGE: f32 = 10.0;
pub const PLAYER_FAR_RANGE: f32 = 50.0;

// Alert state machine timers (seconds)
pub const SUSPICIOUS_CONFIRM_SECONDS: f32 = 1.5;
pub const COMBAT_CONFIRM_SECONDS: f32 = 1.0;
pub const VISIBILITY_DECAY_SECONDS: f32 = 4.0;

// Combat behavior
/// Farther than this, combat units close distance instead of holding
pub const CLOSE_DISTANCE_THRESHOLD: f32 = 30.0;
/// Above this morale, combat units suppress; at or below, they take cover
pub const AGGRESSIVE_MORALE_THRESHOLD: f32 = 50.0;
pub const COVER_SEARCH_RADIUS: f32 = 20.0;
pub const RETREAT_DISTANCE: f32 = 40.0;
pub const DEFEND_ZONE_RADIUS: f32 = 3.0;
/// Aim error radius at multiplier 1.0; shrinks as difficulty rises
pub const AIM_ERROR_RADIUS: f32 = 0.8;

// Detection
pub const BASE_DETECTION_RADIUS: f32 = 25.0;

// Movement (world units per second)
pub const PATROL_SPEED: f32 = 1.5;
pub const ADVANCE_SPEED: f32 = 3.0;
pub const COMBAT_SPEED: f32 = 4.5;
pub const WAYPOINT_EPSILON: f32 = 0.5;
pub const PATROL_RADIUS: f32 = 8.0;

// Spawning
pub const SQUAD_SCATTER_RADIUS: f32 = 3.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hysteresis_bands_are_disjoint() {
        assert!(MULTIPLIER_RAISE_THRESHOLD > MULTIPLIER_LOWER_THRESHOLD);
        assert!(POPULATION_RAISE_THRESHOLD > POPULATION_LOWER_THRESHOLD);
        // Population band sits inside the multiplier band
        assert!(POPULATION_RAISE_THRESHOLD < MULTIPLIER_RAISE_THRESHOLD);
        assert!(POPULATION_LOWER_THRESHOLD > MULTIPLIER_LOWER_THRESHOLD);
    }

    #[test]
    fn test_speed_ordering() {
        assert!(COMBAT_SPEED > ADVANCE_SPEED);
        assert!(ADVANCE_SPEED > PATROL_SPEED);
    }

    #[test]
    fn test_morale_band_sane() {
        assert!(MORALE_RETREAT_THRESHOLD > 0.0);
        assert!(MORALE_RETREAT_THRESHOLD < AGGRESSIVE_MORALE_THRESHOLD);
        assert!(AGGRESSIVE_MORALE_THRESHOLD < MORALE_MAX);
    }
}
