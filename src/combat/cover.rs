//! Categorical cover effectiveness
//!
//! A coarse angular model deliberately decoupled from geometry raycasting:
//! the defender's facing relative to the incoming fire direction selects
//! one of three mitigation categories. A renderer-integrated build would
//! replace this with real occlusion testing.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::combat::constants::{
    EXPOSED_DAMAGE_MULTIPLIER, FULL_COVER_COSINE, FULL_COVER_DAMAGE_MULTIPLIER,
    PARTIAL_COVER_COSINE, PARTIAL_COVER_DAMAGE_MULTIPLIER,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverEffectiveness {
    Exposed,
    Partial,
    Full,
}

impl CoverEffectiveness {
    pub fn damage_multiplier(self) -> f32 {
        match self {
            CoverEffectiveness::Exposed => EXPOSED_DAMAGE_MULTIPLIER,
            CoverEffectiveness::Partial => PARTIAL_COVER_DAMAGE_MULTIPLIER,
            CoverEffectiveness::Full => FULL_COVER_DAMAGE_MULTIPLIER,
        }
    }
}

/// Effectiveness of a defender's cover against fire arriving along
/// `threat_direction` (pointing from the shooter toward the defender)
///
/// A defender squarely facing the incoming fire is treated as braced
/// behind cover; fire from behind finds them exposed.
pub fn cover_effectiveness(facing: Vec3, threat_direction: Vec3) -> CoverEffectiveness {
    let facing = facing.normalize_or_zero();
    let incoming = threat_direction.normalize_or_zero();
    if facing == Vec3::ZERO || incoming == Vec3::ZERO {
        return CoverEffectiveness::Exposed;
    }

    // Cosine of the angle between the facing and the direction back
    // toward the shooter
    let alignment = facing.dot(-incoming);
    if alignment >= FULL_COVER_COSINE {
        CoverEffectiveness::Full
    } else if alignment >= PARTIAL_COVER_COSINE {
        CoverEffectiveness::Partial
    } else {
        CoverEffectiveness::Exposed
    }
}
