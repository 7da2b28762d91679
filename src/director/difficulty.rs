//! Adaptive difficulty controller
//!
//! Observed player performance is folded into a scalar score, and the
//! controller moves two knobs with hysteresis: a behaviour multiplier
//! applied to enemy accuracy and aggression, and the cap on concurrently
//! active enemies. The dead bands between the raise and lower thresholds
//! keep both knobs stable when the player hovers near a boundary.

use serde::Serialize;

use crate::director::constants::{
    CASUALTY_SATURATION, DEFAULT_MAX_ACTIVE, DIFFICULTY_MAX, DIFFICULTY_MIN, DIFFICULTY_STEP,
    MULTIPLIER_LOWER_THRESHOLD, MULTIPLIER_RAISE_THRESHOLD, POPULATION_LOWER_THRESHOLD,
    POPULATION_MAX, POPULATION_MIN, POPULATION_RAISE_THRESHOLD, POPULATION_STEP,
};

/// Player performance sample over a scoring window
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PerformanceMetrics {
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub casualties_taken: u32,
    pub objectives_completed: u32,
    pub total_objectives: u32,
}

impl PerformanceMetrics {
    /// Fraction of shots that connected, 0 when none were fired
    pub fn accuracy(&self) -> f32 {
        if self.shots_fired == 0 {
            0.0
        } else {
            self.shots_hit as f32 / self.shots_fired as f32
        }
    }

    /// Composite score in [0, 1]: mean of accuracy, survival, and
    /// objective completion. With no objectives assigned, completion
    /// counts as perfect rather than penalizing the player.
    pub fn performance_score(&self) -> f32 {
        let accuracy = self.accuracy().clamp(0.0, 1.0);
        let survival =
            1.0 - (self.casualties_taken as f32 / CASUALTY_SATURATION as f32).min(1.0);
        let objectives = if self.total_objectives == 0 {
            1.0
        } else {
            (self.objectives_completed as f32 / self.total_objectives as f32).clamp(0.0, 1.0)
        };
        (accuracy + survival + objectives) / 3.0
    }
}

/// Hysteresis controller over the two difficulty knobs
#[derive(Debug, Clone, Serialize)]
pub struct DifficultyController {
    multiplier: f32,
    max_active_enemies: u32,
}

impl Default for DifficultyController {
    fn default() -> Self {
        Self::new()
    }
}

impl DifficultyController {
    pub fn new() -> Self {
        Self {
            multiplier: 1.0,
            max_active_enemies: DEFAULT_MAX_ACTIVE,
        }
    }

    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    pub fn max_active_enemies(&self) -> u32 {
        self.max_active_enemies
    }

    /// Step both knobs from one performance sample
    pub fn adjust(&mut self, metrics: &PerformanceMetrics) {
        let score = metrics.performance_score();

        if score > MULTIPLIER_RAISE_THRESHOLD {
            self.multiplier = (self.multiplier + DIFFICULTY_STEP).min(DIFFICULTY_MAX);
        } else if score < MULTIPLIER_LOWER_THRESHOLD {
            self.multiplier = (self.multiplier - DIFFICULTY_STEP).max(DIFFICULTY_MIN);
        }

        if score > POPULATION_RAISE_THRESHOLD {
            self.max_active_enemies =
                (self.max_active_enemies + POPULATION_STEP).min(POPULATION_MAX);
        } else if score < POPULATION_LOWER_THRESHOLD {
            self.max_active_enemies = self
                .max_active_enemies
                .saturating_sub(POPULATION_STEP)
                .max(POPULATION_MIN);
        }

        tracing::debug!(
            score,
            multiplier = self.multiplier,
            max_active = self.max_active_enemies,
            "difficulty adjusted"
        );
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
