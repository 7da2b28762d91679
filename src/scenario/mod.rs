//! Scenario definitions
//!
//! A scenario is a named training map: navigation mesh, opposing-force
//! spawn points, and a player start. Scenarios load from JSON and are
//! validated before anything touches the navigation or director state.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::{Result, SimError};
use crate::director::force::AiDirector;
use crate::nav::{NavigationMesh, Pathfinder};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub mesh: NavigationMesh,
    #[serde(default)]
    pub spawn_points: Vec<Vec3>,
    #[serde(default)]
    pub player_start: Vec3,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        tracing::info!(path = %path.as_ref().display(), "loading scenario");
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SimError::InvalidScenario("scenario name is empty".into()));
        }
        let bounds = self.mesh.bounds;
        if bounds.min.x >= bounds.max.x
            || bounds.min.y > bounds.max.y
            || bounds.min.z >= bounds.max.z
        {
            return Err(SimError::InvalidScenario(format!(
                "inverted bounds: min {:?} max {:?}",
                bounds.min, bounds.max
            )));
        }
        for (index, obstacle) in self.mesh.obstacles.iter().enumerate() {
            if obstacle.size.x <= 0.0 || obstacle.size.y <= 0.0 || obstacle.size.z <= 0.0 {
                return Err(SimError::InvalidScenario(format!(
                    "obstacle {index} has non-positive size {:?}",
                    obstacle.size
                )));
            }
        }
        for (index, point) in self.spawn_points.iter().enumerate() {
            if !bounds.contains_point(*point) {
                return Err(SimError::InvalidScenario(format!(
                    "spawn point {index} at {point:?} is outside the map bounds"
                )));
            }
        }
        Ok(())
    }

    /// Install the scenario into the navigation and director state
    pub fn apply(&self, nav: &mut Pathfinder, director: &mut AiDirector) {
        nav.load_navigation_mesh(self.mesh.clone());
        director.set_spawn_points(self.spawn_points.clone());
    }
}
