//! Tactical path variants: cover-seeking, flanking, nearest-cover scan
//!
//! Danger zones are taken as an immutable per-call parameter and expanded
//! into a scratch field for the cost function, so the engine stays
//! reentrant - there is no mark-then-clear mutation of shared state.

use ahash::AHashMap;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::nav::grid::GridNode;
use crate::nav::search::Pathfinder;

/// Side to approach a target from when flanking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlankDirection {
    Left,
    Right,
}

/// A circular area the search should route around
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DangerZone {
    pub center: Vec3,
    pub radius: f32,
}

impl DangerZone {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Per-call danger levels by grid cell, 1.0 at a zone center falling
/// linearly to 0 at its edge
#[derive(Debug, Default)]
pub(crate) struct DangerField {
    levels: AHashMap<GridNode, f32>,
}

impl DangerField {
    pub(crate) fn build(zones: &[DangerZone]) -> Self {
        let mut levels: AHashMap<GridNode, f32> = AHashMap::new();
        for zone in zones {
            let center = GridNode::from_world(zone.center);
            let radius = zone.radius.max(0.0).ceil() as i32;
            for dx in -radius..=radius {
                for dz in -radius..=radius {
                    let dist = ((dx * dx + dz * dz) as f32).sqrt();
                    if dist > zone.radius {
                        continue;
                    }
                    let level = 1.0 - dist / zone.radius.max(f32::EPSILON);
                    let cell = center.offset(dx, 0, dz);
                    let entry = levels.entry(cell).or_insert(0.0);
                    *entry = entry.max(level);
                }
            }
        }
        Self { levels }
    }

    pub(crate) fn level(&self, node: GridNode) -> f32 {
        self.levels.get(&node).copied().unwrap_or(0.0)
    }
}

/// Lateral offset in grid cells for flanking approaches
const FLANK_OFFSET_CELLS: i32 = 10;

impl Pathfinder {
    /// Path from start to goal that routes around the given danger zones
    /// and prefers covered cells
    pub fn find_cover_path(
        &self,
        start: Vec3,
        goal: Vec3,
        danger_zones: &[DangerZone],
    ) -> Option<Vec<Vec3>> {
        let Some(obstacles) = self.obstacle_map() else {
            return Some(vec![start, goal]);
        };

        let field = DangerField::build(danger_zones);
        let path = self.search(
            obstacles,
            GridNode::from_world(start),
            GridNode::from_world(goal),
            true,
            Some(&field),
        )?;
        Some(path.into_iter().map(GridNode::to_world).collect())
    }

    /// Path that approaches a target from the side rather than head-on
    pub fn find_flanking_path(
        &self,
        start: Vec3,
        target: Vec3,
        direction: FlankDirection,
    ) -> Option<Vec<Vec3>> {
        let target_node = GridNode::from_world(target);
        let offset = match direction {
            FlankDirection::Left => -FLANK_OFFSET_CELLS,
            FlankDirection::Right => FLANK_OFFSET_CELLS,
        };
        let goal = target_node.offset(offset, 0, 0).to_world();
        self.find_path(start, goal, true)
    }

    /// Best-scoring unobstructed cover cell within `max_distance`
    ///
    /// Bounded horizontal scan around the position. Returns `None` when no
    /// cell in radius has any cover value - including when no mesh is
    /// loaded, since there is no cover data to consult.
    pub fn find_nearest_cover(&self, position: Vec3, max_distance: f32) -> Option<Vec3> {
        let obstacles = self.obstacle_map()?;
        let origin = GridNode::from_world(position);
        let radius = max_distance.max(0.0) as i32;

        let mut best: Option<GridNode> = None;
        let mut best_value = 0.0;

        for dx in -radius..=radius {
            for dz in -radius..=radius {
                let node = origin.offset(dx, 0, dz);
                if obstacles.is_blocked(node) {
                    continue;
                }
                let value = obstacles.cover_value(node);
                if value > best_value {
                    best_value = value;
                    best = Some(node);
                }
            }
        }

        best.map(GridNode::to_world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::mesh::{Bounds, CoverPoint, CoverQuality, NavigationMesh};

    fn open_mesh() -> NavigationMesh {
        NavigationMesh::new(Bounds::new(
            Vec3::new(-60.0, 0.0, -60.0),
            Vec3::new(60.0, 5.0, 60.0),
        ))
    }

    #[test]
    fn test_danger_field_levels() {
        let field = DangerField::build(&[DangerZone::new(Vec3::ZERO, 10.0)]);

        assert_eq!(field.level(GridNode::new(0, 0, 0)), 1.0);
        let mid = field.level(GridNode::new(5, 0, 0));
        assert!(mid > 0.0 && mid < 1.0);
        assert_eq!(field.level(GridNode::new(20, 0, 0)), 0.0);
    }

    #[test]
    fn test_cover_path_avoids_danger_zone() {
        let mut pathfinder = Pathfinder::new();
        pathfinder.load_navigation_mesh(open_mesh());

        let start = Vec3::new(-20.0, 0.0, 0.0);
        let goal = Vec3::new(20.0, 0.0, 0.0);
        let zones = [DangerZone::new(Vec3::ZERO, 8.0)];

        let path = pathfinder.find_cover_path(start, goal, &zones).unwrap();
        assert!(path.last().unwrap().distance(goal) <= 1.0);

        // Inspect the unsmoothed route: the direct line passes straight
        // through the zone center, the danger-aware one must not.
        let field = DangerField::build(&zones);
        let raw = pathfinder
            .search_raw(
                pathfinder.obstacle_map().unwrap(),
                GridNode::from_world(start),
                GridNode::from_world(goal),
                true,
                Some(&field),
            )
            .unwrap();
        let min_center_distance = raw
            .iter()
            .map(|n| n.to_world().distance(Vec3::ZERO))
            .fold(f32::INFINITY, f32::min);
        assert!(min_center_distance > 2.0);
    }

    #[test]
    fn test_cover_path_without_mesh_is_direct() {
        let pathfinder = Pathfinder::new();
        let path = pathfinder
            .find_cover_path(Vec3::ZERO, Vec3::new(5.0, 0.0, 5.0), &[])
            .unwrap();
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_flanking_path_offsets_goal() {
        let mut pathfinder = Pathfinder::new();
        pathfinder.load_navigation_mesh(open_mesh());

        let target = Vec3::new(10.0, 0.0, 10.0);
        let left = pathfinder
            .find_flanking_path(Vec3::ZERO, target, FlankDirection::Left)
            .unwrap();
        let right = pathfinder
            .find_flanking_path(Vec3::ZERO, target, FlankDirection::Right)
            .unwrap();

        assert!(left.last().unwrap().x < target.x);
        assert!(right.last().unwrap().x > target.x);
    }

    #[test]
    fn test_nearest_cover_found_in_radius() {
        let mut mesh = open_mesh();
        mesh.cover_points.push(CoverPoint {
            position: Vec3::new(6.0, 0.0, 0.0),
            direction: Vec3::X,
            quality: CoverQuality::Full,
        });
        let mut pathfinder = Pathfinder::new();
        pathfinder.load_navigation_mesh(mesh);

        let cover = pathfinder.find_nearest_cover(Vec3::ZERO, 10.0);
        assert!(cover.is_some());
        assert!(cover.unwrap().distance(Vec3::new(6.0, 0.0, 0.0)) <= 2.0);
    }

    #[test]
    fn test_nearest_cover_respects_radius() {
        let mut mesh = open_mesh();
        mesh.cover_points.push(CoverPoint {
            position: Vec3::new(30.0, 0.0, 0.0),
            direction: Vec3::X,
            quality: CoverQuality::Full,
        });
        let mut pathfinder = Pathfinder::new();
        pathfinder.load_navigation_mesh(mesh);

        assert!(pathfinder.find_nearest_cover(Vec3::ZERO, 5.0).is_none());
    }

    #[test]
    fn test_nearest_cover_without_mesh() {
        let pathfinder = Pathfinder::new();
        assert!(pathfinder.find_nearest_cover(Vec3::ZERO, 20.0).is_none());
    }
}
