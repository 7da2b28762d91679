//! Navigation mesh and the derived obstacle map
//!
//! The mesh is static terrain description loaded once per scenario: bounds,
//! obstacle volumes, and labeled cover points. The obstacle map is a grid
//! lookup structure derived from it once and cached for the scenario's
//! lifetime - queried during search, never mutated.

use ahash::{AHashMap, AHashSet};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::nav::grid::GridNode;

/// Axis-aligned bounds of the navigation volume
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, node: GridNode) -> bool {
        self.contains_point(node.to_world())
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Wall,
    Building,
    Vehicle,
    Debris,
}

/// A solid volume units cannot path through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Vec3,
    pub size: Vec3,
    pub kind: ObstacleKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverQuality {
    Full,
    Partial,
    Concealment,
}

impl CoverQuality {
    /// Cover value contributed to the obstacle map (higher = better)
    pub fn value(self) -> f32 {
        match self {
            CoverQuality::Full => 1.0,
            CoverQuality::Partial => 0.6,
            CoverQuality::Concealment => 0.3,
        }
    }
}

/// A labeled position that offers protection from a direction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverPoint {
    pub position: Vec3,
    /// Direction the cover faces (the threat direction it protects against)
    pub direction: Vec3,
    pub quality: CoverQuality,
}

/// Static terrain description supplied by the scenario loader
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationMesh {
    pub bounds: Bounds,
    pub obstacles: Vec<Obstacle>,
    pub cover_points: Vec<CoverPoint>,
}

impl NavigationMesh {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            obstacles: Vec::new(),
            cover_points: Vec::new(),
        }
    }
}

/// Grid lookup derived from a navigation mesh
///
/// Read-only after construction. Cover from a labeled point bleeds at
/// reduced value into the 8 horizontally adjacent cells so the search can
/// hug cover without standing exactly on the point.
#[derive(Debug, Clone)]
pub struct ObstacleMap {
    bounds: Bounds,
    blocked: AHashSet<GridNode>,
    cover: AHashMap<GridNode, f32>,
}

const ADJACENT_COVER_FACTOR: f32 = 0.5;

impl ObstacleMap {
    pub fn build(mesh: &NavigationMesh) -> Self {
        let mut blocked = AHashSet::new();
        for obstacle in &mesh.obstacles {
            let half = obstacle.size / 2.0;
            let min = GridNode::from_world(obstacle.position - half);
            let max = GridNode::from_world(obstacle.position + half);
            for x in min.x..=max.x {
                for y in min.y..=max.y {
                    for z in min.z..=max.z {
                        blocked.insert(GridNode::new(x, y, z));
                    }
                }
            }
        }

        let mut cover: AHashMap<GridNode, f32> = AHashMap::new();
        for point in &mesh.cover_points {
            let node = GridNode::from_world(point.position);
            let value = point.quality.value();
            for dx in -1..=1 {
                for dz in -1..=1 {
                    let cell = node.offset(dx, 0, dz);
                    let contribution = if dx == 0 && dz == 0 {
                        value
                    } else {
                        value * ADJACENT_COVER_FACTOR
                    };
                    let entry = cover.entry(cell).or_insert(0.0);
                    *entry = entry.max(contribution);
                }
            }
        }

        Self {
            bounds: mesh.bounds,
            blocked,
            cover,
        }
    }

    /// Blocked if the cell holds an obstacle or lies outside the volume
    pub fn is_blocked(&self, node: GridNode) -> bool {
        !self.bounds.contains(node) || self.blocked.contains(&node)
    }

    pub fn cover_value(&self, node: GridNode) -> f32 {
        self.cover.get(&node).copied().unwrap_or(0.0)
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_mesh() -> NavigationMesh {
        NavigationMesh::new(Bounds::new(
            Vec3::new(-50.0, 0.0, -50.0),
            Vec3::new(50.0, 10.0, 50.0),
        ))
    }

    #[test]
    fn test_obstacle_blocks_cells() {
        let mut mesh = open_mesh();
        mesh.obstacles.push(Obstacle {
            position: Vec3::new(10.0, 1.0, 10.0),
            size: Vec3::new(2.0, 2.0, 2.0),
            kind: ObstacleKind::Wall,
        });

        let map = ObstacleMap::build(&mesh);
        assert!(map.is_blocked(GridNode::new(10, 1, 10)));
        assert!(!map.is_blocked(GridNode::new(20, 1, 10)));
    }

    #[test]
    fn test_out_of_bounds_is_blocked() {
        let map = ObstacleMap::build(&open_mesh());
        assert!(map.is_blocked(GridNode::new(100, 0, 0)));
        assert!(!map.is_blocked(GridNode::new(0, 0, 0)));
    }

    #[test]
    fn test_cover_bleeds_to_adjacent_cells() {
        let mut mesh = open_mesh();
        mesh.cover_points.push(CoverPoint {
            position: Vec3::new(5.0, 0.0, 5.0),
            direction: Vec3::NEG_Z,
            quality: CoverQuality::Full,
        });

        let map = ObstacleMap::build(&mesh);
        assert_eq!(map.cover_value(GridNode::new(5, 0, 5)), 1.0);
        assert_eq!(map.cover_value(GridNode::new(6, 0, 5)), 0.5);
        assert_eq!(map.cover_value(GridNode::new(8, 0, 5)), 0.0);
    }

    #[test]
    fn test_overlapping_cover_keeps_best_value() {
        let mut mesh = open_mesh();
        for quality in [CoverQuality::Concealment, CoverQuality::Full] {
            mesh.cover_points.push(CoverPoint {
                position: Vec3::new(5.0, 0.0, 5.0),
                direction: Vec3::NEG_Z,
                quality,
            });
        }

        let map = ObstacleMap::build(&mesh);
        assert_eq!(map.cover_value(GridNode::new(5, 0, 5)), 1.0);
    }
}
