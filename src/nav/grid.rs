//! Integer grid coordinates and world-space conversion
//!
//! Grid nodes are never persisted - they are recomputed from world
//! positions through a fixed cell size.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Side length of one navigation grid cell in world units
pub const GRID_CELL_SIZE: f32 = 1.0;

/// Integer 3D coordinate on the navigation grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridNode {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridNode {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Quantize a world position onto the grid
    pub fn from_world(position: Vec3) -> Self {
        Self {
            x: (position.x / GRID_CELL_SIZE).floor() as i32,
            y: (position.y / GRID_CELL_SIZE).floor() as i32,
            z: (position.z / GRID_CELL_SIZE).floor() as i32,
        }
    }

    /// World position of this node (cell origin)
    pub fn to_world(self) -> Vec3 {
        Vec3::new(
            self.x as f32 * GRID_CELL_SIZE,
            self.y as f32 * GRID_CELL_SIZE,
            self.z as f32 * GRID_CELL_SIZE,
        )
    }

    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Manhattan distance - admissible heuristic for the grid's move costs
    pub fn manhattan(self, other: Self) -> f32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs() + (self.z - other.z).abs()) as f32
    }
}

/// Neighbor directions: 4 cardinal + 4 diagonal on the horizontal plane,
/// plus straight up/down
pub const NEIGHBOR_DIRECTIONS: [(i32, i32, i32); 10] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 0, 1),
    (0, 0, -1),
    (1, 0, 1),
    (-1, 0, 1),
    (1, 0, -1),
    (-1, 0, -1),
    (0, 1, 0),
    (0, -1, 0),
];
