//! Pathfinding engine - grid-based A* over a voxelized navigation volume
//!
//! Converts a start/goal world position pair into a walkable, cover-aware
//! path. Move costs favor covered cells and penalize marked danger zones.
//! Absent navigation data every query degrades to a straight-line answer
//! rather than failing; truly unreachable goals return no path.

pub mod grid;
pub mod mesh;
pub mod search;
pub mod tactical;

pub use grid::{GridNode, GRID_CELL_SIZE};
pub use mesh::{
    Bounds, CoverPoint, CoverQuality, NavigationMesh, Obstacle, ObstacleKind, ObstacleMap,
};
pub use search::Pathfinder;
pub use tactical::{DangerZone, FlankDirection};
