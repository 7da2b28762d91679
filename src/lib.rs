//! Killhouse - adaptive OpFor simulation core for tactical training scenarios
//!
//! Three components composed around a shared entity model:
//! - `nav`: cost-aware A* pathfinding over a voxelized navigation volume
//! - `combat`: single-shot fire resolution with cover mitigation
//! - `director`: population control, adaptive difficulty, per-unit tactics
//!
//! The whole core runs from one sequential tick loop and never blocks on
//! I/O. Resource exhaustion (no path, no ammo, no cover) is ordinary
//! control flow, not an error.

pub mod combat;
pub mod core;
pub mod director;
pub mod nav;
pub mod scenario;
