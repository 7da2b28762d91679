//! A* search over the navigation grid, with line-of-sight path smoothing
//!
//! Costs: 1.0 per axis-aligned step, sqrt(2) per horizontal diagonal,
//! +0.5 for any vertical step. With danger avoidance enabled, per-cell
//! danger adds cost (x5) and per-cell cover subtracts it (x0.3), floored
//! so cost never goes negative. The heuristic is plain Manhattan distance;
//! it slightly overweights diagonals, trading strict optimality for fewer
//! expansions on open ground.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::{AHashMap, AHashSet};
use glam::Vec3;

use crate::nav::grid::{GridNode, GRID_CELL_SIZE, NEIGHBOR_DIRECTIONS};
use crate::nav::mesh::{NavigationMesh, ObstacleMap};
use crate::nav::tactical::DangerField;

const DIAGONAL_COST: f32 = std::f32::consts::SQRT_2;
const VERTICAL_STEP_COST: f32 = 0.5;
const DANGER_COST_SCALE: f32 = 5.0;
const COVER_BONUS_SCALE: f32 = 0.3;
const MIN_MOVE_COST: f32 = 0.1;

/// Node in the A* open set
#[derive(Debug, Clone)]
struct PathNode {
    node: GridNode,
    f_cost: f32, // g_cost + heuristic
}

impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for PathNode {}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .f_cost
            .partial_cmp(&self.f_cost)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pathfinding engine
///
/// Owns no long-lived mutable state beyond the obstacle map, which is
/// built once per scenario load and read-only afterwards. All queries are
/// stateless per call and safe to issue from a sequential tick loop.
#[derive(Debug, Default)]
pub struct Pathfinder {
    mesh: Option<NavigationMesh>,
    obstacles: Option<ObstacleMap>,
}

impl Pathfinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load scenario terrain and derive the cached obstacle map
    pub fn load_navigation_mesh(&mut self, mesh: NavigationMesh) {
        self.obstacles = Some(ObstacleMap::build(&mesh));
        tracing::debug!(
            obstacles = mesh.obstacles.len(),
            cover_points = mesh.cover_points.len(),
            "navigation mesh loaded"
        );
        self.mesh = Some(mesh);
    }

    pub fn has_mesh(&self) -> bool {
        self.mesh.is_some()
    }

    pub fn obstacle_map(&self) -> Option<&ObstacleMap> {
        self.obstacles.as_ref()
    }

    /// Find a smoothed world-space path from start to goal
    ///
    /// Returns `None` only when a mesh is loaded and the goal is
    /// unreachable. With no mesh loaded the engine degrades to the direct
    /// two-point path so scenarios stay playable with partial content.
    pub fn find_path(&self, start: Vec3, goal: Vec3, avoid_danger: bool) -> Option<Vec<Vec3>> {
        let Some(obstacles) = &self.obstacles else {
            return Some(vec![start, goal]);
        };

        let start_node = GridNode::from_world(start);
        let goal_node = GridNode::from_world(goal);

        let path = self.search(obstacles, start_node, goal_node, avoid_danger, None)?;
        Some(path.into_iter().map(GridNode::to_world).collect())
    }

    /// Raw A* over grid nodes, followed by greedy smoothing
    pub(crate) fn search(
        &self,
        obstacles: &ObstacleMap,
        start: GridNode,
        goal: GridNode,
        avoid_danger: bool,
        danger: Option<&DangerField>,
    ) -> Option<Vec<GridNode>> {
        if start == goal {
            return Some(vec![start]);
        }
        if obstacles.is_blocked(goal) {
            return None;
        }

        let raw = self.search_raw(obstacles, start, goal, avoid_danger, danger)?;
        Some(self.smooth_path(obstacles, raw))
    }

    /// A* without smoothing - exposed for cost-optimality tests
    pub(crate) fn search_raw(
        &self,
        obstacles: &ObstacleMap,
        start: GridNode,
        goal: GridNode,
        avoid_danger: bool,
        danger: Option<&DangerField>,
    ) -> Option<Vec<GridNode>> {
        let mut open_set = BinaryHeap::new();
        let mut closed_set: AHashSet<GridNode> = AHashSet::new();
        let mut came_from: AHashMap<GridNode, GridNode> = AHashMap::new();
        let mut g_scores: AHashMap<GridNode, f32> = AHashMap::new();

        g_scores.insert(start, 0.0);
        open_set.push(PathNode {
            node: start,
            f_cost: start.manhattan(goal),
        });

        while let Some(current) = open_set.pop() {
            if current.node == goal {
                return Some(reconstruct_path(&came_from, current.node));
            }
            if !closed_set.insert(current.node) {
                continue;
            }

            let current_g = *g_scores.get(&current.node).unwrap_or(&f32::INFINITY);

            for (dx, dy, dz) in NEIGHBOR_DIRECTIONS {
                let neighbor = current.node.offset(dx, dy, dz);
                if closed_set.contains(&neighbor) || obstacles.is_blocked(neighbor) {
                    continue;
                }

                let move_cost =
                    step_cost(obstacles, current.node, neighbor, avoid_danger, danger);
                let tentative_g = current_g + move_cost;
                let neighbor_g = *g_scores.get(&neighbor).unwrap_or(&f32::INFINITY);

                if tentative_g < neighbor_g {
                    came_from.insert(neighbor, current.node);
                    g_scores.insert(neighbor, tentative_g);
                    open_set.push(PathNode {
                        node: neighbor,
                        f_cost: tentative_g + neighbor.manhattan(goal),
                    });
                }
            }
        }

        None // No path found
    }

    /// Raw grid cost of the best path, for optimality checks
    pub(crate) fn raw_path_cost(&self, obstacles: &ObstacleMap, path: &[GridNode]) -> f32 {
        path.windows(2)
            .map(|pair| step_cost(obstacles, pair[0], pair[1], false, None))
            .sum()
    }

    /// Greedy line-of-sight reduction of a staircase grid path
    ///
    /// From each kept waypoint, jump to the furthest waypoint with an
    /// unobstructed straight line to it and repeat.
    fn smooth_path(&self, obstacles: &ObstacleMap, path: Vec<GridNode>) -> Vec<GridNode> {
        if path.len() <= 2 {
            return path;
        }

        let mut smoothed = vec![path[0]];
        let mut current = 0;

        while current < path.len() - 1 {
            let mut furthest_visible = current + 1;
            for i in (current + 2)..path.len() {
                if grid_line_of_sight(obstacles, path[current], path[i]) {
                    furthest_visible = i;
                } else {
                    break;
                }
            }
            smoothed.push(path[furthest_visible]);
            current = furthest_visible;
        }

        smoothed
    }

    /// World-space line-of-sight test, sampled at grid resolution
    ///
    /// With no mesh loaded everything is visible.
    pub fn has_line_of_sight(&self, from: Vec3, to: Vec3) -> bool {
        let Some(obstacles) = &self.obstacles else {
            return true;
        };
        grid_line_of_sight(
            obstacles,
            GridNode::from_world(from),
            GridNode::from_world(to),
        )
    }

    /// March a ray through the grid and return the first obstructed point
    ///
    /// Used by the combat resolver to distinguish terrain strikes from
    /// clean misses. Returns `None` when the ray reaches `max_distance`
    /// unobstructed or no mesh is loaded.
    pub fn raycast_obstruction(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<Vec3> {
        let obstacles = self.obstacles.as_ref()?;
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO {
            return None;
        }

        let step = GRID_CELL_SIZE * 0.5;
        let mut traveled = step;
        while traveled <= max_distance {
            let point = origin + dir * traveled;
            if obstacles.is_blocked(GridNode::from_world(point)) {
                return Some(point);
            }
            traveled += step;
        }
        None
    }
}

/// Cost of one grid step under the tactical cost model
fn step_cost(
    obstacles: &ObstacleMap,
    from: GridNode,
    to: GridNode,
    avoid_danger: bool,
    danger: Option<&DangerField>,
) -> f32 {
    let dx = (to.x - from.x).abs();
    let dz = (to.z - from.z).abs();
    let mut cost = if dx > 0 && dz > 0 { DIAGONAL_COST } else { 1.0 };

    if to.y != from.y {
        cost += VERTICAL_STEP_COST;
    }

    if avoid_danger {
        if let Some(field) = danger {
            cost += field.level(to) * DANGER_COST_SCALE;
        }
        cost -= obstacles.cover_value(to) * COVER_BONUS_SCALE;
    }

    cost.max(MIN_MOVE_COST)
}

/// Sampled straight-line obstruction check between two grid nodes
pub(crate) fn grid_line_of_sight(obstacles: &ObstacleMap, from: GridNode, to: GridNode) -> bool {
    let steps = (to.x - from.x)
        .abs()
        .max((to.y - from.y).abs())
        .max((to.z - from.z).abs());
    if steps == 0 {
        return true;
    }

    for step in 0..=steps {
        let t = step as f32 / steps as f32;
        let sample = GridNode::new(
            from.x + ((to.x - from.x) as f32 * t).round() as i32,
            from.y + ((to.y - from.y) as f32 * t).round() as i32,
            from.z + ((to.z - from.z) as f32 * t).round() as i32,
        );
        if obstacles.is_blocked(sample) {
            return false;
        }
    }
    true
}

/// Reconstruct path from came_from map
fn reconstruct_path(came_from: &AHashMap<GridNode, GridNode>, mut current: GridNode) -> Vec<GridNode> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
