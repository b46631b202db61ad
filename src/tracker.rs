use crate::actor::{Actor, WorldPoint};
use crate::grid::GridGraph;
use crate::heuristic::Manhattan;
use crate::pathfinding::{Path, PathFinder};
use log::debug;
use std::time::Duration;

/// Tuning for the moving-agent scenario
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerSettings {
    /// Side length of a square cell in world units
    pub cell_size: f32,
    /// World units per second
    pub speed: f32,
    /// Distance at which a waypoint counts as reached
    pub waypoint_tolerance: f32,
    /// Time between periodic re-queries
    pub replan_interval: Duration,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        TrackerSettings {
            cell_size: 32.0,
            speed: 120.0,
            waypoint_tolerance: 2.0,
            replan_interval: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    /// No path to follow
    Idle,
    /// Advancing along the waypoints
    Following,
    /// Past the last waypoint, holding until the next replan
    Arrived,
}

/// Moves an agent along cell-center waypoints towards a moving target
///
/// Replans when the interval elapses, when the graph revision changes, or
/// when explicitly requested. A replan always replaces the waypoints
/// wholesale and restarts at index 0.
#[derive(Debug, Clone)]
pub struct WaypointTracker {
    settings: TrackerSettings,
    finder: PathFinder,
    actor: Actor,
    target: WorldPoint,
    path: Option<Path>,
    waypoints: Vec<WorldPoint>,
    waypoint_index: usize,
    since_replan: f32,
    seen_revision: Option<u64>,
    replan_requested: bool,
}

impl WaypointTracker {
    /// The first `advance` always plans.
    pub fn new(settings: TrackerSettings, position: WorldPoint, target: WorldPoint) -> Self {
        WaypointTracker {
            settings,
            finder: PathFinder::new(),
            actor: Actor::new(position, settings.speed),
            target,
            path: None,
            waypoints: Vec::new(),
            waypoint_index: 0,
            since_replan: 0.0,
            seen_revision: None,
            replan_requested: true,
        }
    }

    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    pub fn position(&self) -> WorldPoint {
        self.actor.position
    }

    pub fn target(&self) -> WorldPoint {
        self.target
    }

    /// Move the target; picked up by the next replan
    pub fn set_target(&mut self, target: WorldPoint) {
        self.target = target;
    }

    /// Force a replan on the next `advance`
    pub fn request_replan(&mut self) {
        self.replan_requested = true;
    }

    /// Path of the last successful search, if the last search succeeded
    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    pub fn waypoints(&self) -> &[WorldPoint] {
        &self.waypoints
    }

    pub fn waypoint_index(&self) -> usize {
        self.waypoint_index
    }

    pub fn state(&self) -> TrackerState {
        if self.waypoints.is_empty() {
            TrackerState::Idle
        } else if self.waypoint_index < self.waypoints.len() {
            TrackerState::Following
        } else {
            TrackerState::Arrived
        }
    }

    fn needs_replan(&self, graph: &GridGraph) -> bool {
        self.replan_requested
            || self.seen_revision != Some(graph.revision())
            || self.since_replan > self.settings.replan_interval.as_secs_f32()
    }

    /// Re-run the search from the agent's cell to the target's cell
    ///
    /// Returns true if a path was found. On failure the agent keeps its
    /// position and the waypoints are cleared.
    pub fn replan(&mut self, graph: &GridGraph) -> bool {
        let cell_size = self.settings.cell_size;
        let (ax, ay) = self.actor.position.to_cell_clamped(graph, cell_size);
        let (tx, ty) = self.target.to_cell_clamped(graph, cell_size);

        self.path = match (graph.cell(ax, ay), graph.cell(tx, ty)) {
            (Some(start), Some(goal)) => self.finder.search(graph, start, goal, &Manhattan),
            _ => None,
        };

        self.waypoints.clear();
        if let Some(path) = &self.path {
            self.waypoints.extend(
                path.cells()
                    .iter()
                    .map(|cell| WorldPoint::cell_center(cell.x(), cell.y(), cell_size)),
            );
            debug!(
                "replan ({},{}) -> ({},{}): {} waypoints",
                ax,
                ay,
                tx,
                ty,
                self.waypoints.len()
            );
        } else {
            debug!("replan ({},{}) -> ({},{}): no path, holding position", ax, ay, tx, ty);
        }

        self.waypoint_index = 0;
        self.since_replan = 0.0;
        self.seen_revision = Some(graph.revision());
        self.replan_requested = false;
        self.path.is_some()
    }

    /// Advance the agent by `delta_time` seconds and return its position
    ///
    /// Each tick either moves towards the current waypoint or, when within
    /// tolerance of it, advances the waypoint index.
    pub fn advance(&mut self, graph: &GridGraph, delta_time: f32) -> WorldPoint {
        let delta_time = delta_time.max(0.0);
        self.since_replan += delta_time;

        if self.needs_replan(graph) {
            self.replan(graph);
        }

        if let Some(&waypoint) = self.waypoints.get(self.waypoint_index) {
            if self.actor.position.distance(&waypoint) < self.settings.waypoint_tolerance {
                self.waypoint_index += 1;
            } else {
                self.actor.step_towards(waypoint, delta_time);
            }
        }

        self.actor.position
    }
}
