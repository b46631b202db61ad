use crate::actor::WorldPoint;
use crate::config::Config;
use crate::error::GridError;
use crate::grid::GridGraph;
use crate::heuristic::Manhattan;
use crate::obstacles::place_demo_obstacles;
use crate::pathfinding::{Path, PathFinder};
use crate::tracker::WaypointTracker;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Collaborator-facing entry point
///
/// Owns the graph exclusively. Holds the static start/goal route, which is
/// recomputed after every mutation, and the moving agent that chases a
/// target. Mutations are applied immediately, so any query issued after a
/// mutation within the same frame observes it.
pub struct Navigator {
    graph: GridGraph,
    finder: PathFinder,
    start: (i32, i32),
    goal: (i32, i32),
    route: Option<Path>,
    chaser: WaypointTracker,
    obstacles_enabled: bool,
    random_obstacles: usize,
    rng: StdRng,
}

impl Navigator {
    /// Build the grid, place the demo obstacles and plan the initial route
    pub fn new(config: &Config) -> Result<Self, GridError> {
        let graph = GridGraph::new(config.grid.cols, config.grid.rows)?;
        let settings = config.tracker_settings();
        let chaser = WaypointTracker::new(
            settings,
            WorldPoint::cell_center(config.agent.start_x, config.agent.start_y, settings.cell_size),
            WorldPoint::cell_center(config.agent.target_x, config.agent.target_y, settings.cell_size),
        );
        let rng = match config.obstacles.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut navigator = Navigator {
            graph,
            finder: PathFinder::new(),
            start: (config.route.start_x, config.route.start_y),
            goal: (config.route.goal_x, config.route.goal_y),
            route: None,
            chaser,
            obstacles_enabled: config.obstacles.enabled,
            random_obstacles: config.obstacles.random_count,
            rng,
        };
        navigator.place_obstacles();
        navigator.recompute_route();
        Ok(navigator)
    }

    /// Read-only view of walkability and adjacency for rendering
    pub fn graph(&self) -> &GridGraph {
        &self.graph
    }

    /// Set walkability of a cell; out of bounds is a no-op
    pub fn toggle_walkable(&mut self, x: i32, y: i32, walkable: bool) {
        let before = self.graph.revision();
        self.graph.set_walkable(x, y, walkable);
        if self.graph.revision() != before {
            self.recompute_route();
        }
    }

    /// One-off query between two cells, as coordinate pairs
    ///
    /// Returns `None` when either endpoint is out of bounds or no path exists.
    pub fn query_path(&self, start_x: i32, start_y: i32, goal_x: i32, goal_y: i32) -> Option<Vec<(i32, i32)>> {
        let start = self.graph.cell(start_x, start_y)?;
        let goal = self.graph.cell(goal_x, goal_y)?;
        self.finder
            .search(&self.graph, start, goal, &Manhattan)
            .map(|path| path.coords())
    }

    pub fn start(&self) -> (i32, i32) {
        self.start
    }

    pub fn goal(&self) -> (i32, i32) {
        self.goal
    }

    /// Move the route start; ignored when out of bounds
    pub fn set_start(&mut self, x: i32, y: i32) {
        if self.graph.in_bounds(x, y) {
            self.start = (x, y);
            self.recompute_route();
        }
    }

    /// Move the route goal; ignored when out of bounds
    pub fn set_goal(&mut self, x: i32, y: i32) {
        if self.graph.in_bounds(x, y) {
            self.goal = (x, y);
            self.recompute_route();
        }
    }

    /// Current start/goal route, `None` when unreachable
    pub fn route(&self) -> Option<&Path> {
        self.route.as_ref()
    }

    pub fn chaser(&self) -> &WaypointTracker {
        &self.chaser
    }

    /// Move the chased target to a world-space point
    pub fn set_target(&mut self, target: WorldPoint) {
        self.chaser.set_target(target);
    }

    /// Advance the moving agent by `delta_time` seconds
    pub fn advance(&mut self, delta_time: f32) -> WorldPoint {
        self.chaser.advance(&self.graph, delta_time)
    }

    /// Replace the graph with a fresh one of the same size and re-place obstacles
    pub fn reset(&mut self) -> Result<(), GridError> {
        let graph = GridGraph::new(self.graph.width(), self.graph.height())?;
        self.install(graph);
        self.place_obstacles();
        self.recompute_route();
        info!("Grid reset");
        Ok(())
    }

    /// Replace the graph wholesale, e.g. with a pasted layout
    ///
    /// Start and goal are clamped into the new bounds.
    pub fn replace_graph(&mut self, graph: GridGraph) {
        self.install(graph);
        self.recompute_route();
        info!(
            "Installed {}x{} grid",
            self.graph.width(),
            self.graph.height()
        );
    }

    fn install(&mut self, graph: GridGraph) {
        let clamp = |(x, y): (i32, i32)| (x.clamp(0, graph.width() - 1), y.clamp(0, graph.height() - 1));
        self.start = clamp(self.start);
        self.goal = clamp(self.goal);
        self.graph = graph;
        self.chaser.request_replan();
    }

    fn place_obstacles(&mut self) {
        if !self.obstacles_enabled {
            return;
        }
        let cell_size = self.chaser.settings().cell_size;
        let protected = [
            self.start,
            self.goal,
            self.chaser.position().to_cell_clamped(&self.graph, cell_size),
            self.chaser.target().to_cell_clamped(&self.graph, cell_size),
        ];
        place_demo_obstacles(&mut self.graph, &mut self.rng, &protected, self.random_obstacles);
    }

    fn recompute_route(&mut self) {
        let (sx, sy) = self.start;
        let (gx, gy) = self.goal;
        self.route = match (self.graph.cell(sx, sy), self.graph.cell(gx, gy)) {
            (Some(start), Some(goal)) => self.finder.search(&self.graph, start, goal, &Manhattan),
            _ => None,
        };
        match &self.route {
            Some(path) => debug!("Route found with {} cells", path.len()),
            None => debug!("No route from ({},{}) to ({},{})", sx, sy, gx, gy),
        }
    }
}
