pub mod actor;
pub mod cell;
pub mod config;
pub mod error;
pub mod grid;
pub mod heuristic;
pub mod link;
pub mod navigator;
pub mod obstacles;
pub mod pathfinding;
pub mod tracker;

pub use actor::{Actor, WorldPoint};
pub use cell::{Cell, Direction};
pub use config::Config;
pub use error::{ConfigError, GridError};
pub use grid::GridGraph;
pub use heuristic::{Heuristic, Manhattan};
pub use link::AdjacencyLink;
pub use navigator::Navigator;
pub use pathfinding::{IndexedGraph, Path, PathFinder};
pub use tracker::{TrackerSettings, TrackerState, WaypointTracker};
