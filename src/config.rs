use crate::error::ConfigError;
use crate::tracker::TrackerSettings;
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub route: RouteConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub obstacles: ObstaclesConfig,
    #[serde(default)]
    pub visual: VisualConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GridConfig {
    #[serde(default = "default_cols")]
    pub cols: i32,
    #[serde(default = "default_rows")]
    pub rows: i32,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
}

/// Start and goal of the static route
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RouteConfig {
    #[serde(default = "default_route_start_x")]
    pub start_x: i32,
    #[serde(default = "default_route_start_y")]
    pub start_y: i32,
    #[serde(default = "default_route_goal_x")]
    pub goal_x: i32,
    #[serde(default = "default_route_goal_y")]
    pub goal_y: i32,
}

/// Moving agent and the initial cell of the target it chases
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AgentConfig {
    #[serde(default = "default_agent_x")]
    pub start_x: i32,
    #[serde(default = "default_agent_y")]
    pub start_y: i32,
    #[serde(default = "default_target_x")]
    pub target_x: i32,
    #[serde(default = "default_target_y")]
    pub target_y: i32,
    #[serde(default = "default_agent_speed")]
    pub speed: f32,
    #[serde(default = "default_agent_radius")]
    pub radius: f32,
    #[serde(default = "default_waypoint_tolerance")]
    pub waypoint_tolerance: f32,
    #[serde(default = "default_replan_interval_ms")]
    pub replan_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ObstaclesConfig {
    #[serde(default = "default_obstacles_enabled")]
    pub enabled: bool,
    #[serde(default = "default_random_count")]
    pub random_count: usize,
    /// Fixed seed for the random scatter; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
}

// Default values
fn default_cols() -> i32 { 20 }
fn default_rows() -> i32 { 15 }
fn default_cell_size() -> f32 { 32.0 }
fn default_route_start_x() -> i32 { 1 }
fn default_route_start_y() -> i32 { 1 }
fn default_route_goal_x() -> i32 { 18 }
fn default_route_goal_y() -> i32 { 13 }
fn default_agent_x() -> i32 { 1 }
fn default_agent_y() -> i32 { 1 }
fn default_target_x() -> i32 { 10 }
fn default_target_y() -> i32 { 10 }
fn default_agent_speed() -> f32 { 120.0 }
fn default_agent_radius() -> f32 { 10.0 }
fn default_waypoint_tolerance() -> f32 { 2.0 }
fn default_replan_interval_ms() -> u64 { 500 }
fn default_obstacles_enabled() -> bool { true }
fn default_random_count() -> usize { 15 }
fn default_window_title() -> String { "GridChase - A* Pathfinding".to_string() }
fn default_bg_r() -> u8 { 25 }
fn default_bg_g() -> u8 { 25 }
fn default_bg_b() -> u8 { 25 }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: default_cols(),
            rows: default_rows(),
            cell_size: default_cell_size(),
        }
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            start_x: default_route_start_x(),
            start_y: default_route_start_y(),
            goal_x: default_route_goal_x(),
            goal_y: default_route_goal_y(),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            start_x: default_agent_x(),
            start_y: default_agent_y(),
            target_x: default_target_x(),
            target_y: default_target_y(),
            speed: default_agent_speed(),
            radius: default_agent_radius(),
            waypoint_tolerance: default_waypoint_tolerance(),
            replan_interval_ms: default_replan_interval_ms(),
        }
    }
}

impl Default for ObstaclesConfig {
    fn default() -> Self {
        Self {
            enabled: default_obstacles_enabled(),
            random_count: default_random_count(),
            seed: None,
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            route: RouteConfig::default(),
            agent: AgentConfig::default(),
            obstacles: ObstaclesConfig::default(),
            visual: VisualConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from `config.toml`, or use defaults if it is
    /// missing or invalid
    pub fn load() -> Self {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if !path.exists() {
            info!("No {} found, using default configuration", DEFAULT_CONFIG_PATH);
            return Config::default();
        }
        match Self::load_from(path) {
            Ok(config) => {
                info!("Loaded configuration from {}", DEFAULT_CONFIG_PATH);
                config
            }
            Err(e) => {
                warn!("{}; using default configuration", e);
                Config::default()
            }
        }
    }

    /// Read, parse and validate a configuration file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.cols <= 0 || self.grid.rows <= 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid.cols, self.grid.rows
            )));
        }
        if !(self.grid.cell_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "cell_size must be positive, got {}",
                self.grid.cell_size
            )));
        }
        if !(self.agent.speed >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "agent speed must not be negative, got {}",
                self.agent.speed
            )));
        }
        if !(self.agent.waypoint_tolerance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "waypoint_tolerance must be positive, got {}",
                self.agent.waypoint_tolerance
            )));
        }
        Ok(())
    }

    pub fn tracker_settings(&self) -> TrackerSettings {
        TrackerSettings {
            cell_size: self.grid.cell_size,
            speed: self.agent.speed,
            waypoint_tolerance: self.agent.waypoint_tolerance,
            replan_interval: Duration::from_millis(self.agent.replan_interval_ms),
        }
    }
}
