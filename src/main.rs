use arboard::Clipboard;
use gridchase::{Config, GridGraph, Navigator, WorldPoint};
use log::{error, info, warn};
use macroquad::prelude::*;
use std::sync::OnceLock;

const PANEL_HEIGHT: f32 = 90.0;

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Logger first, so configuration fallbacks get reported
fn config() -> &'static Config {
    CONFIG.get_or_init(|| {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .init();
        Config::load()
    })
}

/// What a click on the grid does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    PlaceObstacle,
    ClearObstacle,
    SetStart,
    SetGoal,
}

impl InputMode {
    fn label(self) -> &'static str {
        match self {
            InputMode::PlaceObstacle => "place obstacle",
            InputMode::ClearObstacle => "clear obstacle",
            InputMode::SetStart => "set start",
            InputMode::SetGoal => "set goal",
        }
    }
}

/// Which scenario is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scene {
    /// Static start/goal route
    Route,
    /// Agent chasing the cursor
    Chase,
}

struct DemoState {
    navigator: Navigator,
    mode: InputMode,
    scene: Scene,
    cell_size: f32,
    agent_radius: f32,
    background: Color,
}

impl DemoState {
    fn new(config: &Config, navigator: Navigator) -> Self {
        DemoState {
            navigator,
            mode: InputMode::PlaceObstacle,
            scene: Scene::Chase,
            cell_size: config.grid.cell_size,
            agent_radius: config.agent.radius,
            background: Color::from_rgba(
                config.visual.background_r,
                config.visual.background_g,
                config.visual.background_b,
                255,
            ),
        }
    }

    fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
        info!("{} mode", mode.label());
    }

    fn handle_keys(&mut self) {
        if is_key_pressed(KeyCode::O) {
            self.set_mode(InputMode::PlaceObstacle);
        }
        if is_key_pressed(KeyCode::C) {
            self.set_mode(InputMode::ClearObstacle);
        }
        if is_key_pressed(KeyCode::S) {
            self.set_mode(InputMode::SetStart);
        }
        if is_key_pressed(KeyCode::G) {
            self.set_mode(InputMode::SetGoal);
        }
        if is_key_pressed(KeyCode::Tab) {
            self.scene = match self.scene {
                Scene::Route => Scene::Chase,
                Scene::Chase => Scene::Route,
            };
        }
        if is_key_pressed(KeyCode::R) {
            if let Err(e) = self.navigator.reset() {
                error!("Reset failed: {}", e);
            }
        }
        if is_key_pressed(KeyCode::K) {
            self.copy_layout();
        }
        if is_key_pressed(KeyCode::V) {
            self.paste_layout();
        }
    }

    fn handle_mouse(&mut self) {
        let (mouse_x, mouse_y) = mouse_position();
        let grid_x = (mouse_x / self.cell_size).floor() as i32;
        let grid_y = (mouse_y / self.cell_size).floor() as i32;

        if self.scene == Scene::Chase {
            self.navigator.set_target(WorldPoint::new(mouse_x, mouse_y));
        }

        match self.mode {
            InputMode::PlaceObstacle if is_mouse_button_down(MouseButton::Left) => {
                self.navigator.toggle_walkable(grid_x, grid_y, false);
            }
            InputMode::ClearObstacle if is_mouse_button_down(MouseButton::Left) => {
                self.navigator.toggle_walkable(grid_x, grid_y, true);
            }
            InputMode::SetStart if is_mouse_button_pressed(MouseButton::Left) => {
                self.navigator.set_start(grid_x, grid_y);
                self.mode = InputMode::PlaceObstacle;
            }
            InputMode::SetGoal if is_mouse_button_pressed(MouseButton::Left) => {
                self.navigator.set_goal(grid_x, grid_y);
                self.mode = InputMode::PlaceObstacle;
            }
            _ => {}
        }
    }

    fn copy_layout(&self) {
        let layout = self.navigator.graph().to_layout();
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(layout) {
                    warn!("Failed to copy to clipboard: {}", e);
                } else {
                    info!("Grid layout copied to clipboard");
                    // Keep clipboard alive for a moment so clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => warn!("Failed to access clipboard: {}", e),
        }
    }

    fn paste_layout(&mut self) {
        let text = match Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to read clipboard: {}", e);
                return;
            }
        };
        match GridGraph::from_layout(&text) {
            Ok(graph) => self.navigator.replace_graph(graph),
            Err(e) => warn!("Clipboard does not hold a grid layout: {}", e),
        }
    }

    fn draw(&self) {
        clear_background(self.background);

        let graph = self.navigator.graph();
        let size = self.cell_size;

        for cell in graph.cells() {
            let color = if graph.is_cell_walkable(cell) {
                Color::from_rgba(50, 50, 50, 255)
            } else {
                Color::from_rgba(200, 50, 50, 255)
            };
            draw_rectangle(
                cell.x() as f32 * size + 1.0,
                cell.y() as f32 * size + 1.0,
                size - 2.0,
                size - 2.0,
                color,
            );
        }

        match self.scene {
            Scene::Route => self.draw_route(),
            Scene::Chase => self.draw_chase(),
        }

        let mode_line = format!(
            "Mode: {} | Scene: {:?} | Revision: {}",
            self.mode.label(),
            self.scene,
            graph.revision()
        );
        let top = graph.height() as f32 * size;
        draw_text(&mode_line, 10.0, top + 24.0, 20.0, WHITE);
        draw_text(
            "O: place  C: clear  S: start  G: goal  R: reset  Tab: scene",
            10.0,
            top + 48.0,
            20.0,
            LIGHTGRAY,
        );
        draw_text("K: copy layout  V: paste layout  Esc: quit", 10.0, top + 72.0, 20.0, LIGHTGRAY);
    }

    fn draw_route(&self) {
        let size = self.cell_size;
        if let Some(path) = self.navigator.route() {
            for cell in path.cells() {
                draw_rectangle(
                    cell.x() as f32 * size + 8.0,
                    cell.y() as f32 * size + 8.0,
                    size - 16.0,
                    size - 16.0,
                    Color::from_rgba(50, 180, 50, 255),
                );
            }
        }

        let (sx, sy) = self.navigator.start();
        let (gx, gy) = self.navigator.goal();
        let start = WorldPoint::cell_center(sx, sy, size);
        let goal = WorldPoint::cell_center(gx, gy, size);
        draw_circle(start.x, start.y, size / 3.0, BLUE);
        draw_circle(goal.x, goal.y, size / 3.0, YELLOW);
    }

    fn draw_chase(&self) {
        let chaser = self.navigator.chaser();
        for pair in chaser.waypoints().windows(2) {
            draw_line(pair[0].x, pair[0].y, pair[1].x, pair[1].y, 2.0, SKYBLUE);
        }

        let agent = chaser.position();
        let target = chaser.target();
        draw_circle(agent.x, agent.y, self.agent_radius, BLUE);
        draw_circle(target.x, target.y, 8.0, GOLD);
    }
}

fn window_conf() -> Conf {
    let config = config();
    Conf {
        window_title: config.visual.window_title.clone(),
        window_width: (config.grid.cols as f32 * config.grid.cell_size) as i32,
        window_height: (config.grid.rows as f32 * config.grid.cell_size + PANEL_HEIGHT) as i32,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = config();
    let navigator = match Navigator::new(config) {
        Ok(navigator) => navigator,
        Err(e) => {
            error!("Cannot build grid: {}", e);
            return;
        }
    };
    let mut state = DemoState::new(config, navigator);

    loop {
        state.handle_keys();
        state.handle_mouse();

        // Mutations from this frame's input are already applied
        if state.scene == Scene::Chase {
            state.navigator.advance(get_frame_time());
        }

        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        state.draw();

        next_frame().await
    }
}
