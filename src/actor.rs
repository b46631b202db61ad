use crate::grid::GridGraph;

/// Continuous position in world space (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
}

impl WorldPoint {
    pub fn new(x: f32, y: f32) -> Self {
        WorldPoint { x, y }
    }

    pub fn distance(&self, other: &WorldPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Center of grid cell `(x, y)` for square cells of `cell_size`
    pub fn cell_center(x: i32, y: i32, cell_size: f32) -> Self {
        WorldPoint {
            x: x as f32 * cell_size + cell_size / 2.0,
            y: y as f32 * cell_size + cell_size / 2.0,
        }
    }

    /// Grid cell containing this point, clamped to the grid bounds
    pub fn to_cell_clamped(&self, grid: &GridGraph, cell_size: f32) -> (i32, i32) {
        let cell_x = (self.x / cell_size).floor() as i32;
        let cell_y = (self.y / cell_size).floor() as i32;
        (
            cell_x.clamp(0, grid.width() - 1),
            cell_y.clamp(0, grid.height() - 1),
        )
    }
}

/// Dynamic element with floating-point positioning
#[derive(Clone, Debug)]
pub struct Actor {
    /// Center of the actor
    pub position: WorldPoint,

    /// World units travelled per second
    pub speed: f32,
}

impl Actor {
    pub fn new(position: WorldPoint, speed: f32) -> Self {
        Actor { position, speed }
    }

    /// Move towards `target` for `delta_time` seconds
    ///
    /// Snaps onto `target` instead of overshooting it.
    /// Returns true if the actor is now at `target`.
    pub fn step_towards(&mut self, target: WorldPoint, delta_time: f32) -> bool {
        let dx = target.x - self.position.x;
        let dy = target.y - self.position.y;
        let distance = (dx * dx + dy * dy).sqrt();

        let movement_this_frame = self.speed * delta_time;
        if distance <= movement_this_frame {
            self.position = target;
            return true;
        }

        // Normalize direction and move
        self.position.x += dx / distance * movement_this_frame;
        self.position.y += dy / distance * movement_this_frame;
        false
    }
}
