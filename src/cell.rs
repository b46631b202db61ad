/// A single grid position
///
/// The identity is fixed when the owning graph is built: `index` is the dense
/// slot `y * width + x` and is used directly as an array index during search.
/// Walkability lives on the graph, not here, so a `Cell` can be copied into
/// paths without aliasing mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    x: i32,
    y: i32,
    index: usize,
}

impl Cell {
    pub(crate) fn new(x: i32, y: i32, index: usize) -> Self {
        Cell { x, y, index }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn coords(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

/// Orthogonal step directions, in the order links are built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Grid offset for one step. Rows grow downwards (screen space).
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}
