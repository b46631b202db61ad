use crate::cell::Cell;

/// Cost of a single orthogonal step
pub const ORTHOGONAL_COST: f32 = 1.0;

/// Directed edge between two neighbouring cells
///
/// A link from A to B says nothing about a link from B to A.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjacencyLink {
    pub from: Cell,
    pub to: Cell,
    pub cost: f32,
}

impl AdjacencyLink {
    /// Unit-cost orthogonal link
    pub fn orthogonal(from: Cell, to: Cell) -> Self {
        AdjacencyLink {
            from,
            to,
            cost: ORTHOGONAL_COST,
        }
    }
}
