use crate::cell::Cell;

/// Distance estimate used to order the A* frontier
pub trait Heuristic {
    /// Estimated cost from `from` to `goal`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Cell, goal: Cell) -> f32;
}

/// Manhattan (L1) distance, admissible and consistent for unit-cost 4-way movement
#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    #[inline]
    fn estimate(&self, from: Cell, goal: Cell) -> f32 {
        ((from.x() - goal.x()).abs() + (from.y() - goal.y()).abs()) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_uses_both_axes() {
        let a = Cell::new(1, 2, 0);
        let b = Cell::new(4, 7, 0);
        assert_eq!(Manhattan.estimate(a, b), 8.0);
        assert_eq!(Manhattan.estimate(b, a), 8.0);
        assert_eq!(Manhattan.estimate(a, a), 0.0);
    }
}
