use crate::grid::GridGraph;
use rand::Rng;

/// Block the demo maze walls plus `random_count` scattered cells
///
/// The maze is a wall along row 7 (x in 5..15, open at x = 10) and a wall
/// down column 10 (y in 3..12, open at y = 7). Coordinates that fall outside
/// a smaller grid are skipped. Random cells never land on `protected`.
pub fn place_demo_obstacles<R: Rng>(
    graph: &mut GridGraph,
    rng: &mut R,
    protected: &[(i32, i32)],
    random_count: usize,
) {
    for x in 5..15 {
        if x != 10 {
            block_unless_protected(graph, x, 7, protected);
        }
    }
    for y in 3..12 {
        if y != 7 {
            block_unless_protected(graph, 10, y, protected);
        }
    }

    for _ in 0..random_count {
        let x = rng.random_range(0..graph.width());
        let y = rng.random_range(0..graph.height());
        block_unless_protected(graph, x, y, protected);
    }
}

fn block_unless_protected(graph: &mut GridGraph, x: i32, y: i32, protected: &[(i32, i32)]) {
    if !protected.contains(&(x, y)) {
        graph.set_walkable(x, y, false);
    }
}
