use crate::cell::Cell;
use crate::heuristic::Heuristic;
use crate::link::AdjacencyLink;
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Graph with dense node indices that the search can expand
pub trait IndexedGraph {
    /// Number of nodes; every cell index is below this.
    fn node_count(&self) -> usize;

    /// Outgoing edges of `cell`, used verbatim as the expansion source.
    fn outgoing_links(&self, cell: Cell) -> &[AdjacencyLink];
}

/// Least-cost path from start to goal, both inclusive
///
/// Owns its cells, so it stays valid after the graph is mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    cells: Vec<Cell>,
    cost: f32,
}

impl Path {
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells, never zero
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Accumulated link cost
    pub fn cost(&self) -> f32 {
        self.cost
    }

    pub fn start(&self) -> Cell {
        self.cells[0]
    }

    pub fn goal(&self) -> Cell {
        self.cells[self.cells.len() - 1]
    }

    pub fn coords(&self) -> Vec<(i32, i32)> {
        self.cells.iter().map(Cell::coords).collect()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.cells.iter().any(|cell| cell.coords() == (x, y))
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}

/// Frontier entry ordered by `f`, then by insertion order
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    f: f32,
    seq: u64,
    cell: Cell,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .f
            .partial_cmp(&self.f)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Per-query bookkeeping, indexed by cell index
struct SearchState {
    g: Vec<f32>,
    settled: Vec<bool>,
    came_from: Vec<Option<Cell>>,
}

impl SearchState {
    fn new(node_count: usize) -> Self {
        SearchState {
            g: vec![f32::INFINITY; node_count],
            settled: vec![false; node_count],
            came_from: vec![None; node_count],
        }
    }

    fn reconstruct(&self, start: Cell, goal: Cell) -> Vec<Cell> {
        let mut cells = vec![goal];
        let mut current = goal;
        while current != start {
            match self.came_from[current.index()] {
                Some(prev) => {
                    cells.push(prev);
                    current = prev;
                }
                None => break,
            }
        }
        cells.reverse();
        cells
    }
}

/// Reusable A* search engine
///
/// Holds no state between queries; every search allocates its own
/// cost table, settled markers and back-pointers.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathFinder;

impl PathFinder {
    pub fn new() -> Self {
        PathFinder
    }

    /// Find a least-cost path from `start` to `goal`
    ///
    /// Returns `None` when the frontier empties without settling the goal,
    /// or when either endpoint does not belong to `graph`.
    pub fn search<G, H>(&self, graph: &G, start: Cell, goal: Cell, heuristic: &H) -> Option<Path>
    where
        G: IndexedGraph + ?Sized,
        H: Heuristic + ?Sized,
    {
        let node_count = graph.node_count();
        trace!(
            "[A*] search: ({},{}) -> ({},{})",
            start.x(),
            start.y(),
            goal.x(),
            goal.y()
        );

        if start.index() >= node_count || goal.index() >= node_count {
            debug!("[A*] endpoint outside graph of {} nodes", node_count);
            return None;
        }

        if start == goal {
            return Some(Path {
                cells: vec![start],
                cost: 0.0,
            });
        }

        let mut state = SearchState::new(node_count);
        let mut frontier = BinaryHeap::new();
        let mut seq = 0u64;

        state.g[start.index()] = 0.0;
        frontier.push(FrontierEntry {
            f: heuristic.estimate(start, goal),
            seq,
            cell: start,
        });

        let mut expanded = 0usize;
        while let Some(FrontierEntry { cell: current, .. }) = frontier.pop() {
            let ci = current.index();
            if state.settled[ci] {
                continue;
            }
            state.settled[ci] = true;

            if current == goal {
                let cost = state.g[ci];
                let cells = state.reconstruct(start, goal);
                debug!(
                    "[A*] found path: {} cells, cost {:.1}, {} nodes expanded",
                    cells.len(),
                    cost,
                    expanded
                );
                return Some(Path { cells, cost });
            }

            expanded += 1;
            let current_g = state.g[ci];

            for link in graph.outgoing_links(current) {
                let next = link.to;
                let ni = next.index();
                if ni >= node_count || state.settled[ni] {
                    continue;
                }

                let tentative_g = current_g + link.cost;
                if tentative_g >= state.g[ni] {
                    continue;
                }

                state.g[ni] = tentative_g;
                state.came_from[ni] = Some(current);
                seq += 1;
                frontier.push(FrontierEntry {
                    f: tentative_g + heuristic.estimate(next, goal),
                    seq,
                    cell: next,
                });
            }
        }

        debug!("[A*] no path after {} nodes expanded", expanded);
        None
    }
}
