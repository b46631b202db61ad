use crate::cell::{Cell, Direction};
use crate::error::GridError;
use crate::link::AdjacencyLink;
use crate::pathfinding::IndexedGraph;

/// Glyphs used by the text layout format
pub const BLOCKED_GLYPH: char = '■';
pub const FREE_GLYPH: char = '□';

/// Graph over a rectangular lattice of cells with 4-connected adjacency
///
/// Every cell owns its list of outgoing links. Links are kept consistent with
/// walkability on every mutation: a link exists iff both endpoints are
/// currently walkable. Dimensions are fixed for the lifetime of the graph; a
/// reset builds a new one.
#[derive(Debug, Clone)]
pub struct GridGraph {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    walkable: Vec<bool>,
    links: Vec<Vec<AdjacencyLink>>,
    /// Incremented whenever a cell actually changes walkability
    revision: u64,
}

impl GridGraph {
    /// Create a graph with all cells walkable and full 4-way adjacency
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        let invalid = GridError::InvalidDimensions { width, height };
        if width <= 0 || height <= 0 {
            return Err(invalid);
        }
        let count = width.checked_mul(height).ok_or(invalid)? as usize;

        let mut cells = Vec::with_capacity(count);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new(x, y, (y * width + x) as usize));
            }
        }

        let mut graph = GridGraph {
            width,
            height,
            cells,
            walkable: vec![true; count],
            links: vec![Vec::new(); count],
            revision: 0,
        };
        for index in 0..count {
            graph.relink(graph.cells[index]);
        }
        Ok(graph)
    }

    /// Create a graph with the given cells blocked
    pub fn with_blocked(width: i32, height: i32, blocked: &[(i32, i32)]) -> Result<Self, GridError> {
        let mut graph = Self::new(width, height)?;
        for &(x, y) in blocked {
            graph.set_walkable(x, y, false);
        }
        Ok(graph)
    }

    /// Parse a text layout: one line per row, `■` or `#` blocked, `□` or `.` free
    pub fn from_layout(layout: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let Some(first) = rows.first() else {
            return Err(GridError::EmptyLayout);
        };
        let expected = first.chars().count();

        let mut blocked = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != expected {
                return Err(GridError::RaggedLayout { row: y, expected, found });
            }
            for (x, glyph) in row.chars().enumerate() {
                match glyph {
                    BLOCKED_GLYPH | '#' => blocked.push((x as i32, y as i32)),
                    FREE_GLYPH | '.' => {}
                    _ => return Err(GridError::UnknownGlyph { glyph, x, y }),
                }
            }
        }

        Self::with_blocked(expected as i32, rows.len() as i32, &blocked)
    }

    /// Render the walkability state as a text layout, one line per row
    pub fn to_layout(&self) -> String {
        let mut result = String::with_capacity(self.cells.len() + self.height as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                result.push(if self.is_walkable(x, y) { FREE_GLYPH } else { BLOCKED_GLYPH });
            }
            result.push('\n');
        }
        result
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells, fixed at `width * height`
    pub fn node_count(&self) -> usize {
        self.cells.len()
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Dense index of `(x, y)`, or `None` when out of bounds
    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    /// Bounds-checked cell lookup
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.index_of(x, y).map(|index| self.cells[index])
    }

    /// Cell stored at a dense index
    pub fn cell_at(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// All cells in index order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Out-of-bounds positions are never walkable
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.index_of(x, y).is_some_and(|index| self.walkable[index])
    }

    pub fn is_cell_walkable(&self, cell: Cell) -> bool {
        self.walkable.get(cell.index()).copied().unwrap_or(false)
    }

    /// Set walkability of `(x, y)` and repair adjacency around it
    ///
    /// Out of bounds is a silent no-op. The toggled cell's outgoing links are
    /// rebuilt from scratch, and so are those of its four neighbours, which
    /// drops any neighbour link pointing at a cell that just became blocked.
    pub fn set_walkable(&mut self, x: i32, y: i32, walkable: bool) {
        let Some(cell) = self.cell(x, y) else {
            return;
        };
        if self.walkable[cell.index()] == walkable {
            return;
        }

        self.walkable[cell.index()] = walkable;
        self.revision += 1;

        self.relink(cell);
        for dir in Direction::ALL {
            if let Some(neighbor) = self.neighbor(cell, dir) {
                self.relink(neighbor);
            }
        }
    }

    /// Outgoing links of `cell`, in North/East/South/West order
    pub fn outgoing_links(&self, cell: Cell) -> &[AdjacencyLink] {
        self.links
            .get(cell.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of directed links in the graph
    pub fn link_count(&self) -> usize {
        self.links.iter().map(Vec::len).sum()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Adjacent cell in `dir`, if it lies inside the grid
    pub fn neighbor(&self, cell: Cell, dir: Direction) -> Option<Cell> {
        let (dx, dy) = dir.offset();
        self.cell(cell.x() + dx, cell.y() + dy)
    }

    fn relink(&mut self, cell: Cell) {
        let mut links = std::mem::take(&mut self.links[cell.index()]);
        links.clear();

        if self.walkable[cell.index()] {
            for dir in Direction::ALL {
                if let Some(neighbor) = self.neighbor(cell, dir) {
                    if self.walkable[neighbor.index()] {
                        links.push(AdjacencyLink::orthogonal(cell, neighbor));
                    }
                }
            }
        }

        self.links[cell.index()] = links;
    }
}

impl IndexedGraph for GridGraph {
    fn node_count(&self) -> usize {
        GridGraph::node_count(self)
    }

    fn outgoing_links(&self, cell: Cell) -> &[AdjacencyLink] {
        GridGraph::outgoing_links(self, cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(graph: &GridGraph, x: i32, y: i32) -> Vec<(i32, i32)> {
        let cell = graph.cell(x, y).unwrap();
        graph.outgoing_links(cell).iter().map(|link| link.to.coords()).collect()
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        assert_eq!(
            GridGraph::new(0, 5).unwrap_err(),
            GridError::InvalidDimensions { width: 0, height: 5 }
        );
        assert!(GridGraph::new(5, -1).is_err());
        assert!(GridGraph::new(i32::MAX, 2).is_err());
    }

    #[test]
    fn test_indices_are_row_major() {
        let graph = GridGraph::new(4, 3).unwrap();
        assert_eq!(graph.node_count(), 12);
        for (expected, cell) in graph.cells().enumerate() {
            assert_eq!(cell.index(), expected);
            assert_eq!(cell.index() as i32, cell.y() * 4 + cell.x());
        }
        assert_eq!(graph.cell(3, 2).unwrap().index(), 11);
    }

    #[test]
    fn test_out_of_bounds_lookup_is_none() {
        let graph = GridGraph::new(3, 3).unwrap();
        assert!(graph.cell(-1, 0).is_none());
        assert!(graph.cell(3, 0).is_none());
        assert!(graph.cell(0, 3).is_none());
        assert!(!graph.is_walkable(5, 5));
    }

    #[test]
    fn test_construction_links_all_neighbors() {
        let graph = GridGraph::new(3, 3).unwrap();

        assert_eq!(targets(&graph, 1, 1), vec![(1, 0), (2, 1), (1, 2), (0, 1)]);
        assert_eq!(targets(&graph, 0, 0), vec![(1, 0), (0, 1)]);
        // 12 undirected edges in a 3x3 lattice
        assert_eq!(graph.link_count(), 24);
        for cell in graph.cells() {
            for link in graph.outgoing_links(cell) {
                assert_eq!(link.from, cell);
                assert_eq!(link.cost, 1.0);
            }
        }
    }

    #[test]
    fn test_blocking_prunes_both_directions() {
        let mut graph = GridGraph::new(3, 3).unwrap();
        graph.set_walkable(1, 1, false);

        assert!(targets(&graph, 1, 1).is_empty());
        for cell in graph.cells() {
            for link in graph.outgoing_links(cell) {
                assert_ne!(link.to.coords(), (1, 1), "stale link from {:?}", cell.coords());
            }
        }
        assert_eq!(graph.link_count(), 16);
    }

    #[test]
    fn test_unblocking_restores_links() {
        let mut graph = GridGraph::new(3, 3).unwrap();
        let before: Vec<_> = graph.cells().map(|c| targets(&graph, c.x(), c.y())).collect();

        graph.set_walkable(1, 1, false);
        graph.set_walkable(1, 1, true);

        let after: Vec<_> = graph.cells().map(|c| targets(&graph, c.x(), c.y())).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_unblocking_skips_blocked_neighbors() {
        let mut graph = GridGraph::new(3, 1).unwrap();
        graph.set_walkable(0, 0, false);
        graph.set_walkable(1, 0, false);
        graph.set_walkable(1, 0, true);

        assert_eq!(targets(&graph, 1, 0), vec![(2, 0)]);
        assert!(targets(&graph, 0, 0).is_empty());
    }

    #[test]
    fn test_out_of_bounds_toggle_is_noop() {
        let mut graph = GridGraph::new(2, 2).unwrap();
        graph.set_walkable(-1, 0, false);
        graph.set_walkable(2, 2, false);
        assert_eq!(graph.revision(), 0);
        assert_eq!(graph.link_count(), 8);
    }

    #[test]
    fn test_revision_counts_effective_changes() {
        let mut graph = GridGraph::new(2, 2).unwrap();
        graph.set_walkable(0, 0, true);
        assert_eq!(graph.revision(), 0);
        graph.set_walkable(0, 0, false);
        graph.set_walkable(0, 0, false);
        assert_eq!(graph.revision(), 1);
        graph.set_walkable(0, 0, true);
        assert_eq!(graph.revision(), 2);
    }

    #[test]
    fn test_layout_round_trip() {
        let layout = "□■□\n□■□\n□□□\n";
        let graph = GridGraph::from_layout(layout).unwrap();
        assert_eq!((graph.width(), graph.height()), (3, 3));
        assert!(!graph.is_walkable(1, 0));
        assert!(!graph.is_walkable(1, 1));
        assert!(graph.is_walkable(1, 2));
        assert_eq!(graph.to_layout(), layout);
    }

    #[test]
    fn test_layout_accepts_ascii_glyphs() {
        let graph = GridGraph::from_layout("\n  .#.\n  ...\n").unwrap();
        assert_eq!((graph.width(), graph.height()), (3, 2));
        assert!(!graph.is_walkable(1, 0));
    }

    #[test]
    fn test_layout_errors() {
        assert_eq!(GridGraph::from_layout("   \n").unwrap_err(), GridError::EmptyLayout);
        assert_eq!(
            GridGraph::from_layout("...\n..\n").unwrap_err(),
            GridError::RaggedLayout { row: 1, expected: 3, found: 2 }
        );
        assert_eq!(
            GridGraph::from_layout("..x\n").unwrap_err(),
            GridError::UnknownGlyph { glyph: 'x', x: 2, y: 0 }
        );
    }
}
