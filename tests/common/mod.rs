#![allow(dead_code)]

use gridchase::{GridGraph, Manhattan, Path, PathFinder};
use serde::Deserialize;
use std::fs;
use std::path::Path as FsPath;

/// Grid plus the endpoints marked in its layout
#[derive(Debug, Clone)]
pub struct Scenario {
    pub graph: GridGraph,
    pub start: (i32, i32),
    pub goal: (i32, i32),
}

/// Parse a layout where `S` marks the start and `G` the goal
///
/// Both markers are walkable. Other glyphs follow `GridGraph::from_layout`.
pub fn parse_scenario(layout: &str) -> Result<Scenario, Box<dyn std::error::Error>> {
    let mut start = None;
    let mut goal = None;
    let mut cleaned = String::new();

    let rows = layout.lines().map(str::trim).filter(|line| !line.is_empty());
    for (y, line) in rows.enumerate() {
        for (x, ch) in line.chars().enumerate() {
            match ch {
                'S' => {
                    start = Some((x as i32, y as i32));
                    cleaned.push('.');
                }
                'G' => {
                    goal = Some((x as i32, y as i32));
                    cleaned.push('.');
                }
                _ => cleaned.push(ch),
            }
        }
        cleaned.push('\n');
    }

    let graph = GridGraph::from_layout(&cleaned)?;
    Ok(Scenario {
        graph,
        start: start.ok_or("No start position 'S' found in layout")?,
        goal: goal.ok_or("No goal position 'G' found in layout")?,
    })
}

/// Mirror a point inside a `width` x `height` grid
pub fn mirror_point(point: (i32, i32), width: i32, height: i32, horizontal: bool, vertical: bool) -> (i32, i32) {
    let (x, y) = point;
    (
        if horizontal { width - 1 - x } else { x },
        if vertical { height - 1 - y } else { y },
    )
}

/// Mirror a whole scenario
pub fn flip_scenario(scenario: &Scenario, horizontal: bool, vertical: bool) -> Scenario {
    let graph = &scenario.graph;
    let (width, height) = (graph.width(), graph.height());

    let blocked: Vec<(i32, i32)> = graph
        .cells()
        .filter(|cell| !graph.is_cell_walkable(*cell))
        .map(|cell| mirror_point(cell.coords(), width, height, horizontal, vertical))
        .collect();

    Scenario {
        graph: GridGraph::with_blocked(width, height, &blocked).unwrap(),
        start: mirror_point(scenario.start, width, height, horizontal, vertical),
        goal: mirror_point(scenario.goal, width, height, horizontal, vertical),
    }
}

/// The scenario and its three mirrored variants, with the flip flags used
pub fn variants(scenario: &Scenario) -> Vec<(&'static str, bool, bool, Scenario)> {
    vec![
        ("original", false, false, scenario.clone()),
        ("h_flip", true, false, flip_scenario(scenario, true, false)),
        ("v_flip", false, true, flip_scenario(scenario, false, true)),
        ("hv_flip", true, true, flip_scenario(scenario, true, true)),
    ]
}

pub fn find(graph: &GridGraph, start: (i32, i32), goal: (i32, i32)) -> Option<Path> {
    let start = graph.cell(start.0, start.1)?;
    let goal = graph.cell(goal.0, goal.1)?;
    PathFinder::new().search(graph, start, goal, &Manhattan)
}

/// Panics unless `path` runs from `start` to `goal` over adjacent walkable cells
pub fn assert_valid_path(graph: &GridGraph, path: &Path, start: (i32, i32), goal: (i32, i32)) {
    assert_eq!(path.start().coords(), start, "path does not begin at start");
    assert_eq!(path.goal().coords(), goal, "path does not end at goal");
    for pair in path.cells().windows(2) {
        let dx = (pair[0].x() - pair[1].x()).abs();
        let dy = (pair[0].y() - pair[1].y()).abs();
        assert_eq!(dx + dy, 1, "non-adjacent step {:?} -> {:?}", pair[0].coords(), pair[1].coords());
    }
    if path.len() > 1 {
        for cell in path.cells() {
            assert!(graph.is_cell_walkable(*cell), "path crosses blocked {:?}", cell.coords());
        }
    }
    assert_eq!(path.cost(), (path.len() - 1) as f32);
}

/// Visualize a path on a grid
pub fn visualize_path(graph: &GridGraph, path: Option<&Path>, start: (i32, i32), goal: (i32, i32)) -> String {
    let mut result = String::new();
    for y in 0..graph.height() {
        for x in 0..graph.width() {
            let symbol = if (x, y) == start {
                'S'
            } else if (x, y) == goal {
                'G'
            } else if path.is_some_and(|p| p.contains(x, y)) {
                '*'
            } else if !graph.is_walkable(x, y) {
                '#'
            } else {
                '.'
            };
            result.push(symbol);
        }
        result.push('\n');
    }
    result
}

/// Breadth-first step distance, used as an independent reference
pub fn bfs_distance(graph: &GridGraph, start: (i32, i32), goal: (i32, i32)) -> Option<usize> {
    use std::collections::VecDeque;

    let start = graph.cell(start.0, start.1)?;
    let goal = graph.cell(goal.0, goal.1)?;
    if start == goal {
        return Some(0);
    }

    let mut dist = vec![usize::MAX; graph.node_count()];
    let mut queue = VecDeque::new();
    dist[start.index()] = 0;
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        for link in graph.outgoing_links(cell) {
            if dist[link.to.index()] == usize::MAX {
                dist[link.to.index()] = dist[cell.index()] + 1;
                if link.to == goal {
                    return Some(dist[goal.index()]);
                }
                queue.push_back(link.to);
            }
        }
    }
    None
}

/// Scenario fixture stored as JSON
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioFixture {
    pub name: String,
    pub layout: Vec<String>,
    /// Number of cells on the path, `null` when no path exists
    pub expected_cells: Option<usize>,
    #[serde(default)]
    pub must_visit: Vec<(i32, i32)>,
    #[serde(default)]
    pub must_avoid: Vec<(i32, i32)>,
}

impl ScenarioFixture {
    pub fn scenario(&self) -> Result<Scenario, Box<dyn std::error::Error>> {
        parse_scenario(&self.layout.join("\n"))
    }
}

/// Load a fixture from a JSON file
pub fn load_fixture(path: &FsPath) -> Result<ScenarioFixture, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    let fixture: ScenarioFixture = serde_json::from_str(&contents)?;
    Ok(fixture)
}
