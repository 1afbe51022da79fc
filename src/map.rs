use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap};
use std::fs;
use std::str::FromStr;

use anyhow::Context;

use crate::common::{Cell, Path};
use crate::error::MalformedMazeError;

const START: char = 'P';
const GOAL: char = '.';
const WALL: char = '%';

// North, west, south, east.
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

#[derive(Debug, Clone)]
pub struct Tile {
    passable: bool,
    pub neighbors: Vec<Cell>, // Stores coordinates of accessible neighbors
}

impl Tile {
    pub fn is_passable(&self) -> bool {
        self.passable
    }
}

/// Parsed maze: walls, one start and a set of goals on a rectangular grid.
///
/// Never mutated after parsing, so one `Maze` can back any number of
/// searches, including concurrent ones.
#[derive(Debug, Clone)]
pub struct Maze {
    pub height: usize,
    pub width: usize,
    pub start: Cell,
    pub goals: BTreeSet<Cell>,
    grid: Vec<Vec<Tile>>,
}

impl FromStr for Maze {
    type Err = MalformedMazeError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Maze::parse(text)
    }
}

impl Maze {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("failed to read maze {path}"))?;
        Maze::parse(&text).with_context(|| format!("malformed maze {path}"))
    }

    /// `P` marks the start, `.` a goal, `%` a wall; anything else is floor.
    /// Trailing whitespace on each row and trailing blank rows are ignored.
    pub fn parse(text: &str) -> Result<Self, MalformedMazeError> {
        let mut rows: Vec<Vec<char>> = text
            .lines()
            .map(|line| line.trim_end().chars().collect())
            .collect();
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }

        let width = match rows.first() {
            None => return Err(MalformedMazeError::Empty),
            Some(row) if row.is_empty() => return Err(MalformedMazeError::EmptyRow { row: 0 }),
            Some(row) => row.len(),
        };

        let mut start = None;
        let mut goals = BTreeSet::new();
        let mut grid = Vec::with_capacity(rows.len());

        for (x, row) in rows.iter().enumerate() {
            if row.is_empty() {
                return Err(MalformedMazeError::EmptyRow { row: x });
            }
            if row.len() != width {
                return Err(MalformedMazeError::IrregularRow {
                    row: x,
                    expected: width,
                    found: row.len(),
                });
            }

            let mut tiles_row = Vec::with_capacity(width);
            for (y, &ch) in row.iter().enumerate() {
                match ch {
                    START => {
                        if let Some(first) = start {
                            return Err(MalformedMazeError::DuplicateStart {
                                first,
                                second: (x, y),
                            });
                        }
                        start = Some((x, y));
                    }
                    GOAL => {
                        goals.insert((x, y));
                    }
                    _ => {}
                }
                tiles_row.push(Tile {
                    passable: ch != WALL,
                    neighbors: Vec::new(),
                });
            }
            grid.push(tiles_row);
        }

        let mut maze = Maze {
            height: grid.len(),
            width,
            start: start.ok_or(MalformedMazeError::MissingStart)?,
            goals,
            grid,
        };
        maze.initialize_neighbors();

        Ok(maze)
    }

    fn initialize_neighbors(&mut self) {
        for x in 0..self.height {
            for y in 0..self.width {
                if self.grid[x][y].passable {
                    self.grid[x][y].neighbors = self.get_neighbors(x, y);
                }
            }
        }
    }

    fn get_neighbors(&self, x: usize, y: usize) -> Vec<Cell> {
        let mut neighbors = Vec::new();

        for &(dx, dy) in &DIRECTIONS {
            let new_x = x as isize + dx;
            let new_y = y as isize + dy;
            if new_x >= 0
                && new_y >= 0
                && new_x < self.height as isize
                && new_y < self.width as isize
                && self.grid[new_x as usize][new_y as usize].passable
            {
                neighbors.push((new_x as usize, new_y as usize));
            }
        }

        neighbors
    }

    /// Open cells orthogonally adjacent to `position`, in north, west, south,
    /// east order. Empty for walls and for cells outside the grid.
    pub fn neighbors(&self, position: Cell) -> &[Cell] {
        self.tile(position)
            .map_or(&[][..], |tile| tile.neighbors.as_slice())
    }

    /// Moves are unit cost; the Manhattan distance between two adjacent cells
    /// is always one.
    pub fn step_cost(&self, from: Cell, to: Cell) -> usize {
        let cost = manhattan_distance(from, to);
        debug_assert_eq!(cost, 1, "{from:?} and {to:?} are not adjacent");
        cost
    }

    pub fn in_bounds(&self, position: Cell) -> bool {
        position.0 < self.height && position.1 < self.width
    }

    pub fn is_passable(&self, x: usize, y: usize) -> bool {
        self.grid[x][y].is_passable()
    }

    pub fn is_wall(&self, position: Cell) -> bool {
        self.tile(position).is_some_and(|tile| !tile.passable)
    }

    pub fn walls(&self) -> impl Iterator<Item = Cell> + '_ {
        self.grid.iter().enumerate().flat_map(|(x, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, tile)| !tile.passable)
                .map(move |(y, _)| (x, y))
        })
    }

    fn tile(&self, position: Cell) -> Option<&Tile> {
        self.grid.get(position.0).and_then(|row| row.get(position.1))
    }

    /// Dijkstra from `source` over the unit-cost grid.
    pub fn shortest_path_tree(&self, source: Cell) -> ShortestPathTree {
        let mut distance = vec![vec![usize::MAX; self.width]; self.height];
        let mut parent = vec![vec![None; self.width]; self.height];
        let mut heap = BinaryHeap::new();
        let mut max_heap_size = 0;

        if self.tile(source).is_some_and(Tile::is_passable) {
            distance[source.0][source.1] = 0;
            heap.push((Reverse(0), source));
            max_heap_size = 1;
        }

        while let Some((Reverse(cost), (x, y))) = heap.pop() {
            if cost > distance[x][y] {
                continue;
            }

            for &(new_x, new_y) in &self.grid[x][y].neighbors {
                let next_cost = cost + self.step_cost((x, y), (new_x, new_y));
                if next_cost < distance[new_x][new_y] {
                    heap.push((Reverse(next_cost), (new_x, new_y)));
                    distance[new_x][new_y] = next_cost;
                    parent[new_x][new_y] = Some((x, y));
                }
            }
            max_heap_size = max_heap_size.max(heap.len());
        }

        ShortestPathTree {
            source,
            distance,
            parent,
            max_heap_size,
        }
    }
}

pub fn manhattan_distance(a: Cell, b: Cell) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

/// Distances and parent links from one source cell to every reachable cell.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    pub source: Cell,
    distance: Vec<Vec<usize>>,
    parent: Vec<Vec<Option<Cell>>>,
    pub max_heap_size: usize,
}

impl ShortestPathTree {
    pub fn distance_to(&self, target: Cell) -> Option<usize> {
        self.distance
            .get(target.0)
            .and_then(|row| row.get(target.1))
            .copied()
            .filter(|&distance| distance != usize::MAX)
    }

    /// Cells from the source to `target`, both inclusive.
    pub fn path_to(&self, target: Cell) -> Option<Path> {
        self.distance_to(target)?;

        let mut path = vec![target];
        let mut current = target;
        while let Some(previous) = self.parent[current.0][current.1] {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        Some(path)
    }
}
