//! Minimum-cost routes through 2-D grid mazes that must visit every goal cell.
//!
//! A [`Maze`] is parsed once from its text form and can then back any number
//! of searches. [`solve`] runs a uniform-cost search whose nodes are
//! `(position, remaining goals)` pairs; see [`algorithm`] for the variants.

pub mod algorithm;
pub mod common;
pub mod config;
pub mod error;
pub mod map;
pub mod render;
pub mod solver;
pub mod stat;

#[cfg(test)]
mod test_utils;

pub use algorithm::VisitedKey;
pub use common::{Cell, GoalSet, Path, SearchResult, SearchState, Solution};
pub use error::MalformedMazeError;
pub use map::Maze;

/// Deterministic: the same maze always yields the same result.
pub fn solve(maze: &Maze) -> SearchResult {
    algorithm::multi_goal_search(maze, VisitedKey::default())
}
