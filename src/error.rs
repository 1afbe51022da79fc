use thiserror::Error;

use crate::common::Cell;

/// Reasons a textual maze cannot be turned into a [`crate::map::Maze`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedMazeError {
    #[error("maze has no rows")]
    Empty,

    #[error("row {row} of the maze is empty")]
    EmptyRow { row: usize },

    /// Rows must all share the width of the first row.
    #[error("row {row} has {found} columns, expected {expected}")]
    IrregularRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("maze has no start cell 'P'")]
    MissingStart,

    #[error("maze has a second start cell at {second:?}, first one at {first:?}")]
    DuplicateStart { first: Cell, second: Cell },
}

/// Popping from an empty [`crate::algorithm::Frontier`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("pop from an empty frontier")]
pub struct EmptyFrontierError;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("maze has {goals} goals, the held-karp solver accepts at most {limit}")]
pub struct TooManyGoalsError {
    pub goals: usize,
    pub limit: usize,
}
