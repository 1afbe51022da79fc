use serde::Serialize;
use std::collections::BTreeSet;
use std::rc::Rc;

/// Grid coordinate as (row, column).
pub type Cell = (usize, usize);

pub type Path = Vec<Cell>;

/// Goals not yet visited along a partial path.
///
/// Immutable: [`GoalSet::remove`] hands back a new set and leaves the receiver
/// untouched. The cells sit behind an `Rc` so that the common case, stepping
/// onto a non-goal cell, shares the parent's set instead of copying it.
/// Equality, ordering and hashing are structural over the cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GoalSet(Rc<BTreeSet<Cell>>);

impl GoalSet {
    pub fn new(goals: impl IntoIterator<Item = Cell>) -> Self {
        GoalSet(Rc::new(goals.into_iter().collect()))
    }

    pub fn remove(&self, cell: Cell) -> Self {
        if !self.0.contains(&cell) {
            return self.clone();
        }

        let mut remaining = (*self.0).clone();
        remaining.remove(&cell);
        GoalSet(Rc::new(remaining))
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.0.contains(&cell)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.0.iter().copied()
    }
}

/// Identity of a node in the search graph: where we are and what is left.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchState {
    pub position: Cell,
    pub remaining: GoalSet,
}

impl SearchState {
    pub fn new(position: Cell, remaining: GoalSet) -> Self {
        SearchState {
            position,
            remaining,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    /// Cells from the start to the last goal, both inclusive.
    pub path: Path,
    pub cost: usize,
    pub nodes_expanded: usize,
    pub max_fringe_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchResult {
    Found(Solution),
    /// Every reachable state was expanded without visiting all goals.
    Exhausted {
        nodes_expanded: usize,
        max_fringe_size: usize,
    },
}

impl SearchResult {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchResult::Found(solution) => Some(solution),
            SearchResult::Exhausted { .. } => None,
        }
    }

    pub fn nodes_expanded(&self) -> usize {
        match self {
            SearchResult::Found(solution) => solution.nodes_expanded,
            SearchResult::Exhausted { nodes_expanded, .. } => *nodes_expanded,
        }
    }

    pub fn max_fringe_size(&self) -> usize {
        match self {
            SearchResult::Found(solution) => solution.max_fringe_size,
            SearchResult::Exhausted {
                max_fringe_size, ..
            } => *max_fringe_size,
        }
    }
}
