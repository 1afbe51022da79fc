mod frontier;
mod held_karp;
mod multi_goal;

pub use frontier::{Frontier, FrontierEntry};
pub use held_karp::held_karp_search;
pub use multi_goal::{multi_goal_search, VisitedKey};

use crate::common::{Cell, Path};

/// One link of a persistent path: a cell plus the index of its predecessor.
#[derive(Debug, Clone, Copy)]
struct PathNode {
    position: Cell,
    parent: Option<usize>,
}

fn construct_path(trail: &[PathNode], mut current: Option<usize>) -> Path {
    let mut path = Vec::new();
    while let Some(index) = current {
        let node = trail[index];
        path.push(node.position);
        current = node.parent;
    }
    path.reverse();
    path
}
