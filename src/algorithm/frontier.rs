use crate::common::SearchState;
use crate::error::EmptyFrontierError;

use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone)]
pub struct FrontierEntry {
    pub cost: usize,
    pub state: SearchState,
    /// Trail index of the path leading up to, but excluding, `state.position`.
    pub parent: Option<usize>,
    discovery: usize,
}

impl FrontierEntry {
    pub fn discovery(&self) -> usize {
        self.discovery
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.discovery == other.discovery
    }
}

impl Eq for FrontierEntry {}

// BinaryHeap is a max-heap, so both keys are reversed.
impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            // Among equal costs, the earliest discovered entry comes out first.
            .then_with(|| other.discovery.cmp(&self.discovery))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue on accumulated cost, first-in-first-out among ties.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    discovered: usize,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cost: usize, state: SearchState, parent: Option<usize>) {
        self.heap.push(FrontierEntry {
            cost,
            state,
            parent,
            discovery: self.discovered,
        });
        self.discovered += 1;
    }

    pub fn pop_min(&mut self) -> Result<FrontierEntry, EmptyFrontierError> {
        self.heap.pop().ok_or(EmptyFrontierError)
    }

    pub fn size(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
