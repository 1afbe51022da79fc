use crate::algorithm::{held_karp_search, multi_goal_search, VisitedKey};
use crate::common::SearchResult;
use crate::config::{Config, SolverKind};
use crate::map::Maze;
use crate::stat::Stats;

use std::time::Instant;

pub trait Solver {
    fn solve(&mut self) -> anyhow::Result<SearchResult>;

    /// Statistics of the last `solve` call.
    fn stats(&self) -> &Stats;
}

pub fn new_solver<'a>(maze: &'a Maze, config: &Config) -> Box<dyn Solver + 'a> {
    match config.solver {
        SolverKind::UniformCost => Box::new(UniformCost::new(maze, config.visited_key)),
        SolverKind::HeldKarp => Box::new(HeldKarp::new(maze, config.max_goals)),
    }
}

pub struct UniformCost<'a> {
    maze: &'a Maze,
    visited_key: VisitedKey,
    stats: Stats,
}

impl<'a> UniformCost<'a> {
    pub fn new(maze: &'a Maze, visited_key: VisitedKey) -> Self {
        UniformCost {
            maze,
            visited_key,
            stats: Stats::default(),
        }
    }
}

impl Solver for UniformCost<'_> {
    fn solve(&mut self) -> anyhow::Result<SearchResult> {
        let solve_start_time = Instant::now();
        let result = multi_goal_search(self.maze, self.visited_key);
        self.stats.record(&result, solve_start_time.elapsed());
        Ok(result)
    }

    fn stats(&self) -> &Stats {
        &self.stats
    }
}

pub struct HeldKarp<'a> {
    maze: &'a Maze,
    max_goals: usize,
    stats: Stats,
}

impl<'a> HeldKarp<'a> {
    pub fn new(maze: &'a Maze, max_goals: usize) -> Self {
        HeldKarp {
            maze,
            max_goals,
            stats: Stats::default(),
        }
    }
}

impl Solver for HeldKarp<'_> {
    fn solve(&mut self) -> anyhow::Result<SearchResult> {
        let solve_start_time = Instant::now();
        let result = held_karp_search(self.maze, self.max_goals)?;
        self.stats.record(&result, solve_start_time.elapsed());
        Ok(result)
    }

    fn stats(&self) -> &Stats {
        &self.stats
    }
}
