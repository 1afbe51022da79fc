use super::{construct_path, Frontier, FrontierEntry, PathNode};
use crate::common::{Cell, GoalSet, SearchResult, SearchState, Solution};
use crate::map::Maze;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, instrument, trace};

/// What the visited record remembers about an expanded node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisitedKey {
    /// Full `(position, remaining goals)` pair. Always finds the cheapest route.
    #[default]
    State,
    /// Position only. Prunes any later arrival at an expanded cell regardless
    /// of which goals it has already collected, so it can miss the cheapest
    /// route or report no route at all when the route must double back.
    Position,
}

enum VisitedRecord {
    State(HashSet<SearchState>),
    Position(HashSet<Cell>),
}

impl VisitedRecord {
    fn new(key: VisitedKey) -> Self {
        match key {
            VisitedKey::State => VisitedRecord::State(HashSet::new()),
            VisitedKey::Position => VisitedRecord::Position(HashSet::new()),
        }
    }

    /// Returns false if the node was already expanded.
    fn insert(&mut self, state: &SearchState) -> bool {
        match self {
            VisitedRecord::State(visited) => {
                !visited.contains(state) && visited.insert(state.clone())
            }
            VisitedRecord::Position(visited) => visited.insert(state.position),
        }
    }

    fn len(&self) -> usize {
        match self {
            VisitedRecord::State(visited) => visited.len(),
            VisitedRecord::Position(visited) => visited.len(),
        }
    }
}

/// Uniform-cost search over (position, remaining goals).
///
/// Priority is the accumulated step count alone. The search stops at the first
/// popped state with no goals left; `nodes_expanded` is the size of the
/// visited record at that point.
#[instrument(skip_all, name = "multi_goal_search", fields(start = format!("{:?}", maze.start), goals = maze.goals.len(), visited_key = ?visited_key), level = "debug")]
pub fn multi_goal_search(maze: &Maze, visited_key: VisitedKey) -> SearchResult {
    let mut frontier = Frontier::new();
    let mut visited = VisitedRecord::new(visited_key);
    let mut trail: Vec<PathNode> = Vec::new();

    let goals = GoalSet::new(maze.goals.iter().copied());
    frontier.push(0, SearchState::new(maze.start, goals), None);
    let mut max_fringe_size = 1;

    while let Ok(FrontierEntry {
        cost,
        state,
        parent,
        ..
    }) = frontier.pop_min()
    {
        if state.remaining.is_empty() {
            let mut path = construct_path(&trail, parent);
            path.push(state.position);
            debug!(
                "found route of cost {cost}, expanded {} nodes",
                visited.len()
            );

            return SearchResult::Found(Solution {
                path,
                cost,
                nodes_expanded: visited.len(),
                max_fringe_size,
            });
        }

        if !visited.insert(&state) {
            continue;
        }
        trace!("expand node: {state:?} cost {cost}");

        trail.push(PathNode {
            position: state.position,
            parent,
        });
        let node = Some(trail.len() - 1);

        for &neighbor in maze.neighbors(state.position) {
            let remaining = state.remaining.remove(neighbor);
            let new_cost = cost + maze.step_cost(state.position, neighbor);
            frontier.push(new_cost, SearchState::new(neighbor, remaining), node);
        }
        max_fringe_size = max_fringe_size.max(frontier.size());
    }

    debug!("frontier exhausted, expanded {} nodes", visited.len());
    SearchResult::Exhausted {
        nodes_expanded: visited.len(),
        max_fringe_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        assert_valid_route, bfs_distance, brute_force_cost, init_tracing, random_maze,
    };

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const CORRIDOR: &str = "%%%%%\n%P..%\n%%%%%";
    // Goals on both sides of the start: any route has to double back.
    const DOUBLE_BACK: &str = "%%%%%%\n%.P .%\n%%%%%%";

    #[test]
    fn test_corridor_two_goals() {
        init_tracing();
        let maze = Maze::parse(CORRIDOR).unwrap();

        for key in [VisitedKey::State, VisitedKey::Position] {
            let result = multi_goal_search(&maze, key);
            let solution = result.solution().unwrap();
            assert_eq!(solution.cost, 2);
            assert_eq!(solution.path, vec![(1, 1), (1, 2), (1, 3)]);
            assert!(solution.nodes_expanded <= 3);
            assert_eq!(solution.max_fringe_size, 2);
        }
    }

    #[test]
    fn test_corridor_node_counts() {
        let maze = Maze::parse(CORRIDOR).unwrap();

        // (1,1) with both goals, (1,2) with one, then (1,1) again with one.
        let by_state = multi_goal_search(&maze, VisitedKey::State);
        assert_eq!(by_state.nodes_expanded(), 3);

        // The revisit of (1,1) is pruned.
        let by_position = multi_goal_search(&maze, VisitedKey::Position);
        assert_eq!(by_position.nodes_expanded(), 2);
    }

    #[test]
    fn test_no_goals() {
        let maze = Maze::parse("%%%\n%P%\n%%%").unwrap();
        let result = multi_goal_search(&maze, VisitedKey::State);

        assert_eq!(
            result,
            SearchResult::Found(Solution {
                path: vec![(1, 1)],
                cost: 0,
                nodes_expanded: 0,
                max_fringe_size: 1,
            })
        );
    }

    #[test]
    fn test_enclosed_goal_is_exhausted() {
        init_tracing();
        let maze = Maze::from_file("maze_file/enclosedMaze.txt").unwrap();

        for key in [VisitedKey::State, VisitedKey::Position] {
            match multi_goal_search(&maze, key) {
                SearchResult::Exhausted { nodes_expanded, .. } => {
                    // Six open cells around the start, goal set never shrinks.
                    assert_eq!(nodes_expanded, 6);
                }
                found => panic!("expected no route, got {found:?}"),
            }
        }
    }

    #[test]
    fn test_start_walled_in() {
        let maze = Maze::parse("%%%%%\n%P%.%\n%%%%%").unwrap();
        let result = multi_goal_search(&maze, VisitedKey::State);
        assert_eq!(
            result,
            SearchResult::Exhausted {
                nodes_expanded: 1,
                max_fringe_size: 1,
            }
        );
    }

    #[test]
    fn test_double_back_needs_full_state() {
        let maze = Maze::parse(DOUBLE_BACK).unwrap();

        let result = multi_goal_search(&maze, VisitedKey::State);
        let solution = result.solution().unwrap();
        assert_eq!(solution.cost, 4);
        assert_eq!(
            solution.path,
            vec![(1, 2), (1, 1), (1, 2), (1, 3), (1, 4)]
        );

        // Position-only pruning never lets the route back through the start.
        let result = multi_goal_search(&maze, VisitedKey::Position);
        assert!(matches!(
            result,
            SearchResult::Exhausted {
                nodes_expanded: 4,
                ..
            }
        ));
    }

    #[test]
    fn test_tiny_maze() {
        let maze = Maze::from_file("maze_file/tinyMaze.txt").unwrap();
        let result = multi_goal_search(&maze, VisitedKey::State);
        let solution = result.solution().unwrap();

        assert_eq!(solution.cost, 8);
        assert_eq!(solution.path.len(), 9);
        assert_valid_route(&maze, solution);
    }

    #[test]
    fn test_multi_goal_maze() {
        let maze = Maze::from_file("maze_file/multiGoalMaze.txt").unwrap();
        let result = multi_goal_search(&maze, VisitedKey::State);
        let solution = result.solution().unwrap();

        assert_eq!(solution.cost, 21);
        assert_eq!(brute_force_cost(&maze), Some(21));
        assert_valid_route(&maze, solution);
    }

    #[test]
    fn test_deterministic() {
        let maze = Maze::from_file("maze_file/multiGoalMaze.txt").unwrap();
        for key in [VisitedKey::State, VisitedKey::Position] {
            assert_eq!(multi_goal_search(&maze, key), multi_goal_search(&maze, key));
        }
    }

    #[test]
    fn test_random_mazes_are_optimal() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..60 {
            let maze = random_maze(&mut rng, 6, 7, 3);
            let result = multi_goal_search(&maze, VisitedKey::State);

            match (brute_force_cost(&maze), result.solution()) {
                (Some(best), Some(solution)) => {
                    assert_eq!(solution.cost, best);
                    assert_valid_route(&maze, solution);
                }
                (None, None) => {}
                (best, solution) => panic!("brute force {best:?}, search {solution:?}"),
            }
        }
    }

    #[test]
    fn test_random_single_goal_matches_bfs() {
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..60 {
            let maze = random_maze(&mut rng, 7, 8, 1);
            let goal = *maze.goals.first().unwrap();
            let expected = bfs_distance(&maze, maze.start, goal);

            for key in [VisitedKey::State, VisitedKey::Position] {
                let result = multi_goal_search(&maze, key);
                assert_eq!(result.solution().map(|s| s.cost), expected);
            }
        }
    }

    #[test]
    fn test_position_key_never_beats_state_key() {
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..60 {
            let maze = random_maze(&mut rng, 6, 7, 3);
            let by_state = multi_goal_search(&maze, VisitedKey::State);
            let by_position = multi_goal_search(&maze, VisitedKey::Position);

            if let Some(solution) = by_position.solution() {
                assert_valid_route(&maze, solution);
                assert!(solution.cost >= by_state.solution().unwrap().cost);
            }
        }
    }
}
