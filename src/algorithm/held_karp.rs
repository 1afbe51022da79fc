use crate::common::{Cell, SearchResult, Solution};
use crate::error::TooManyGoalsError;
use crate::map::{Maze, ShortestPathTree};

use std::iter;
use tracing::{debug, instrument};

/// Cheapest visiting order by dynamic programming over goal subsets.
///
/// Builds a shortest-path tree from the start and from every goal, then fills
/// `cost[subset][last]`, the cheapest walk from the start that has visited
/// exactly `subset` and stands on goal `last`. The winning order is stitched
/// together from the per-leg shortest paths.
///
/// The statistics differ from [`super::multi_goal_search`]: `nodes_expanded`
/// counts reachable `(subset, last)` entries and `max_fringe_size` is the
/// largest heap seen while building the trees.
#[instrument(skip_all, name = "held_karp_search", fields(start = format!("{:?}", maze.start), goals = maze.goals.len()), level = "debug")]
pub fn held_karp_search(
    maze: &Maze,
    max_goals: usize,
) -> Result<SearchResult, TooManyGoalsError> {
    let goals: Vec<Cell> = maze.goals.iter().copied().collect();
    let k = goals.len();
    if k > max_goals {
        return Err(TooManyGoalsError {
            goals: k,
            limit: max_goals,
        });
    }
    if k == 0 {
        return Ok(SearchResult::Found(Solution {
            path: vec![maze.start],
            cost: 0,
            nodes_expanded: 0,
            max_fringe_size: 1,
        }));
    }

    // Tree 0 is rooted at the start, tree i + 1 at goals[i].
    let trees: Vec<ShortestPathTree> = iter::once(maze.start)
        .chain(goals.iter().copied())
        .map(|source| maze.shortest_path_tree(source))
        .collect();
    let max_fringe_size = trees.iter().map(|tree| tree.max_heap_size).max().unwrap_or(1);

    let full = (1usize << k) - 1;
    let at = |subset: usize, last: usize| subset * k + last;
    let mut cost = vec![usize::MAX; (full + 1) * k];
    let mut previous: Vec<Option<usize>> = vec![None; (full + 1) * k];

    for (last, &goal) in goals.iter().enumerate() {
        if let Some(distance) = trees[0].distance_to(goal) {
            cost[at(1 << last, last)] = distance;
        }
    }

    // Subsets only grow, so ascending order settles every entry before use.
    let mut nodes_expanded = 0;
    for subset in 1..=full {
        for last in 0..k {
            let here = cost[at(subset, last)];
            if subset & (1 << last) == 0 || here == usize::MAX {
                continue;
            }
            nodes_expanded += 1;

            for next in (0..k).filter(|&next| subset & (1 << next) == 0) {
                let Some(leg) = trees[last + 1].distance_to(goals[next]) else {
                    continue;
                };
                let slot = at(subset | (1 << next), next);
                if here + leg < cost[slot] {
                    cost[slot] = here + leg;
                    previous[slot] = Some(last);
                }
            }
        }
    }

    let Some(last) = (0..k)
        .filter(|&last| cost[at(full, last)] != usize::MAX)
        .min_by_key(|&last| cost[at(full, last)])
    else {
        debug!("some goal is unreachable");
        return Ok(SearchResult::Exhausted {
            nodes_expanded,
            max_fringe_size,
        });
    };

    let mut order = Vec::with_capacity(k);
    let mut subset = full;
    let mut current = Some(last);
    while let Some(goal) = current {
        order.push(goal);
        current = previous[at(subset, goal)];
        subset &= !(1 << goal);
    }
    order.reverse();

    let mut path = vec![maze.start];
    let mut tree = &trees[0];
    for goal in order {
        // Each leg starts where the previous one ended.
        path.extend(tree.path_to(goals[goal]).into_iter().flatten().skip(1));
        tree = &trees[goal + 1];
    }

    let total = cost[at(full, last)];
    debug_assert_eq!(path.len() - 1, total);
    debug!("found route of cost {total}");

    Ok(SearchResult::Found(Solution {
        path,
        cost: total,
        nodes_expanded,
        max_fringe_size,
    }))
}
