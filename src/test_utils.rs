use crate::common::{Cell, Solution};
use crate::map::{manhattan_distance, Maze};

use rand::Rng;
use std::collections::VecDeque;

pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

/// Walled border, random interior walls, one start and `goals` goal cells.
pub(crate) fn random_maze<R: Rng + ?Sized>(
    rng: &mut R,
    height: usize,
    width: usize,
    goals: usize,
) -> Maze {
    loop {
        let mut rows = vec![vec!['%'; width]; height];
        let mut open = Vec::new();
        for (x, row) in rows.iter_mut().enumerate().take(height - 1).skip(1) {
            for (y, ch) in row.iter_mut().enumerate().take(width - 1).skip(1) {
                if !rng.gen_bool(0.3) {
                    *ch = ' ';
                    open.push((x, y));
                }
            }
        }
        if open.len() <= goals {
            continue;
        }

        let (x, y) = open.swap_remove(rng.gen_range(0..open.len()));
        rows[x][y] = 'P';
        for _ in 0..goals {
            let (x, y) = open.swap_remove(rng.gen_range(0..open.len()));
            rows[x][y] = '.';
        }

        let text: String = rows
            .into_iter()
            .map(|row| row.into_iter().collect::<String>() + "\n")
            .collect();
        return Maze::parse(&text).unwrap();
    }
}

/// Plain breadth-first search, independent of the crate's own searches.
pub(crate) fn bfs_distance(maze: &Maze, from: Cell, to: Cell) -> Option<usize> {
    let mut distance = vec![vec![None; maze.width]; maze.height];
    let mut queue = VecDeque::from([from]);
    distance[from.0][from.1] = Some(0);

    while let Some((x, y)) = queue.pop_front() {
        let here = distance[x][y].unwrap();
        if (x, y) == to {
            return Some(here);
        }
        let candidates = [
            (x.wrapping_sub(1), y),
            (x + 1, y),
            (x, y.wrapping_sub(1)),
            (x, y + 1),
        ];
        for (nx, ny) in candidates {
            if nx < maze.height
                && ny < maze.width
                && maze.is_passable(nx, ny)
                && distance[nx][ny].is_none()
            {
                distance[nx][ny] = Some(here + 1);
                queue.push_back((nx, ny));
            }
        }
    }
    None
}

/// Cheapest tour cost over every visiting order of the goals.
pub(crate) fn brute_force_cost(maze: &Maze) -> Option<usize> {
    let goals: Vec<Cell> = maze.goals.iter().copied().collect();
    let mut order: Vec<usize> = (0..goals.len()).collect();
    let mut best = None;
    permute(&mut order, 0, &mut |order| {
        let mut cost = 0;
        let mut at = maze.start;
        for &index in order {
            cost += bfs_distance(maze, at, goals[index])?;
            at = goals[index];
        }
        best = Some(best.map_or(cost, |best: usize| best.min(cost)));
        Some(())
    });
    best
}

fn permute(order: &mut Vec<usize>, k: usize, visit: &mut impl FnMut(&[usize]) -> Option<()>) {
    if k == order.len() {
        let _ = visit(order);
        return;
    }
    for i in k..order.len() {
        order.swap(k, i);
        permute(order, k + 1, visit);
        order.swap(k, i);
    }
}

pub(crate) fn assert_valid_route(maze: &Maze, solution: &Solution) {
    let path = &solution.path;
    assert_eq!(path.first(), Some(&maze.start));
    assert_eq!(path.len(), solution.cost + 1);
    for step in path.windows(2) {
        assert_eq!(manhattan_distance(step[0], step[1]), 1, "{step:?}");
        assert!(!maze.is_wall(step[0]) && !maze.is_wall(step[1]));
    }
    for goal in &maze.goals {
        assert!(path.contains(goal), "goal {goal:?} not visited");
    }
}
