use maze_search::config::{Cli, Config};
use maze_search::map::Maze;
use maze_search::render::{format_path, solution_path, write_solution};
use maze_search::solver::new_solver;
use maze_search::stat::{write_report, MazeReport};
use maze_search::SearchResult;

use anyhow::Context;
use clap::Parser;
use rayon::prelude::*;
use std::fs;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let cli = Cli::parse();

    let config = if let Some(config_file) = cli.config.as_ref() {
        let config_str = fs::read_to_string(config_file)
            .with_context(|| format!("failed to read config file: {config_file}"))?;
        Config::from_yaml_str(&config_str)
            .with_context(|| format!("error with config file: {config_file}"))?
    } else {
        info!("No config file specified, using default config");
        Config::default()
    }
    .override_from_command_line(&cli)?;

    if let Some(solution_dir) = &config.solution_dir {
        fs::create_dir_all(solution_dir)
            .with_context(|| format!("failed to create directory {solution_dir}"))?;
    }

    // One independent search per maze; results keep the input order.
    let reports = config
        .maze_paths
        .par_iter()
        .map(|maze_path| solve_maze(maze_path, &config))
        .collect::<anyhow::Result<Vec<_>>>()?;

    if let Some(output_path) = &config.output_path {
        write_report(output_path, &reports)?;
        info!("Report written to {output_path}");
    }

    Ok(())
}

fn solve_maze(maze_path: &str, config: &Config) -> anyhow::Result<MazeReport> {
    let maze = Maze::from_file(maze_path)?;
    let mut solver = new_solver(&maze, config);
    let result = solver
        .solve()
        .with_context(|| format!("error solving maze {maze_path}"))?;
    solver.stats().print(maze_path);

    match &result {
        SearchResult::Found(solution) => {
            info!("{maze_path}: Path {}", format_path(&solution.path));
            if let Some(solution_dir) = &config.solution_dir {
                let output_path = solution_path(solution_dir, maze_path);
                write_solution(maze_path, &output_path, &solution.path)?;
                info!("{maze_path}: Solution written to {}", output_path.display());
            }
        }
        SearchResult::Exhausted { .. } => warn!("{maze_path}: no route visits every goal"),
    }

    Ok(MazeReport {
        maze: maze_path.to_string(),
        solver: config.solver,
        stats: solver.stats().clone(),
        result,
    })
}
