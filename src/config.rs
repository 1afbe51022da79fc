use anyhow::anyhow;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::algorithm::VisitedKey;

/// Held-Karp keeps `2^goals * goals` table entries.
pub const HELD_KARP_GOAL_LIMIT: usize = 20;

#[derive(Parser, Debug, Default)]
#[command(
    name = "maze-search",
    about = "Shortest route through a grid maze that visits every goal cell.",
    version = "1.0"
)]
pub struct Cli {
    #[arg(help = "Maze files to solve")]
    pub maze_paths: Vec<String>,

    #[arg(long, help = "Path to a YAML config file")]
    pub config: Option<String>,

    #[arg(long, value_enum, help = "Solver to use")]
    pub solver: Option<SolverKind>,

    #[arg(
        long,
        value_enum,
        help = "What marks a node as already expanded in the uniform-cost solver"
    )]
    pub visited_key: Option<VisitedKey>,

    #[arg(long, help = "Largest goal count the held-karp solver accepts")]
    pub max_goals: Option<usize>,

    #[arg(long, help = "Directory for rendered solution mazes")]
    pub solution_dir: Option<String>,

    #[arg(long, help = "Path to the JSON report")]
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolverKind {
    /// Uniform-cost search over (position, remaining goals).
    #[default]
    UniformCost,
    /// Goal-to-goal distances plus a dynamic program over visiting orders.
    HeldKarp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub maze_paths: Vec<String>,
    pub solver: SolverKind,
    pub visited_key: VisitedKey,
    pub max_goals: usize,
    pub solution_dir: Option<String>,
    pub output_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            maze_paths: Vec::new(),
            solver: SolverKind::default(),
            visited_key: VisitedKey::default(),
            max_goals: 16,
            solution_dir: None,
            output_path: None,
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Command-line values win over the config file; the result is validated.
    pub fn override_from_command_line(mut self, cli: &Cli) -> anyhow::Result<Self> {
        if !cli.maze_paths.is_empty() {
            self.maze_paths = cli.maze_paths.clone();
        }
        if let Some(solver) = cli.solver {
            self.solver = solver;
        }
        if let Some(visited_key) = cli.visited_key {
            self.visited_key = visited_key;
        }
        if let Some(max_goals) = cli.max_goals {
            self.max_goals = max_goals;
        }
        if let Some(solution_dir) = &cli.solution_dir {
            self.solution_dir = Some(solution_dir.clone());
        }
        if let Some(output_path) = &cli.output_path {
            self.output_path = Some(output_path.clone());
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.maze_paths.is_empty() {
            return Err(anyhow!("No maze file given"));
        }

        if self.max_goals == 0 || self.max_goals > HELD_KARP_GOAL_LIMIT {
            return Err(anyhow!(
                "Max goals must be between 1 and {HELD_KARP_GOAL_LIMIT}, got {}",
                self.max_goals
            ));
        }
        Ok(())
    }
}
