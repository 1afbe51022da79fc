use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::Cell;

/// Copy of `original` with every cell on `path` drawn as `.`.
pub fn render_path(original: &str, path: &[Cell]) -> String {
    let mut rows: Vec<Vec<char>> = original
        .lines()
        .map(|line| line.trim_end().chars().collect())
        .collect();

    for &(x, y) in path {
        if let Some(ch) = rows.get_mut(x).and_then(|row| row.get_mut(y)) {
            *ch = '.';
        }
    }

    rows.into_iter()
        .map(|row| row.into_iter().collect::<String>() + "\n")
        .collect()
}

pub fn write_solution(maze_path: &str, output_path: &Path, path: &[Cell]) -> anyhow::Result<()> {
    let original =
        fs::read_to_string(maze_path).with_context(|| format!("failed to read maze {maze_path}"))?;
    fs::write(output_path, render_path(&original, path))
        .with_context(|| format!("failed to write solution {}", output_path.display()))
}

/// `dir/<maze stem>_solution.txt`
pub fn solution_path(dir: &str, maze_path: &str) -> PathBuf {
    let stem = Path::new(maze_path)
        .file_stem()
        .map_or_else(|| "maze".into(), |stem| stem.to_string_lossy());
    Path::new(dir).join(format!("{stem}_solution.txt"))
}

/// `(r, c).(r, c)...`
pub fn format_path(path: &[Cell]) -> String {
    path.iter()
        .map(|cell| format!("{cell:?}"))
        .collect::<Vec<_>>()
        .join(".")
}
