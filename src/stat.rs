use anyhow::Context;
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::common::SearchResult;
use crate::config::SolverKind;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub cost: Option<usize>,
    pub time_us: usize,
    pub nodes_expanded: usize,
    pub max_fringe_size: usize,
    /// Steps on the returned path.
    pub max_depth: Option<usize>,
}

impl Stats {
    pub(crate) fn record(&mut self, result: &SearchResult, elapsed: Duration) {
        let solution = result.solution();
        self.cost = solution.map(|solution| solution.cost);
        self.max_depth = solution.map(|solution| solution.path.len().saturating_sub(1));
        self.nodes_expanded = result.nodes_expanded();
        self.max_fringe_size = result.max_fringe_size();
        self.time_us = elapsed.as_micros() as usize;
    }

    pub fn print(&self, maze: &str) {
        info!(
            "{maze}: Cost {:?} Time(microseconds) {:?} Nodes expanded {:?} Max tree depth {:?} Max fringe size {:?}",
            self.cost, self.time_us, self.nodes_expanded, self.max_depth, self.max_fringe_size
        );
    }
}

/// One line of the JSON run report.
#[derive(Debug, Clone, Serialize)]
pub struct MazeReport {
    pub maze: String,
    pub solver: SolverKind,
    pub stats: Stats,
    pub result: SearchResult,
}

pub fn write_report(path: &str, reports: &[MazeReport]) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(path).parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("failed to create report {path}"))?;
    serde_json::to_writer_pretty(BufWriter::new(file), reports)
        .with_context(|| format!("failed to write report {path}"))?;
    Ok(())
}
