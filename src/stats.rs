// Per-run tally of what happened to each candidate

use crate::engine::FileOutcome;
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Debug, Clone)]
pub struct RunStats {
    /// Files encoded successfully this run
    pub converted: usize,

    /// Rotation results and files whose output already existed
    pub skipped: usize,

    /// Files ffprobe did not recognize
    pub unrecognized: usize,

    /// Files whose conversion failed (spawn, encoder exit, output directory)
    pub failed: usize,

    pub started: Instant,
}

impl Default for RunStats {
    fn default() -> Self {
        Self {
            converted: 0,
            skipped: 0,
            unrecognized: 0,
            failed: 0,
            started: Instant::now(),
        }
    }
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Converted { .. } => self.converted += 1,
            FileOutcome::Skipped(_) => self.skipped += 1,
            FileOutcome::Unrecognized => self.unrecognized += 1,
            FileOutcome::Failed(_) => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.converted + self.skipped + self.unrecognized + self.failed
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn log_summary(&self) {
        info!(
            total = self.total(),
            converted = self.converted,
            skipped = self.skipped,
            unrecognized = self.unrecognized,
            failed = self.failed,
            elapsed_s = self.elapsed().as_secs(),
            "run finished"
        );
    }
}
