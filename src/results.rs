use std::time::Duration;

use crate::entry::IdResult;

/// The output of a finished search, whether it ran to the end or was cancelled.
#[derive(Debug, Clone)]
pub struct Results {
    /// Matches, in the order they were found.
    pub results: Vec<IdResult>,

    /// Points enumerated before the worker stopped.
    pub progress: u64,

    /// The configured progress maximum.
    pub max_progress: u64,

    /// `true` if the run stopped because of [`cancel_search`](crate::SearchHandle::cancel_search)
    /// rather than by exhausting the space.
    pub cancelled: bool,

    /// Scan performance statistics.
    pub stats: ScanStats,
}

/// Performance statistics for a finished run.
#[derive(Debug, Clone, Copy)]
pub struct ScanStats {
    /// Seeds passed through the generator.
    pub seeds: u64,

    /// Wall-clock time from worker start to completion.
    pub duration: Duration,

    /// Seeds per second, clamped to 0 on zero-duration runs.
    pub seeds_per_sec: u64,
}

impl ScanStats {
    pub(crate) fn compute(seeds: u64, duration: Duration) -> Self {
        let sps = if duration.as_secs_f64() > 0.0 {
            (seeds as f64 / duration.as_secs_f64()) as u64
        } else {
            0
        };
        Self {
            seeds,
            duration,
            seeds_per_sec: sps,
        }
    }
}

/// A point-in-time view of a run, handed to [`watch`](crate::SearchHandle::watch)
/// callbacks.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub results: Vec<IdResult>,
    pub progress: u64,
    pub max_progress: u64,
    pub finished: bool,
}

impl Snapshot {
    /// Progress as a percentage in `0.0..=100.0`. An empty space counts as done.
    pub fn percent(&self) -> f64 {
        if self.max_progress == 0 {
            100.0
        } else {
            self.progress as f64 * 100.0 / self.max_progress as f64
        }
    }
}
