use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::engine::SharedState;
use crate::entry::IdResult;
use crate::error::SearchError;
use crate::results::{Results, Snapshot};

/// A running search.
///
/// Returned by [`SearchBuilder::start`](crate::SearchBuilder::start). Every
/// accessor is safe to call while the worker runs and never waits on it.
///
/// Dropping the handle without calling [`wait`](Self::wait) cancels the run.
pub struct SearchHandle {
    state:        Arc<SharedState>,
    max_progress: u64,
    worker:       Option<JoinHandle<Results>>,
}

impl SearchHandle {
    pub(crate) fn new(
        state: Arc<SharedState>,
        max_progress: u64,
        worker: JoinHandle<Results>,
    ) -> Self {
        Self {
            state,
            max_progress,
            worker: Some(worker),
        }
    }

    /// Ask the worker to stop, returning the progress at the moment of the
    /// request.
    ///
    /// Returns immediately. No new point is started after the request, and
    /// progress never moves past the returned value. A point already being
    /// evaluated is allowed to finish but is not recorded. Everything found
    /// before the request is kept and the run completes normally.
    pub fn cancel_search(&self) -> u64 {
        let progress = self.state.request_cancel();
        log::trace!("SearchHandle: cancellation requested at {progress}");
        progress
    }

    /// Points enumerated so far. Never decreases and never exceeds
    /// [`max_progress`](Self::max_progress).
    pub fn current_progress(&self) -> u64 {
        self.state.progress()
    }

    pub fn max_progress(&self) -> u64 {
        self.max_progress
    }

    /// Matches found so far, in discovery order.
    pub fn get_results(&self) -> Vec<IdResult> {
        self.state.results()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot(self.max_progress)
    }

    /// Poll the run every `interval` until it finishes.
    ///
    /// `on_tick` sees a snapshot on each tick and exactly once more after the
    /// run has finished; that last snapshot has `finished` set. Ticks are
    /// best-effort: a slow callback delays the next one.
    pub fn watch(&self, interval: Duration, mut on_tick: impl FnMut(&Snapshot)) {
        while !self.state.wait_finished(interval) {
            on_tick(&self.snapshot());
        }
        on_tick(&self.snapshot());
    }

    /// Block until the worker finishes and return its final results.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::WorkerPanicked`] if the worker thread (or the
    /// `on_finished` callback it runs) panicked. The run is still marked
    /// finished in that case, so [`watch`](Self::watch) returns.
    pub fn wait(mut self) -> Result<Results, SearchError> {
        match self.worker.take() {
            Some(worker) => worker.join().map_err(|_| SearchError::WorkerPanicked),
            None => Err(SearchError::WorkerPanicked),
        }
    }
}

impl Drop for SearchHandle {
    fn drop(&mut self) {
        if self.worker.is_some() && !self.state.is_finished() {
            self.state.request_cancel();
        }
    }
}
