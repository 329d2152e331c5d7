use std::sync::Arc;
use std::thread;

use crate::engine::{run, EngineOptions, SharedState};
use crate::error::SearchError;
use crate::handle::SearchHandle;
use crate::params::{IdFilter, SearchParameters};
use crate::results::Results;
use crate::rng::Gen4Generator;
use crate::space::SearchSpace;
use crate::traits::IdGenerator;

type FinishedCallback = Box<dyn FnOnce(&Results) + Send + 'static>;

// ---------------------------------------------------------------------------
// SearchBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and starting a search.
///
/// Created via [`gen4ids::search()`](crate::search). Configure with chained
/// builder methods, then call [`start()`](SearchBuilder::start) to run in the
/// background or [`run()`](SearchBuilder::run) to block until done.
///
/// # Example
///
/// ```rust,ignore
/// let handle = gen4ids::search()
///     .tid_filter([12345])
///     .bounded(600, 700)
///     .on_finished(|r| println!("{} matches", r.results.len()))
///     .start()?;
/// ```
pub struct SearchBuilder {
    tid_filter:   IdFilter,
    sid_filter:   IdFilter,
    space:        SearchSpace,
    generator:    Option<Arc<dyn IdGenerator>>,
    max_progress: Option<u64>,
    on_finished:  Option<FinishedCallback>,
}

impl Default for SearchBuilder {
    fn default() -> Self {
        Self {
            tid_filter:   IdFilter::default(),
            sid_filter:   IdFilter::default(),
            space:        SearchSpace::default(),
            generator:    None,
            max_progress: None,
            on_finished:  None,
        }
    }
}

impl SearchBuilder {
    // ── Filters ───────────────────────────────────────────────────────────

    /// Trainer IDs to look for. Empty (the default) accepts any TID.
    pub fn tid_filter(mut self, ids: impl IntoIterator<Item = u16>) -> Self {
        self.tid_filter = IdFilter::new(ids);
        self
    }

    /// Secret IDs to look for. Empty (the default) accepts any SID.
    pub fn sid_filter(mut self, ids: impl IntoIterator<Item = u16>) -> Self {
        self.sid_filter = IdFilter::new(ids);
        self
    }

    // ── Space ─────────────────────────────────────────────────────────────

    pub fn space(mut self, space: SearchSpace) -> Self {
        self.space = space;
        self
    }

    /// Search delays in `[min_delay, max_delay)`.
    ///
    /// No ordering check happens here; an inverted range is simply empty.
    pub fn bounded(self, min_delay: u32, max_delay: u32) -> Self {
        self.space(SearchSpace::Bounded { min_delay, max_delay })
    }

    /// Search every 32-bit seed.
    pub fn unbounded(self) -> Self {
        self.space(SearchSpace::Unbounded)
    }

    /// Take filters and space from already-validated parameters.
    pub fn parameters(mut self, params: SearchParameters) -> Self {
        self.tid_filter = params.tid_filter;
        self.sid_filter = params.sid_filter;
        self.space = params.space;
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Replace the ID formula. Defaults to [`Gen4Generator`].
    pub fn generator(mut self, g: impl IdGenerator + 'static) -> Self {
        self.generator = Some(Arc::new(g));
        self
    }

    /// Override the progress maximum.
    ///
    /// Defaults to the size of the space. Reported progress is clamped to
    /// this value.
    pub fn max_progress(mut self, n: u64) -> Self {
        self.max_progress = Some(n);
        self
    }

    /// Register the completion callback.
    ///
    /// Runs exactly once, on the worker thread, after the run is marked
    /// finished, whether it was exhausted or cancelled.
    pub fn on_finished(mut self, f: impl FnOnce(&Results) + Send + 'static) -> Self {
        self.on_finished = Some(Box::new(f));
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Start the search on a worker thread and return immediately.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Spawn`] if the worker thread cannot be created.
    pub fn start(self) -> Result<SearchHandle, SearchError> {
        let generator: Arc<dyn IdGenerator> = match self.generator {
            Some(g) => g,
            None    => Arc::new(Gen4Generator),
        };
        let max_progress = self
            .max_progress
            .unwrap_or_else(|| self.space.max_progress());

        let opts = EngineOptions {
            space:      self.space,
            tid_filter: self.tid_filter,
            sid_filter: self.sid_filter,
            generator,
            max_progress,
        };

        let state = Arc::new(SharedState::default());
        let worker_state = Arc::clone(&state);
        let on_finished = self.on_finished;

        let worker = thread::Builder::new()
            .name("gen4ids-search".into())
            .spawn(move || {
                let results = run(&opts, &worker_state);
                if let Some(callback) = on_finished {
                    callback(&results);
                }
                results
            })
            .map_err(SearchError::Spawn)?;

        Ok(SearchHandle::new(state, max_progress, worker))
    }

    /// Run the search and block until it completes.
    ///
    /// # Errors
    ///
    /// Same as [`start`](Self::start), plus [`SearchError::WorkerPanicked`].
    pub fn run(self) -> Result<Results, SearchError> {
        self.start()?.wait()
    }
}
