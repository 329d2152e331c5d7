use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::entry::IdResult;
use crate::params::IdFilter;
use crate::results::{Results, ScanStats, Snapshot};
use crate::space::SearchSpace;
use crate::traits::IdGenerator;

/// High bit of the progress word. Once a cancellation request sets it, the
/// worker can no longer advance progress.
const CANCEL_BIT: u64 = 1 << 63;

// ---------------------------------------------------------------------------
// Engine options
// ---------------------------------------------------------------------------

/// Internal options passed from the builder to `run()`.
pub(crate) struct EngineOptions {
    pub space:        SearchSpace,
    pub tid_filter:   IdFilter,
    pub sid_filter:   IdFilter,
    pub generator:    Arc<dyn IdGenerator>,
    pub max_progress: u64,
}

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// State shared between the worker and the caller's handle.
///
/// The worker is the only writer of progress and results. Readers get copies.
/// Progress and the cancel request share one atomic word, so progress stops
/// at exactly the value it had when cancellation was requested.
#[derive(Default)]
pub(crate) struct SharedState {
    progress: AtomicU64,
    results:  Mutex<Vec<IdResult>>,
    finished: Mutex<bool>,
    done:     Condvar,
}

impl SharedState {
    pub fn progress(&self) -> u64 {
        self.progress.load(Ordering::Acquire) & !CANCEL_BIT
    }

    /// Freeze progress and return the value it was frozen at.
    pub fn request_cancel(&self) -> u64 {
        self.progress.fetch_or(CANCEL_BIT, Ordering::AcqRel) & !CANCEL_BIT
    }

    pub fn is_cancelled(&self) -> bool {
        self.progress.load(Ordering::Acquire) & CANCEL_BIT != 0
    }

    /// Move progress from `from` to `to`. Fails once cancellation has been
    /// requested.
    fn advance(&self, from: u64, to: u64) -> bool {
        self.progress
            .compare_exchange(from, to, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn results(&self) -> Vec<IdResult> {
        lock(&self.results).clone()
    }

    pub fn is_finished(&self) -> bool {
        *lock(&self.finished)
    }

    pub fn snapshot(&self, max_progress: u64) -> Snapshot {
        // Read `finished` first: if it is set, the results and progress read
        // afterwards are final.
        let finished = self.is_finished();
        Snapshot {
            results: self.results(),
            progress: self.progress(),
            max_progress,
            finished,
        }
    }

    /// Block for up to `timeout`, returning early once the run finishes.
    /// Returns whether the run has finished.
    pub fn wait_finished(&self, timeout: Duration) -> bool {
        let guard = lock(&self.finished);
        match self.done.wait_timeout_while(guard, timeout, |finished| !*finished) {
            Ok((finished, _)) => *finished,
            Err(poisoned) => *poisoned.into_inner().0,
        }
    }

    fn mark_finished(&self) {
        *lock(&self.finished) = true;
        self.done.notify_all();
    }
}

/// Marks the run finished when dropped, including while unwinding from a
/// panicking generator.
struct FinishGuard<'a>(&'a SharedState);

impl Drop for FinishGuard<'_> {
    fn drop(&mut self) {
        self.0.mark_finished();
    }
}

/// A poisoned lock only means a reader panicked mid-clone; the data is still
/// a valid prefix.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ---------------------------------------------------------------------------
// run()
// ---------------------------------------------------------------------------

/// Enumerate the search space, publishing matches and progress into `state`.
///
/// This is the worker body. It returns when the space is exhausted or a
/// cancellation request is seen. `state` is marked finished on the way out,
/// whether `run` returns or unwinds.
pub(crate) fn run(opts: &EngineOptions, state: &SharedState) -> Results {
    let _finished = FinishGuard(state);
    let total = opts.space.max_progress();
    let start = Instant::now();

    log::debug!(
        "Engine: searching {:?}, {} seeds, {} TID / {} SID targets",
        opts.space,
        total,
        opts.tid_filter.values().len(),
        opts.sid_filter.values().len()
    );

    let mut index: u64 = 0;
    let mut published: u64 = 0;
    let mut cancelled = false;

    while index < total {
        if state.is_cancelled() {
            cancelled = true;
            break;
        }

        let point = opts.space.point(index);
        let pair = opts.generator.generate(point.seed);
        let next = (index + 1).min(opts.max_progress);

        // A point counts only if progress still moves. A cancellation that
        // lands while this point was evaluated discards it.
        let committed = if opts.tid_filter.accepts(pair.tid) && opts.sid_filter.accepts(pair.sid) {
            let mut results = lock(&state.results);
            let committed = state.advance(published, next);
            if committed {
                results.push(IdResult {
                    seed:  point.seed,
                    tid:   pair.tid,
                    sid:   pair.sid,
                    delay: point.delay,
                });
            }
            committed
        } else {
            state.advance(published, next)
        };

        if !committed {
            cancelled = true;
            break;
        }
        published = next;
        index += 1;
    }

    let duration = start.elapsed();
    let results = Results {
        results: state.results(),
        progress: state.progress(),
        max_progress: opts.max_progress,
        cancelled,
        stats: ScanStats::compute(index, duration),
    };

    if cancelled {
        log::trace!("Engine: cancelled after {index} of {total} seeds");
    }
    log::debug!(
        "Engine: finished with {} matches in {:.3}s",
        results.results.len(),
        duration.as_secs_f64()
    );

    results
}
