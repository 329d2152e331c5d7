//! # gen4ids
//!
//! Background search for generation 4 trainer ID / secret ID seeds.
//!
//! A search walks a space of initial seeds, derives a TID/SID pair from each
//! one through an [`IdGenerator`], and keeps the pairs that pass the TID and
//! SID filters. It runs on its own thread; the caller polls progress and
//! partial results, may cancel at any time, and is notified once when the run
//! ends.
//!
//! # Quick Start
//!
//! ```rust
//! let results = gen4ids::search()
//!     .tid_filter([44235])
//!     .bounded(600, 601)
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(results.results[0].seed, 600);
//! assert_eq!(results.results[0].sid, 8907);
//! assert_eq!(results.progress, 256 * 24);
//! ```
//!
//! # Background runs
//!
//! ```rust
//! use std::time::Duration;
//!
//! let handle = gen4ids::search()
//!     .sid_filter([0, 1, 2])
//!     .unbounded()
//!     .on_finished(|r| assert!(r.cancelled))
//!     .start()
//!     .unwrap();
//!
//! handle.cancel_search();
//! handle.watch(Duration::from_millis(10), |snap| {
//!     assert!(snap.progress <= snap.max_progress);
//! });
//! let results = handle.wait().unwrap();
//! assert!(results.progress < results.max_progress);
//! ```
//!
//! # Custom generators
//!
//! Any `Fn(u32) -> IdPair` closure is accepted:
//!
//! ```rust
//! use gen4ids::IdPair;
//!
//! let results = gen4ids::search()
//!     .generator(|seed: u32| IdPair::from_u32(seed))
//!     .tid_filter([600])
//!     .bounded(600, 601)
//!     .run()
//!     .unwrap();
//!
//! // every seed with delay 600 has TID 600 under this formula
//! assert_eq!(results.results.len(), 256 * 24);
//! ```

#![forbid(unsafe_code)]

pub mod engine;
pub mod space;

mod builder;
mod entry;
mod error;
mod handle;
mod params;
mod results;
mod rng;
mod settings;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::SearchBuilder;
pub use entry::{IdPair, IdResult};
pub use error::SearchError;
pub use handle::SearchHandle;
pub use params::{IdFilter, SearchParameters};
pub use results::{Results, ScanStats, Snapshot};
pub use rng::{mt_output, Gen4Generator};
pub use settings::Settings;
pub use space::SearchSpace;
pub use traits::IdGenerator;

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`SearchBuilder`] to configure and start a search.
///
/// # Example
///
/// ```rust
/// let handle = gen4ids::search()
///     .tid_filter([12345])
///     .bounded(0, 0)
///     .start()
///     .unwrap();
///
/// let results = handle.wait().unwrap();
/// assert_eq!(results.max_progress, 0);
/// assert!(results.results.is_empty());
/// ```
pub fn search() -> SearchBuilder {
    SearchBuilder::default()
}
