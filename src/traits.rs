use crate::entry::IdPair;

/// Maps an initial seed to the trainer ID / secret ID pair the game would
/// assign from it.
///
/// Implement this to search with a different ID formula. The engine calls it
/// once per enumerated seed, on the worker thread.
///
/// # Purity
///
/// `generate` must be a pure function of `seed`. Result order and content are
/// only reproducible across runs if the generator is.
///
/// # Thread Safety
///
/// `Send + Sync` are required: the generator is moved into the worker thread
/// and may be shared with the caller.
///
/// # Example
///
/// ```rust
/// use gen4ids::{IdGenerator, IdPair};
///
/// struct Identity;
///
/// impl IdGenerator for Identity {
///     fn generate(&self, seed: u32) -> IdPair {
///         IdPair::from_u32(seed)
///     }
/// }
///
/// assert_eq!(Identity.generate(0x0001_0002), IdPair { tid: 2, sid: 1 });
/// ```
pub trait IdGenerator: Send + Sync {
    /// Derive the ID pair for `seed`.
    fn generate(&self, seed: u32) -> IdPair;
}

/// Any `Fn(u32) -> IdPair` closure is a generator.
impl<F> IdGenerator for F
where
    F: Fn(u32) -> IdPair + Send + Sync,
{
    fn generate(&self, seed: u32) -> IdPair {
        self(seed)
    }
}
