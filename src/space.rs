/// Number of values the "AB" byte of a seed can take.
pub const AB_VALUES: u64 = 256;

/// Number of hours encoded in the "CD" byte of a seed.
pub const HOURS: u64 = 24;

/// Seeds enumerated per delay value in bounded mode.
pub const SEEDS_PER_DELAY: u64 = AB_VALUES * HOURS;

/// Size of the unbounded space: every 32-bit seed.
pub const FULL_SEED_SPACE: u64 = 1 << 32;

/// The set of seeds a search walks through.
///
/// A bounded search covers every `AB`/hour combination for each delay in
/// `[min_delay, max_delay)`. An unbounded search covers all 2^32 seeds and
/// never looks at delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSpace {
    Bounded { min_delay: u32, max_delay: u32 },
    Unbounded,
}

/// One enumerated point: the seed to feed the generator and the delay it
/// encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPoint {
    pub seed: u32,
    pub delay: u32,
}

impl SearchSpace {
    /// Number of points in this space, which is also the progress maximum.
    ///
    /// An inverted bounded range is empty rather than an error.
    pub fn max_progress(&self) -> u64 {
        match *self {
            Self::Bounded { min_delay, max_delay } => {
                SEEDS_PER_DELAY * u64::from(max_delay.saturating_sub(min_delay))
            }
            Self::Unbounded => FULL_SEED_SPACE,
        }
    }

    /// Map an enumeration index to its seed.
    ///
    /// Bounded order is delay-major, then `AB`, then hour. Indices at or past
    /// `max_progress()` are not meaningful.
    pub fn point(&self, index: u64) -> SeedPoint {
        match *self {
            Self::Bounded { min_delay, .. } => {
                let delay = min_delay.wrapping_add((index / SEEDS_PER_DELAY) as u32);
                let rem = index % SEEDS_PER_DELAY;
                let ab = (rem / HOURS) as u32;
                let hour = (rem % HOURS) as u32;
                SeedPoint {
                    seed: ((ab << 24) | (hour << 16)).wrapping_add(delay),
                    delay,
                }
            }
            Self::Unbounded => {
                let seed = index as u32;
                SeedPoint {
                    seed,
                    delay: seed & 0xFFFF,
                }
            }
        }
    }
}

impl Default for SearchSpace {
    fn default() -> Self {
        Self::Bounded {
            min_delay: 0,
            max_delay: 0,
        }
    }
}
