use crate::error::SearchError;
use crate::space::SearchSpace;

/// A set of target IDs. An empty filter accepts every ID.
///
/// The values are kept in the order they were given. Lookups go through a
/// sorted copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdFilter {
    values: Vec<u16>,
    sorted: Vec<u16>,
}

impl IdFilter {
    pub fn new(values: impl IntoIterator<Item = u16>) -> Self {
        let values: Vec<u16> = values.into_iter().collect();
        let mut sorted = values.clone();
        sorted.sort_unstable();
        sorted.dedup();
        Self { values, sorted }
    }

    /// Parse one ID per line.
    ///
    /// Blank lines are skipped. A line that is not a valid `u16` counts as 0,
    /// the same fallback a numeric text box applies.
    pub fn parse(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(|line| line.parse::<u16>().unwrap_or(0)),
        )
    }

    /// `true` for the wildcard filter.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The IDs in the order they were given.
    pub fn values(&self) -> &[u16] {
        &self.values
    }

    pub fn accepts(&self, id: u16) -> bool {
        self.sorted.is_empty() || self.sorted.binary_search(&id).is_ok()
    }
}

impl FromIterator<u16> for IdFilter {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Everything a search needs besides the ID formula.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParameters {
    pub tid_filter: IdFilter,
    pub sid_filter: IdFilter,
    pub space: SearchSpace,
}

impl SearchParameters {
    /// Build parameters from the raw text a user typed.
    ///
    /// Delay fields that are not valid numbers count as 0. With `infinite`
    /// set the delays are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidDelayRange`] for a bounded search whose
    /// minimum delay is above its maximum.
    pub fn from_text(
        tid: &str,
        sid: &str,
        min_delay: &str,
        max_delay: &str,
        infinite: bool,
    ) -> Result<Self, SearchError> {
        let space = if infinite {
            SearchSpace::Unbounded
        } else {
            let min = parse_delay(min_delay);
            let max = parse_delay(max_delay);
            if min > max {
                return Err(SearchError::InvalidDelayRange { min, max });
            }
            SearchSpace::Bounded {
                min_delay: min,
                max_delay: max,
            }
        };

        Ok(Self {
            tid_filter: IdFilter::parse(tid),
            sid_filter: IdFilter::parse(sid),
            space,
        })
    }

    pub fn max_progress(&self) -> u64 {
        self.space.max_progress()
    }
}

fn parse_delay(text: &str) -> u32 {
    text.trim().parse().unwrap_or(0)
}
