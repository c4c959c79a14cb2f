//! Container length bounds.

use super::{report, ElementsFilter};
use crate::container::Container;
use crate::error::{FilterError, Result};
use crate::state::FilterState;
use crate::traits::FilterStream;

/// Keeps containers whose element count lies within inclusive bounds.
///
/// Lazy sequences are walked to count them, but never further than one
/// element past the upper bound.
///
/// # Example
///
/// ```
/// use standout_sieve::{ElementsFilterExt, LengthFilter};
///
/// let pair = LengthFilter::new(2, Some(2)).unwrap();
/// assert!(pair.is_kept(&[1, 2]));
/// assert!(!pair.is_kept(&[1, 2, 3]));
/// assert!(LengthFilter::non_empty().is_kept(&["x"]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthFilter {
    min: usize,
    max: Option<usize>,
}

impl LengthFilter {
    /// Creates the filter. `None` leaves the length unbounded above.
    ///
    /// Returns an error if `min` is greater than `max`.
    pub fn new(min: usize, max: Option<usize>) -> Result<Self> {
        match max {
            Some(max) if min > max => Err(FilterError::InvalidLengthBounds { min, max }),
            _ => Ok(LengthFilter { min, max }),
        }
    }

    /// Keeps containers with at least one element.
    pub const fn non_empty() -> Self {
        LengthFilter { min: 1, max: None }
    }

    /// Keeps containers with at least two elements.
    pub const fn more_than_one() -> Self {
        LengthFilter { min: 2, max: None }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> Option<usize> {
        self.max
    }

    fn contains(&self, length: usize) -> bool {
        match self.max {
            Some(max) => (self.min..=max).contains(&length),
            None => length >= self.min,
        }
    }
}

fn count<T>(container: &Container<'_, T>, max: Option<usize>) -> usize {
    match (container, max) {
        (Container::Sequence(replay), Some(max)) => {
            replay.iter().take(max.saturating_add(1)).count()
        }
        _ => container.len().unwrap_or(0),
    }
}

impl<T> ElementsFilter<T> for LengthFilter {
    fn try_filter_observed(
        &self,
        container: Container<'_, T>,
        observer: Option<&mut dyn FilterStream<T>>,
    ) -> Result<FilterState> {
        if container.is_absent() {
            return Ok(FilterState::Discarded);
        }
        let verdict = FilterState::from(self.contains(count(&container, self.max)));
        report(&container, observer, verdict)?;
        Ok(verdict)
    }

    fn name(&self) -> &'static str {
        "length"
    }
}
