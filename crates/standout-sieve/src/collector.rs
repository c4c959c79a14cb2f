//! Observer that gathers filtered elements.

use crate::error::Result;
use crate::state::{FilterState, StreamState};
use crate::traits::FilterStream;

/// Which verdicts a [`Collector`] gathers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gather {
    Keepers,
    Discards,
    Both,
}

impl Gather {
    fn wants(self, verdict: FilterState) -> bool {
        match self {
            Gather::Keepers => verdict.is_kept(),
            Gather::Discards => verdict.is_discarded(),
            Gather::Both => true,
        }
    }
}

/// A [`FilterStream`] that clones elements as it is fed them.
///
/// Attach it as the observer of an elements filter to see which elements
/// the qualifier kept or discarded, in container order.
///
/// # Example
///
/// ```
/// use standout_sieve::{includes, predicate, Collector, ElementsFilterExt, FilterState};
///
/// let positive = includes(predicate(|n: &i32| *n > 0));
/// let mut collector = Collector::keepers();
///
/// let values = vec![-1, 2, -3, 4];
/// assert_eq!(positive.filter_with(&values, &mut collector), FilterState::Kept);
/// assert_eq!(collector.kept(), &[2, 4]);
/// ```
#[derive(Debug, Clone)]
pub struct Collector<T> {
    gather: Gather,
    limit: Option<usize>,
    kept: Vec<T>,
    discarded: Vec<T>,
}

impl<T: Clone> Collector<T> {
    /// Creates a collector for the given verdicts.
    pub fn new(gather: Gather) -> Self {
        Collector {
            gather,
            limit: None,
            kept: Vec::new(),
            discarded: Vec::new(),
        }
    }

    /// Gathers kept elements.
    pub fn keepers() -> Self {
        Self::new(Gather::Keepers)
    }

    /// Gathers discarded elements.
    pub fn discards() -> Self {
        Self::new(Gather::Discards)
    }

    /// Gathers every element, split by verdict.
    pub fn both() -> Self {
        Self::new(Gather::Both)
    }

    /// Stops gathering after `count` elements.
    ///
    /// Once full the collector stops asking for elements, so the engine
    /// may stop early if the quantifier is decided too.
    pub fn limit(mut self, count: usize) -> Self {
        self.limit = Some(count);
        self
    }

    /// Returns the kept elements gathered so far.
    pub fn kept(&self) -> &[T] {
        &self.kept
    }

    /// Returns the discarded elements gathered so far.
    pub fn discarded(&self) -> &[T] {
        &self.discarded
    }

    /// Returns the number of elements gathered.
    pub fn len(&self) -> usize {
        self.kept.len() + self.discarded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_kept(self) -> Vec<T> {
        self.kept
    }

    pub fn into_discarded(self) -> Vec<T> {
        self.discarded
    }

    /// Returns `(kept, discarded)`.
    pub fn into_parts(self) -> (Vec<T>, Vec<T>) {
        (self.kept, self.discarded)
    }

    fn is_full(&self) -> bool {
        self.limit.is_some_and(|limit| self.len() >= limit)
    }
}

impl<T: Clone> FilterStream<T> for Collector<T> {
    fn start(&mut self) -> Result<FilterState> {
        Ok(FilterState::Kept)
    }

    fn fed(&mut self, element: &T, verdict: FilterState) -> Result<StreamState> {
        if !self.is_full() && self.gather.wants(verdict) {
            match verdict {
                FilterState::Kept => self.kept.push(element.clone()),
                FilterState::Discarded => self.discarded.push(element.clone()),
            }
        }

        if self.is_full() {
            Ok(StreamState::End)
        } else {
            Ok(StreamState::Continue)
        }
    }

    fn end(&mut self, last: FilterState) -> Result<FilterState> {
        Ok(last)
    }
}
