//! The three capabilities the engine is built from.
//!
//! - [`Filter`] judges one value.
//! - [`FilterStream`] consumes a session of per-element verdicts and turns
//!   them into a container verdict.
//! - [`Quantifier`] is an immutable policy that opens a fresh
//!   [`FilterStream`] session for every filtering call.

use std::sync::Arc;

use crate::error::Result;
use crate::state::{FilterState, StreamState};

/// Judges a single value.
///
/// Filters are immutable and shared freely between threads. `filter` is
/// total: it always answers. A filter that panics is contained by the
/// container-level caller and treated as [`FilterState::Discarded`].
///
/// # Example
///
/// ```
/// use standout_sieve::{Filter, FilterState};
///
/// struct Even;
///
/// impl Filter<i32> for Even {
///     fn filter(&self, value: &i32) -> FilterState {
///         FilterState::from(value % 2 == 0)
///     }
/// }
///
/// assert_eq!(Even.filter(&4), FilterState::Kept);
/// assert_eq!(Even.filter(&3), FilterState::Discarded);
/// ```
pub trait Filter<T: ?Sized>: Send + Sync {
    /// Returns the verdict on `value`.
    fn filter(&self, value: &T) -> FilterState;

    /// Returns the verdict on `value`, or the failure that prevented one.
    ///
    /// Container filters judge their elements through this method.
    /// Filters that wrap a container filter override it so a failure
    /// inside reaches the outermost container filter, which discards,
    /// instead of being read as a verdict and possibly inverted.
    fn try_filter(&self, value: &T) -> Result<FilterState> {
        Ok(self.filter(value))
    }
}

impl<T: ?Sized, F: Filter<T> + ?Sized> Filter<T> for &F {
    fn filter(&self, value: &T) -> FilterState {
        (**self).filter(value)
    }

    fn try_filter(&self, value: &T) -> Result<FilterState> {
        (**self).try_filter(value)
    }
}

impl<T: ?Sized, F: Filter<T> + ?Sized> Filter<T> for Box<F> {
    fn filter(&self, value: &T) -> FilterState {
        (**self).filter(value)
    }

    fn try_filter(&self, value: &T) -> Result<FilterState> {
        (**self).try_filter(value)
    }
}

impl<T: ?Sized, F: Filter<T> + ?Sized> Filter<T> for Arc<F> {
    fn filter(&self, value: &T) -> FilterState {
        (**self).filter(value)
    }

    fn try_filter(&self, value: &T) -> Result<FilterState> {
        (**self).try_filter(value)
    }
}

/// One consumer session over a stream of per-element verdicts.
///
/// The engine drives a session as:
///
/// ```text
/// start()  ->  fed(element, verdict) * n  ->  end(last)
/// ```
///
/// Once `fed` answers anything other than [`StreamState::Continue`] the
/// session is short-circuited and is not fed again, but `end` is still
/// called exactly once. Sessions are always wrapped in a
/// [`FilterPipe`](crate::FilterPipe), which enforces this.
pub trait FilterStream<T: ?Sized> {
    /// Opens the session and returns the tentative container verdict.
    fn start(&mut self) -> Result<FilterState>;

    /// Consumes one element and the qualifier's verdict on it.
    fn fed(&mut self, element: &T, verdict: FilterState) -> Result<StreamState>;

    /// Closes the session and returns the definitive container verdict.
    ///
    /// `last` is the most recent terminal verdict of the session, or the
    /// start state if there was none.
    fn end(&mut self, last: FilterState) -> Result<FilterState>;
}

impl<T: ?Sized, S: FilterStream<T> + ?Sized> FilterStream<T> for &mut S {
    fn start(&mut self) -> Result<FilterState> {
        (**self).start()
    }

    fn fed(&mut self, element: &T, verdict: FilterState) -> Result<StreamState> {
        (**self).fed(element, verdict)
    }

    fn end(&mut self, last: FilterState) -> Result<FilterState> {
        (**self).end(last)
    }
}

impl<T: ?Sized, S: FilterStream<T> + ?Sized> FilterStream<T> for Box<S> {
    fn start(&mut self) -> Result<FilterState> {
        (**self).start()
    }

    fn fed(&mut self, element: &T, verdict: FilterState) -> Result<StreamState> {
        (**self).fed(element, verdict)
    }

    fn end(&mut self, last: FilterState) -> Result<FilterState> {
        (**self).end(last)
    }
}

/// An aggregation policy over per-element verdicts.
///
/// A quantifier never changes after construction. Each filtering call asks
/// it for a new [`FilterStream`] session, so the same policy can serve any
/// number of concurrent calls.
pub trait Quantifier<T: ?Sized>: Send + Sync {
    /// Opens a fresh session for one filtering call.
    fn stream(&self) -> Box<dyn FilterStream<T> + '_>;

    /// Short name used in log events.
    fn name(&self) -> &'static str {
        "quantifier"
    }
}

impl<T: ?Sized, Q: Quantifier<T> + ?Sized> Quantifier<T> for &Q {
    fn stream(&self) -> Box<dyn FilterStream<T> + '_> {
        (**self).stream()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<T: ?Sized, Q: Quantifier<T> + ?Sized> Quantifier<T> for Box<Q> {
    fn stream(&self) -> Box<dyn FilterStream<T> + '_> {
        (**self).stream()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<T: ?Sized, Q: Quantifier<T> + ?Sized> Quantifier<T> for Arc<Q> {
    fn stream(&self) -> Box<dyn FilterStream<T> + '_> {
        (**self).stream()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
