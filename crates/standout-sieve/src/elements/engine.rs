//! The fused per-element loop shared by every streaming elements filter.

use tracing::trace;

use super::Traversal;
use crate::container::Container;
use crate::error::Result;
use crate::pipe::FilterPipe;
use crate::state::FilterState;
use crate::traits::{FilterStream, Quantifier};

/// Feeds the quantifier the element itself.
pub(crate) fn by_element<'x, T>(_index: &'x usize, element: &'x T) -> &'x T {
    element
}

/// Feeds the quantifier the element's position.
pub(crate) fn by_index<'x, T>(index: &'x usize, _element: &'x T) -> &'x usize {
    index
}

/// Walks the container once, feeding every verdict to the quantifier and
/// the observer.
///
/// `judge` decides each element. `key` picks what the quantifier is fed
/// (the element or its index); the observer always gets the element. The
/// walk stops once the quantifier is short-circuited and, under
/// [`Traversal::AllConsumers`], the observer too. Both sessions are ended
/// exactly once, and the quantifier's answer is the container verdict.
///
/// A failing `judge` or stream ends the call with its error.
pub(crate) fn fused<'a, T, K: ?Sized>(
    name: &'static str,
    container: &Container<'a, T>,
    quantifier: &dyn Quantifier<K>,
    observer: Option<&mut dyn FilterStream<T>>,
    traversal: Traversal,
    key: for<'x> fn(&'x usize, &'x T) -> &'x K,
    mut judge: impl FnMut(usize, &'a T) -> Result<FilterState>,
) -> Result<FilterState> {
    let mut policy = FilterPipe::<K, _>::new(quantifier.stream());
    let mut state = policy.start()?;

    let mut observer: Option<FilterPipe<T, _>> = observer.map(FilterPipe::new);
    let mut observed = match observer.as_mut() {
        Some(pipe) => pipe.start()?,
        None => FilterState::Kept,
    };

    for (index, element) in container.elements().enumerate() {
        let verdict = judge(index, element)?;

        if !policy.is_short_circuited() {
            if let Some(decided) = policy.fed(key(&index, element), verdict)? {
                state = decided;
            }
        }

        if let Some(pipe) = observer.as_mut() {
            if !pipe.is_short_circuited() {
                if let Some(decided) = pipe.fed(element, verdict)? {
                    observed = decided;
                }
            }
        }

        let observer_done = match observer.as_ref() {
            Some(pipe) => pipe.is_short_circuited() || traversal == Traversal::QuantifierOnly,
            None => true,
        };
        if policy.is_short_circuited() && observer_done {
            trace!(
                filter = name,
                quantifier = quantifier.name(),
                index,
                observed = observer.is_some(),
                "stopped early"
            );
            break;
        }
    }

    let verdict = policy.end(state)?;
    if let Some(pipe) = observer.as_mut() {
        pipe.end(observed)?;
    }
    Ok(verdict)
}
