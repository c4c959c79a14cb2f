//! Container-level filters.
//!
//! An [`ElementsFilter`] judges a whole container from the verdicts of its
//! elements. Every call is fail-closed: an absent container, a panicking
//! qualifier or iterator, and a stream error all turn into
//! [`FilterState::Discarded`] instead of reaching the caller.
//!
//! Only the outermost call is the boundary. Composites and nested filters
//! run their children through the fallible entry points, so a failure
//! deep inside discards the whole container and is never inverted.
//!
//! Panics are only caught when the build unwinds on panic; with
//! `panic = "abort"` a panicking qualifier aborts the process as usual.

mod all_elements;
mod composite;
mod engine;
mod indices;
mod length;
mod no_duplicates;
mod strings;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::debug;

use crate::collector::Collector;
use crate::container::Container;
use crate::error::{FilterError, Result};
use crate::pipe::FilterPipe;
use crate::state::FilterState;
use crate::traits::FilterStream;

pub use all_elements::{
    every, excludes, excludes_members, includes, includes_members, includes_only_members,
    no_nulls, AllElementsFilter,
};
pub use composite::{AndElements, Nested, NotElements, OrElements, XorElements};
pub use indices::{excludes_indices, includes_indices, includes_only_indices, AllIndicesFilter};
pub use length::LengthFilter;
pub use no_duplicates::NoDuplicates;
pub use strings::StringElementsFilter;

/// How far the engine walks when an observer is attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Traversal {
    /// Walk until the quantifier and the observer are both decided.
    #[default]
    AllConsumers,
    /// Walk until the quantifier is decided; the observer sees a prefix.
    QuantifierOnly,
}

/// Judges a whole container.
///
/// This is the object-safe core; most callers use the methods of
/// [`ElementsFilterExt`], which every elements filter gets for free.
pub trait ElementsFilter<T>: Send + Sync {
    /// Returns the container verdict, or the failure that prevented one.
    ///
    /// Feeds every judged element and its verdict to `observer` if one is
    /// given. An absent container answers `Ok(Discarded)` without running
    /// anything. Errors are returned and panics unwind, so a filter
    /// wrapping this one can hand them on to the outermost call.
    fn try_filter_observed(
        &self,
        container: Container<'_, T>,
        observer: Option<&mut dyn FilterStream<T>>,
    ) -> Result<FilterState>;

    /// Returns the container verdict, feeding every judged element and its
    /// verdict to `observer` if one is given.
    ///
    /// Never panics and never fails: any runtime failure discards the
    /// container.
    fn filter_observed(
        &self,
        container: Container<'_, T>,
        observer: Option<&mut dyn FilterStream<T>>,
    ) -> FilterState {
        fail_closed(self.name(), &container, || {
            self.try_filter_observed(container.clone(), observer)
        })
    }

    /// Short name used in log events.
    fn name(&self) -> &'static str {
        "elements"
    }
}

impl<T, F: ElementsFilter<T> + ?Sized> ElementsFilter<T> for &F {
    fn try_filter_observed(
        &self,
        container: Container<'_, T>,
        observer: Option<&mut dyn FilterStream<T>>,
    ) -> Result<FilterState> {
        (**self).try_filter_observed(container, observer)
    }

    fn filter_observed(
        &self,
        container: Container<'_, T>,
        observer: Option<&mut dyn FilterStream<T>>,
    ) -> FilterState {
        (**self).filter_observed(container, observer)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<T, F: ElementsFilter<T> + ?Sized> ElementsFilter<T> for Box<F> {
    fn try_filter_observed(
        &self,
        container: Container<'_, T>,
        observer: Option<&mut dyn FilterStream<T>>,
    ) -> Result<FilterState> {
        (**self).try_filter_observed(container, observer)
    }

    fn filter_observed(
        &self,
        container: Container<'_, T>,
        observer: Option<&mut dyn FilterStream<T>>,
    ) -> FilterState {
        (**self).filter_observed(container, observer)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<T, F: ElementsFilter<T> + ?Sized> ElementsFilter<T> for Arc<F> {
    fn try_filter_observed(
        &self,
        container: Container<'_, T>,
        observer: Option<&mut dyn FilterStream<T>>,
    ) -> Result<FilterState> {
        (**self).try_filter_observed(container, observer)
    }

    fn filter_observed(
        &self,
        container: Container<'_, T>,
        observer: Option<&mut dyn FilterStream<T>>,
    ) -> FilterState {
        (**self).filter_observed(container, observer)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Convenience methods for every [`ElementsFilter`].
pub trait ElementsFilterExt<T>: ElementsFilter<T> {
    /// Returns the verdict on `container`.
    fn filter<'a, C>(&self, container: C) -> FilterState
    where
        T: 'a,
        C: Into<Container<'a, T>>,
    {
        self.filter_observed(container.into(), None)
    }

    /// Returns the verdict on `container`, feeding `observer` along the way.
    fn filter_with<'a, C, S>(&self, container: C, observer: &mut S) -> FilterState
    where
        T: 'a,
        C: Into<Container<'a, T>>,
        S: FilterStream<T>,
    {
        self.filter_observed(container.into(), Some(observer))
    }

    /// Returns `true` if `container` is kept.
    fn is_kept<'a, C>(&self, container: C) -> bool
    where
        T: 'a,
        C: Into<Container<'a, T>>,
    {
        self.filter(container).is_kept()
    }

    /// Returns clones of the elements the qualifier kept.
    ///
    /// The container is walked to the end, whatever the verdict.
    fn keepers<'a, C>(&self, container: C) -> Vec<T>
    where
        T: Clone + 'a,
        C: Into<Container<'a, T>>,
    {
        let mut collector = Collector::keepers();
        self.filter_with(container, &mut collector);
        collector.into_kept()
    }

    /// Returns clones of the elements the qualifier discarded.
    fn discards<'a, C>(&self, container: C) -> Vec<T>
    where
        T: Clone + 'a,
        C: Into<Container<'a, T>>,
    {
        let mut collector = Collector::discards();
        self.filter_with(container, &mut collector);
        collector.into_discarded()
    }
}

impl<T, F: ElementsFilter<T> + ?Sized> ElementsFilterExt<T> for F {}

// ============================================================================
// Fail-closed boundary
// ============================================================================

/// Runs one filtering call, mapping every failure to a discard.
pub(crate) fn fail_closed<T>(
    name: &'static str,
    container: &Container<'_, T>,
    run: impl FnOnce() -> Result<FilterState>,
) -> FilterState {
    if container.is_absent() {
        return FilterState::Discarded;
    }

    let error = match panic::catch_unwind(AssertUnwindSafe(run)) {
        Ok(Ok(state)) => return state,
        Ok(Err(error)) => error,
        Err(payload) => FilterError::Panicked(panic_message(payload.as_ref())),
    };

    debug!(
        filter = name,
        shape = container.shape(),
        error = %error,
        "filter failed closed"
    );
    FilterState::Discarded
}

/// Feeds every element to `observer` with the same container verdict.
///
/// Used by filters that decide a container as a whole rather than element
/// by element.
pub(crate) fn report<T>(
    container: &Container<'_, T>,
    observer: Option<&mut dyn FilterStream<T>>,
    verdict: FilterState,
) -> Result<()> {
    let Some(observer) = observer else {
        return Ok(());
    };

    let mut pipe = FilterPipe::<T, _>::new(observer);
    let mut observed = pipe.start()?;
    for element in container.elements() {
        if let Some(decided) = pipe.fed(element, verdict)? {
            observed = decided;
            break;
        }
    }
    pipe.end(observed)?;
    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
