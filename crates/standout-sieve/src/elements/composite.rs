//! Boolean combinators over container filters.
//!
//! Each child judges the whole container on its own; verdicts are combined
//! afterwards with the same tables as the value-level combinators. An
//! observer attached to a combinator is fed every element with the
//! combined verdict.
//!
//! Children run through [`ElementsFilter::try_filter_observed`]: a child
//! that fails fails the combinator, and the outermost filter discards.

use super::{report, ElementsFilter};
use crate::container::Container;
use crate::error::Result;
use crate::state::FilterState;
use crate::traits::{Filter, FilterStream};

type Child<T> = Box<dyn ElementsFilter<T>>;

macro_rules! elements_combinator {
    ($(#[$doc:meta])* $name:ident, $label:literal, $combine:expr) => {
        $(#[$doc])*
        pub struct $name<T> {
            children: Vec<Child<T>>,
        }

        impl<T> $name<T> {
            /// Creates a combinator with no children.
            pub fn new() -> Self {
                $name {
                    children: Vec::new(),
                }
            }

            /// Adds a child filter.
            pub fn with(mut self, filter: impl ElementsFilter<T> + 'static) -> Self {
                self.children.push(Box::new(filter));
                self
            }

            /// Adds a child filter in place.
            pub fn push(&mut self, filter: impl ElementsFilter<T> + 'static) {
                self.children.push(Box::new(filter));
            }

            pub fn len(&self) -> usize {
                self.children.len()
            }

            pub fn is_empty(&self) -> bool {
                self.children.is_empty()
            }
        }

        impl<T> Default for $name<T> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<T> FromIterator<Child<T>> for $name<T> {
            fn from_iter<I: IntoIterator<Item = Child<T>>>(iter: I) -> Self {
                $name {
                    children: iter.into_iter().collect(),
                }
            }
        }

        impl<T> ElementsFilter<T> for $name<T> {
            fn try_filter_observed(
                &self,
                container: Container<'_, T>,
                observer: Option<&mut dyn FilterStream<T>>,
            ) -> Result<FilterState> {
                if container.is_absent() {
                    return Ok(FilterState::Discarded);
                }
                let combine: fn(&[Child<T>], &Container<'_, T>) -> Result<FilterState> = $combine;
                let verdict = combine(&self.children, &container)?;
                report(&container, observer, verdict)?;
                Ok(verdict)
            }

            fn name(&self) -> &'static str {
                $label
            }
        }

        impl<T> std::fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({} children)", stringify!($name), self.children.len())
            }
        }
    };
}

elements_combinator!(
    /// Keeps a container iff every child keeps it.
    AndElements,
    "and_elements",
    |children, container| {
        for child in children {
            if child.try_filter_observed(container.clone(), None)?.is_discarded() {
                return Ok(FilterState::Discarded);
            }
        }
        Ok(FilterState::Kept)
    }
);

elements_combinator!(
    /// Keeps a container iff at least one child keeps it.
    ///
    /// With no children every present container is kept.
    OrElements,
    "or_elements",
    |children, container| {
        if children.is_empty() {
            return Ok(FilterState::Kept);
        }
        for child in children {
            if child.try_filter_observed(container.clone(), None)?.is_kept() {
                return Ok(FilterState::Kept);
            }
        }
        Ok(FilterState::Discarded)
    }
);

elements_combinator!(
    /// Keeps a container iff exactly one child keeps it.
    ///
    /// Every child is consulted. With no children every present container
    /// is kept.
    XorElements,
    "xor_elements",
    |children, container| {
        if children.is_empty() {
            return Ok(FilterState::Kept);
        }
        let mut kept = 0;
        for child in children {
            if child.try_filter_observed(container.clone(), None)?.is_kept() {
                kept += 1;
            }
        }
        Ok(FilterState::from(kept == 1))
    }
);

/// Inverts a container filter.
///
/// Only a verdict the child actually reached is inverted. An absent
/// container, or a child that panics or fails, discards.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotElements<F> {
    inner: F,
}

impl<F> NotElements<F> {
    pub fn new(inner: F) -> Self {
        NotElements { inner }
    }
}

impl<T, F: ElementsFilter<T>> ElementsFilter<T> for NotElements<F> {
    fn try_filter_observed(
        &self,
        container: Container<'_, T>,
        observer: Option<&mut dyn FilterStream<T>>,
    ) -> Result<FilterState> {
        if container.is_absent() {
            return Ok(FilterState::Discarded);
        }
        let verdict = self
            .inner
            .try_filter_observed(container.clone(), None)?
            .negate();
        report(&container, observer, verdict)?;
        Ok(verdict)
    }

    fn name(&self) -> &'static str {
        "not_elements"
    }
}

// ============================================================================
// Nesting
// ============================================================================

/// Uses a container filter as a value filter on containers.
///
/// Lets a container filter qualify elements that are themselves
/// containers. Inside an enclosing container filter a failure of the inner
/// filter discards the outer container, even under [`Not`](crate::Not).
///
/// # Example
///
/// ```
/// use standout_sieve::{every, includes, predicate, ElementsFilterExt, Nested};
///
/// let has_negative = Nested::new(includes(predicate(|n: &i32| *n < 0)));
/// let rows_with_negatives = every(has_negative);
///
/// assert!(rows_with_negatives.is_kept(&[vec![1, -1], vec![-2]]));
/// assert!(!rows_with_negatives.is_kept(&[vec![1, -1], vec![2]]));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Nested<F> {
    inner: F,
}

impl<F> Nested<F> {
    pub fn new(inner: F) -> Self {
        Nested { inner }
    }
}

impl<U, F: ElementsFilter<U>> Filter<Vec<U>> for Nested<F> {
    fn filter(&self, value: &Vec<U>) -> FilterState {
        self.inner.filter_observed(Container::Array(value.as_slice()), None)
    }

    fn try_filter(&self, value: &Vec<U>) -> Result<FilterState> {
        self.inner.try_filter_observed(Container::Array(value.as_slice()), None)
    }
}

impl<U, F: ElementsFilter<U>> Filter<[U]> for Nested<F> {
    fn filter(&self, value: &[U]) -> FilterState {
        self.inner.filter_observed(Container::Array(value), None)
    }

    fn try_filter(&self, value: &[U]) -> Result<FilterState> {
        self.inner.try_filter_observed(Container::Array(value), None)
    }
}
