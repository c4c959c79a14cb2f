//! Boolean combinators over value filters.
//!
//! | Combinator | Keeps when | Stops at | No children |
//! |------------|------------|----------|-------------|
//! | [`And`] | every child keeps | first discard | keeps |
//! | [`Or`] | some child keeps | first keep | keeps |
//! | [`Xor`] | exactly one child keeps | never | keeps |
//! | [`Not`] | the child discards | - | - |
//!
//! Combinators are filters themselves, so they nest freely.

use crate::error::Result;
use crate::state::FilterState;
use crate::traits::Filter;

type Child<T> = Box<dyn Filter<T>>;

macro_rules! combinator {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        pub struct $name<T: ?Sized> {
            children: Vec<Child<T>>,
        }

        impl<T: ?Sized> $name<T> {
            /// Creates a combinator with no children.
            pub fn new() -> Self {
                $name {
                    children: Vec::new(),
                }
            }

            /// Adds a child filter.
            pub fn with(mut self, filter: impl Filter<T> + 'static) -> Self {
                self.children.push(Box::new(filter));
                self
            }

            /// Adds a child filter in place.
            pub fn push(&mut self, filter: impl Filter<T> + 'static) {
                self.children.push(Box::new(filter));
            }

            pub fn len(&self) -> usize {
                self.children.len()
            }

            pub fn is_empty(&self) -> bool {
                self.children.is_empty()
            }
        }

        impl<T: ?Sized> Default for $name<T> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<T: ?Sized> FromIterator<Child<T>> for $name<T> {
            fn from_iter<I: IntoIterator<Item = Child<T>>>(iter: I) -> Self {
                $name {
                    children: iter.into_iter().collect(),
                }
            }
        }

        impl<T: ?Sized> std::fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({} children)", stringify!($name), self.children.len())
            }
        }
    };
}

combinator!(
    /// Keeps a value iff every child keeps it.
    And
);

combinator!(
    /// Keeps a value iff at least one child keeps it.
    ///
    /// With no children every value is kept.
    Or
);

combinator!(
    /// Keeps a value iff exactly one child keeps it.
    ///
    /// Every child is consulted. With no children every value is kept.
    Xor
);

impl<T: ?Sized> Filter<T> for And<T> {
    fn filter(&self, value: &T) -> FilterState {
        self.try_filter(value).unwrap_or(FilterState::Discarded)
    }

    fn try_filter(&self, value: &T) -> Result<FilterState> {
        for child in &self.children {
            if child.try_filter(value)?.is_discarded() {
                return Ok(FilterState::Discarded);
            }
        }
        Ok(FilterState::Kept)
    }
}

impl<T: ?Sized> Filter<T> for Or<T> {
    fn filter(&self, value: &T) -> FilterState {
        self.try_filter(value).unwrap_or(FilterState::Discarded)
    }

    fn try_filter(&self, value: &T) -> Result<FilterState> {
        if self.children.is_empty() {
            return Ok(FilterState::Kept);
        }
        for child in &self.children {
            if child.try_filter(value)?.is_kept() {
                return Ok(FilterState::Kept);
            }
        }
        Ok(FilterState::Discarded)
    }
}

impl<T: ?Sized> Filter<T> for Xor<T> {
    fn filter(&self, value: &T) -> FilterState {
        self.try_filter(value).unwrap_or(FilterState::Discarded)
    }

    fn try_filter(&self, value: &T) -> Result<FilterState> {
        if self.children.is_empty() {
            return Ok(FilterState::Kept);
        }
        let mut kept = 0;
        for child in &self.children {
            if child.try_filter(value)?.is_kept() {
                kept += 1;
            }
        }
        Ok(FilterState::from(kept == 1))
    }
}

/// Inverts a filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Not<F> {
    inner: F,
}

impl<F> Not<F> {
    pub fn new(inner: F) -> Self {
        Not { inner }
    }

    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<T: ?Sized, F: Filter<T>> Filter<T> for Not<F> {
    fn filter(&self, value: &T) -> FilterState {
        self.try_filter(value).unwrap_or(FilterState::Discarded)
    }

    /// A failed child stays a failure; it is never inverted into a keep.
    fn try_filter(&self, value: &T) -> Result<FilterState> {
        self.inner.try_filter(value).map(FilterState::negate)
    }
}
