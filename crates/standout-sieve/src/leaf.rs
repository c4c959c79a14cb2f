//! Leaf filters.
//!
//! The value-level building blocks every container filter is assembled
//! from. Rust has no null, so "null" means whatever [`Nullable::is_null`]
//! says: `None` for options, never for plain values.

use regex::Regex;

use crate::error::Result;
use crate::state::FilterState;
use crate::traits::Filter;

/// Keeps every value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeepAll;

impl<T: ?Sized> Filter<T> for KeepAll {
    fn filter(&self, _value: &T) -> FilterState {
        FilterState::Kept
    }
}

/// Discards every value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscardAll;

impl<T: ?Sized> Filter<T> for DiscardAll {
    fn filter(&self, _value: &T) -> FilterState {
        FilterState::Discarded
    }
}

// ============================================================================
// Nulls
// ============================================================================

/// A value that may stand for "nothing".
pub trait Nullable {
    /// Returns `true` if the value is the null value of its type.
    fn is_null(&self) -> bool;
}

impl<U> Nullable for Option<U> {
    fn is_null(&self) -> bool {
        self.is_none()
    }
}

impl<T: Nullable + ?Sized> Nullable for &T {
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<T: Nullable + ?Sized> Nullable for Box<T> {
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

macro_rules! never_null {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Nullable for $ty {
                fn is_null(&self) -> bool {
                    false
                }
            }
        )*
    };
}

never_null!(
    bool, char, str, String, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
    f32, f64,
);

impl<U> Nullable for [U] {
    fn is_null(&self) -> bool {
        false
    }
}

impl<U> Nullable for Vec<U> {
    fn is_null(&self) -> bool {
        false
    }
}

/// Keeps every value that is not null.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotNull;

impl<T: Nullable + ?Sized> Filter<T> for NotNull {
    fn filter(&self, value: &T) -> FilterState {
        FilterState::from(!value.is_null())
    }
}

// ============================================================================
// Membership and predicates
// ============================================================================

/// Keeps values equal to one of a fixed list of members.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberOf<M> {
    members: Vec<M>,
}

impl<M: PartialEq> MemberOf<M> {
    pub fn new(members: impl IntoIterator<Item = M>) -> Self {
        MemberOf {
            members: members.into_iter().collect(),
        }
    }

    pub fn members(&self) -> &[M] {
        &self.members
    }
}

impl<M: PartialEq + Send + Sync> Filter<M> for MemberOf<M> {
    fn filter(&self, value: &M) -> FilterState {
        FilterState::from(self.members.contains(value))
    }
}

/// Adapts a boolean closure into a [`Filter`].
///
/// Built with [`predicate`].
#[derive(Clone, Copy)]
pub struct Predicate<F> {
    test: F,
}

/// Wraps a closure as a filter: `true` keeps, `false` discards.
///
/// # Example
///
/// ```
/// use standout_sieve::{predicate, Filter, FilterState};
///
/// let negative = predicate(|n: &i32| *n < 0);
/// assert_eq!(negative.filter(&-3), FilterState::Kept);
/// assert_eq!(negative.filter(&3), FilterState::Discarded);
/// ```
pub fn predicate<F>(test: F) -> Predicate<F> {
    Predicate { test }
}

impl<T: ?Sized, F> Filter<T> for Predicate<F>
where
    F: Fn(&T) -> bool + Send + Sync,
{
    fn filter(&self, value: &T) -> FilterState {
        FilterState::from((self.test)(value))
    }
}

impl<F> std::fmt::Debug for Predicate<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// Keeps strings the pattern matches anywhere.
///
/// Anchor the pattern (`^...$`) to require a full match.
#[derive(Debug, Clone)]
pub struct Matches {
    pattern: Regex,
}

impl Matches {
    /// Compiles the pattern.
    ///
    /// Returns [`FilterError::InvalidRegex`](crate::FilterError::InvalidRegex)
    /// if it does not compile.
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Matches {
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Filter<str> for Matches {
    fn filter(&self, value: &str) -> FilterState {
        FilterState::from(self.pattern.is_match(value))
    }
}

impl Filter<String> for Matches {
    fn filter(&self, value: &String) -> FilterState {
        FilterState::from(self.pattern.is_match(value))
    }
}

impl Filter<&str> for Matches {
    fn filter(&self, value: &&str) -> FilterState {
        FilterState::from(self.pattern.is_match(value))
    }
}
