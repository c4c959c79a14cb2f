//! Duplicate detection.

use super::engine::{by_element, fused};
use super::{ElementsFilter, Traversal};
use crate::container::Container;
use crate::error::Result;
use crate::quantifier::KeptAllElements;
use crate::state::FilterState;
use crate::traits::FilterStream;

/// Keeps containers in which no element equals an earlier one.
///
/// First occurrences are kept and every repeat is discarded, so an
/// observer sees exactly which elements were duplicates. Two `None`s are
/// duplicates of each other.
///
/// # Example
///
/// ```
/// use standout_sieve::{ElementsFilterExt, NoDuplicates};
///
/// assert!(NoDuplicates::new().is_kept(&[1, 2, 3]));
/// assert!(!NoDuplicates::new().is_kept(&[1, 2, 1]));
/// assert_eq!(NoDuplicates::new().discards(&["a", "b", "a", "a"]), vec!["a", "a"]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoDuplicates {
    traversal: Traversal,
}

impl NoDuplicates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }
}

impl<T: PartialEq> ElementsFilter<T> for NoDuplicates {
    fn try_filter_observed(
        &self,
        container: Container<'_, T>,
        observer: Option<&mut dyn FilterStream<T>>,
    ) -> Result<FilterState> {
        if container.is_absent() {
            return Ok(FilterState::Discarded);
        }
        let mut seen: Vec<&T> = Vec::new();
        fused(
            "no_duplicates",
            &container,
            &KeptAllElements,
            observer,
            self.traversal,
            by_element,
            |_, element| {
                if seen.contains(&element) {
                    return Ok(FilterState::Discarded);
                }
                seen.push(element);
                Ok(FilterState::Kept)
            },
        )
    }

    fn name(&self) -> &'static str {
        "no_duplicates"
    }
}
