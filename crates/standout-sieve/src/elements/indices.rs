//! Position-aware container filters.

use super::engine::{by_index, fused};
use super::{ElementsFilter, Traversal};
use crate::container::Container;
use crate::error::Result;
use crate::leaf::{KeepAll, MemberOf, NotNull, Nullable};
use crate::quantifier::{KeepAllStream, KeptAllElements, KeptAllMembers, KeptNoMembers};
use crate::state::FilterState;
use crate::traits::{Filter, FilterStream, Quantifier};

/// Judges every element by its position and its value, folding the
/// verdicts with a quantifier that is fed positions.
///
/// A position the index qualifier discards is discarded without looking
/// at the element. The observer is fed the elements, not their positions.
///
/// # Example
///
/// ```
/// use standout_sieve::{includes_indices, ElementsFilterExt};
///
/// let second_and_fourth = includes_indices([1, 3]).unwrap();
/// assert!(second_and_fourth.is_kept(&[Some("a"), Some("b"), Some("c"), Some("d")]));
/// assert!(!second_and_fourth.is_kept(&[Some("a"), None, Some("c"), Some("d")]));
/// assert!(!second_and_fourth.is_kept(&[Some("a"), Some("b")]));
/// ```
pub struct AllIndicesFilter<T> {
    name: &'static str,
    index_qualifier: Box<dyn Filter<usize>>,
    element_qualifier: Box<dyn Filter<T>>,
    quantifier: Box<dyn Quantifier<usize>>,
    traversal: Traversal,
}

impl<T> AllIndicesFilter<T> {
    /// Creates a filter that keeps every container.
    pub fn new(
        index_qualifier: impl Filter<usize> + 'static,
        element_qualifier: impl Filter<T> + 'static,
    ) -> Self {
        AllIndicesFilter {
            name: "all_indices",
            index_qualifier: Box::new(index_qualifier),
            element_qualifier: Box::new(element_qualifier),
            quantifier: Box::new(KeepAllStream),
            traversal: Traversal::default(),
        }
    }

    /// Sets the quantifier, which is fed element positions.
    pub fn quantifier(mut self, quantifier: impl Quantifier<usize> + 'static) -> Self {
        self.quantifier = Box::new(quantifier);
        self
    }

    pub fn traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }

    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Returns the verdict on one element at `index`.
    pub fn qualify(&self, index: usize, element: &T) -> FilterState {
        self.judge(index, element).unwrap_or(FilterState::Discarded)
    }

    fn judge(&self, index: usize, element: &T) -> Result<FilterState> {
        if self.index_qualifier.try_filter(&index)?.is_discarded() {
            return Ok(FilterState::Discarded);
        }
        self.element_qualifier.try_filter(element)
    }
}

impl<T> ElementsFilter<T> for AllIndicesFilter<T> {
    fn try_filter_observed(
        &self,
        container: Container<'_, T>,
        observer: Option<&mut dyn FilterStream<T>>,
    ) -> Result<FilterState> {
        if container.is_absent() {
            return Ok(FilterState::Discarded);
        }
        fused(
            self.name,
            &container,
            &*self.quantifier,
            observer,
            self.traversal,
            by_index,
            |index, element| self.judge(index, element),
        )
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> std::fmt::Debug for AllIndicesFilter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllIndicesFilter")
            .field("name", &self.name)
            .field("quantifier", &self.quantifier.name())
            .field("traversal", &self.traversal)
            .finish()
    }
}

/// Keeps containers with a non-null element at every listed index.
///
/// Returns an error if the list names an index twice.
pub fn includes_indices<T: Nullable>(
    indices: impl IntoIterator<Item = usize>,
) -> Result<AllIndicesFilter<T>> {
    let policy = KeptAllMembers::new(indices)?;
    let listed = MemberOf::new(policy.members().iter().copied());
    Ok(AllIndicesFilter::new(listed, NotNull)
        .quantifier(policy)
        .named("includes_indices"))
}

/// Keeps containers with no non-null element at any listed index.
///
/// Returns an error if the list names an index twice.
pub fn excludes_indices<T: Nullable>(
    indices: impl IntoIterator<Item = usize>,
) -> Result<AllIndicesFilter<T>> {
    let policy = KeptNoMembers::new(indices)?;
    let listed = MemberOf::new(policy.members().iter().copied());
    Ok(AllIndicesFilter::new(listed, NotNull)
        .quantifier(policy)
        .named("excludes_indices"))
}

/// Keeps containers whose every position is listed.
///
/// A null element still occupies its position.
pub fn includes_only_indices<T>(indices: impl IntoIterator<Item = usize>) -> AllIndicesFilter<T> {
    AllIndicesFilter::new(MemberOf::new(indices), KeepAll)
        .quantifier(KeptAllElements)
        .named("includes_only_indices")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::Collector;
    use crate::elements::ElementsFilterExt;
    use crate::leaf::predicate;
    use std::collections::VecDeque;

    #[test]
    fn includes_indices_needs_present_values() {
        let plain = includes_indices([1, 3]).unwrap();
        assert!(plain.is_kept(&["a", "b", "c", "d"]));
        assert!(!plain.is_kept(&["a", "b", "c"]));

        let optional = includes_indices([1, 3]).unwrap();
        assert!(!optional.is_kept(&[Some("a"), None, Some("c"), Some("d")]));
    }

    #[test]
    fn includes_indices_over_a_collection() {
        let deque: VecDeque<&str> = ["a", "b", "c", "d"].into_iter().collect();
        let filter = includes_indices([0, 2]).unwrap();
        assert!(filter.is_kept(&deque));
    }

    #[test]
    fn excludes_indices_needs_absent_values() {
        let filter = excludes_indices([1]).unwrap();
        assert!(filter.is_kept(&[Some(1), None, Some(3)]));
        assert!(filter.is_kept(&[Some(1)]));
        assert!(!filter.is_kept(&[Some(1), Some(2)]));
    }

    #[test]
    fn includes_only_indices_bounds_the_length() {
        let filter = includes_only_indices([0, 1]);
        assert!(filter.is_kept(&[1, 2]));
        assert!(!filter.is_kept(&[1, 2, 3]));
        assert!(includes_only_indices([0, 1]).is_kept(&[Some(1), None]));
    }

    #[test]
    fn duplicate_indices_fail_construction() {
        assert!(includes_indices::<i32>([2, 2]).is_err());
        assert!(excludes_indices::<i32>([0, 0]).is_err());
    }

    #[test]
    fn index_qualifier_is_consulted_before_the_element() {
        let even_positions = AllIndicesFilter::new(
            predicate(|index: &usize| index % 2 == 0),
            predicate(|value: &i32| *value > 0),
        );
        assert_eq!(even_positions.qualify(1, &5), FilterState::Discarded);
        assert_eq!(even_positions.qualify(2, &5), FilterState::Kept);
        assert_eq!(even_positions.qualify(2, &-5), FilterState::Discarded);
        assert_eq!(even_positions.keepers(&[1, 2, -3, 4, 5]), vec![1, 5]);
    }

    #[test]
    fn observer_sees_elements() {
        let filter = includes_indices([0]).unwrap();
        let mut collector = Collector::both();
        filter.filter_with(&[Some('x'), None], &mut collector);
        assert_eq!(collector.kept(), &[Some('x')]);
        assert_eq!(collector.discarded(), &[None]);
    }
}
