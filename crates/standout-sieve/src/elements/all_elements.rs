//! The element-verdict filter and its named configurations.

use super::engine::{by_element, fused};
use super::{ElementsFilter, Traversal};
use crate::container::Container;
use crate::error::Result;
use crate::leaf::{MemberOf, NotNull, Nullable};
use crate::quantifier::{
    KeepAllStream, KeptAllElements, KeptAllMembers, KeptNoElements, KeptNoMembers,
    KeptSomeElements,
};
use crate::state::FilterState;
use crate::traits::{Filter, FilterStream, Quantifier};

/// Judges every element with a qualifier and folds the verdicts with a
/// quantifier.
///
/// Built without a quantifier it keeps every container, which makes it
/// useful purely as an element classifier behind an observer.
///
/// # Example
///
/// ```
/// use standout_sieve::{predicate, AllElementsFilter, ElementsFilterExt, KeptAllElements};
///
/// let all_positive =
///     AllElementsFilter::new(predicate(|n: &i32| *n > 0)).quantifier(KeptAllElements);
///
/// assert!(all_positive.is_kept(&[1, 2, 3]));
/// assert!(!all_positive.is_kept(&[1, -2, 3]));
/// assert!(!all_positive.is_kept(None::<&Vec<i32>>));
/// ```
pub struct AllElementsFilter<T> {
    name: &'static str,
    qualifier: Box<dyn Filter<T>>,
    quantifier: Box<dyn Quantifier<T>>,
    traversal: Traversal,
}

impl<T> AllElementsFilter<T> {
    /// Creates a filter that keeps every container.
    pub fn new(qualifier: impl Filter<T> + 'static) -> Self {
        AllElementsFilter {
            name: "all_elements",
            qualifier: Box::new(qualifier),
            quantifier: Box::new(KeepAllStream),
            traversal: Traversal::default(),
        }
    }

    /// Sets the quantifier.
    pub fn quantifier(mut self, quantifier: impl Quantifier<T> + 'static) -> Self {
        self.quantifier = Box::new(quantifier);
        self
    }

    /// Sets how far the container is walked when an observer is attached.
    pub fn traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }

    /// Sets the name reported in log events.
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Returns the verdict of the qualifier on one element.
    pub fn qualify(&self, element: &T) -> FilterState {
        self.qualifier.filter(element)
    }
}

impl<T> ElementsFilter<T> for AllElementsFilter<T> {
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
            by_element,
            |_, element| self.qualifier.try_filter(element),
        )
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> std::fmt::Debug for AllElementsFilter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllElementsFilter")
            .field("name", &self.name)
            .field("quantifier", &self.quantifier.name())
            .field("traversal", &self.traversal)
            .finish()
    }
}

// ============================================================================
// Named configurations
// ============================================================================

/// Keeps containers whose elements are all kept. Empty containers are kept.
pub fn every<T>(qualifier: impl Filter<T> + 'static) -> AllElementsFilter<T> {
    AllElementsFilter::new(qualifier)
        .quantifier(KeptAllElements)
        .named("every")
}

/// Keeps containers with at least one kept element.
///
/// # Example
///
/// ```
/// use standout_sieve::{includes, predicate, ElementsFilterExt};
///
/// let has_negative = includes(predicate(|n: &i32| *n < 0));
/// assert_eq!(has_negative.keepers(&[-3, 3, -2, 2, -1, 1, 0]), vec![-3, -2, -1]);
/// assert!(!has_negative.is_kept(&Vec::<i32>::new()));
/// ```
pub fn includes<T>(qualifier: impl Filter<T> + 'static) -> AllElementsFilter<T> {
    AllElementsFilter::new(qualifier)
        .quantifier(KeptSomeElements)
        .named("includes")
}

/// Keeps containers with no kept element. Empty containers are kept.
pub fn excludes<T>(qualifier: impl Filter<T> + 'static) -> AllElementsFilter<T> {
    AllElementsFilter::new(qualifier)
        .quantifier(KeptNoElements)
        .named("excludes")
}

/// Keeps containers without null elements.
pub fn no_nulls<T: Nullable>() -> AllElementsFilter<T> {
    every(NotNull).named("no_nulls")
}

/// Keeps containers holding every listed value.
///
/// Returns an error if the list names a value twice.
pub fn includes_members<T>(members: impl IntoIterator<Item = T>) -> Result<AllElementsFilter<T>>
where
    T: PartialEq + Clone + Send + Sync + 'static,
{
    let policy = KeptAllMembers::new(members)?;
    let qualifier = MemberOf::new(policy.members().iter().cloned());
    Ok(AllElementsFilter::new(qualifier)
        .quantifier(policy)
        .named("includes_members"))
}

/// Keeps containers whose elements are all listed values.
pub fn includes_only_members<T>(members: impl IntoIterator<Item = T>) -> AllElementsFilter<T>
where
    T: PartialEq + Send + Sync + 'static,
{
    every(MemberOf::new(members)).named("includes_only_members")
}

/// Keeps containers holding none of the listed values.
///
/// Returns an error if the list names a value twice.
pub fn excludes_members<T>(members: impl IntoIterator<Item = T>) -> Result<AllElementsFilter<T>>
where
    T: PartialEq + Clone + Send + Sync + 'static,
{
    let policy = KeptNoMembers::new(members)?;
    let qualifier = MemberOf::new(policy.members().iter().cloned());
    Ok(AllElementsFilter::new(qualifier)
        .quantifier(policy)
        .named("excludes_members"))
}
