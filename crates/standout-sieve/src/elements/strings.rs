//! Strings filtered as containers of characters.

use super::{AllElementsFilter, ElementsFilter};
use crate::collector::Collector;
use crate::container::Container;
use crate::error::Result;
use crate::leaf::KeepAll;
use crate::state::FilterState;
use crate::traits::{Filter, FilterStream};

/// Filters a string as the container of its characters.
///
/// # Example
///
/// ```
/// use standout_sieve::{every, predicate, Filter, FilterState, StringElementsFilter};
///
/// let lowercase = StringElementsFilter::new(every(predicate(|c: &char| c.is_lowercase())));
/// assert_eq!(lowercase.filter("quiet"), FilterState::Kept);
/// assert_eq!(lowercase.filter("LoUd"), FilterState::Discarded);
/// assert_eq!(lowercase.discard_chars("LoUd"), "LU");
/// ```
pub struct StringElementsFilter {
    inner: Box<dyn ElementsFilter<char>>,
}

impl StringElementsFilter {
    pub fn new(inner: impl ElementsFilter<char> + 'static) -> Self {
        StringElementsFilter {
            inner: Box::new(inner),
        }
    }

    /// Returns the verdict on `text`, feeding `observer` every character.
    pub fn filter_with(&self, text: &str, observer: &mut dyn FilterStream<char>) -> FilterState {
        let chars: Vec<char> = text.chars().collect();
        self.inner.filter_observed(Container::Array(&chars), Some(observer))
    }

    /// Returns the characters of `text` the inner filter kept.
    pub fn keeper_chars(&self, text: &str) -> String {
        let mut collector = Collector::<char>::keepers();
        self.filter_with(text, &mut collector);
        collector.into_kept().into_iter().collect()
    }

    /// Returns the characters of `text` the inner filter discarded.
    pub fn discard_chars(&self, text: &str) -> String {
        let mut collector = Collector::<char>::discards();
        self.filter_with(text, &mut collector);
        collector.into_discarded().into_iter().collect()
    }
}

impl Default for StringElementsFilter {
    /// Keeps every string.
    fn default() -> Self {
        Self::new(AllElementsFilter::new(KeepAll))
    }
}

impl Filter<str> for StringElementsFilter {
    fn filter(&self, value: &str) -> FilterState {
        let chars: Vec<char> = value.chars().collect();
        self.inner.filter_observed(Container::Array(&chars), None)
    }

    fn try_filter(&self, value: &str) -> Result<FilterState> {
        let chars: Vec<char> = value.chars().collect();
        self.inner.try_filter_observed(Container::Array(&chars), None)
    }
}

impl Filter<String> for StringElementsFilter {
    fn filter(&self, value: &String) -> FilterState {
        Filter::<str>::filter(self, value.as_str())
    }

    fn try_filter(&self, value: &String) -> Result<FilterState> {
        Filter::<str>::try_filter(self, value.as_str())
    }
}

impl std::fmt::Debug for StringElementsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringElementsFilter")
            .field("inner", &self.inner.name())
            .finish()
    }
}
