//! Container views.
//!
//! Every filtering call starts by turning its input into a [`Container`].
//! The view records the container's shape once, at the call boundary, and
//! hands the engine one uniform iterator over the elements, whatever the
//! shape.
//!
//! | Input | View |
//! |-------|------|
//! | `&[T]`, `&[T; N]`, `&Vec<T>` | [`Container::Array`] |
//! | `&VecDeque<T>`, `&LinkedList<T>`, `&BTreeSet<T>`, `&HashSet<T>` | [`Container::Collection`] |
//! | [`Container::sequence`] over any cloneable iterator | [`Container::Sequence`] |
//! | [`Container::single`] over a bare value | [`Container::Single`] |
//! | [`Container::Absent`], `None` | [`Container::Absent`] |

use std::collections::{BTreeSet, HashSet, LinkedList, VecDeque};
use std::iter;
use std::rc::Rc;

/// A read-only view of the container being filtered.
pub enum Container<'a, T> {
    /// No container at all. Always discarded.
    Absent,
    /// Contiguous elements.
    Array(&'a [T]),
    /// A sized collection, ordered or not, with its element count.
    ///
    /// Built from the standard collections, whose own `len()` is recorded.
    Collection(Replay<'a, T>, usize),
    /// A lazy sequence of unknown length.
    Sequence(Replay<'a, T>),
    /// A bare value treated as a one-element container.
    Single(&'a T),
}

impl<'a, T> Container<'a, T> {
    /// Views a bare value as a one-element container.
    pub fn single(value: &'a T) -> Self {
        Container::Single(value)
    }

    /// Views a lazy sequence.
    ///
    /// The iterator is cloned whenever the elements are walked, so it can be
    /// filtered more than once (composite filters do this). It must be
    /// finite for any filter that needs to see every element.
    pub fn sequence<I>(elements: I) -> Self
    where
        I: Iterator<Item = &'a T> + Clone + 'a,
    {
        Container::Sequence(Replay::new(elements))
    }

    /// Views a sized collection walked through a cloneable iterator.
    ///
    /// `len` must be the number of elements `elements` yields; length
    /// filters trust it without walking.
    pub(crate) fn collection<I>(elements: I, len: usize) -> Self
    where
        I: Iterator<Item = &'a T> + Clone + 'a,
    {
        Container::Collection(Replay::new(elements), len)
    }

    /// Views an optional container, `None` being [`Container::Absent`].
    pub fn optional<C>(container: Option<C>) -> Self
    where
        C: Into<Container<'a, T>>,
    {
        container.into()
    }

    /// Returns `true` for [`Container::Absent`].
    pub fn is_absent(&self) -> bool {
        matches!(self, Container::Absent)
    }

    /// Returns the number of elements, or `None` for an absent container.
    ///
    /// A sequence is counted by walking it.
    pub fn len(&self) -> Option<usize> {
        match self {
            Container::Absent => None,
            Container::Array(slice) => Some(slice.len()),
            Container::Collection(_, len) => Some(*len),
            Container::Sequence(replay) => Some(replay.iter().count()),
            Container::Single(_) => Some(1),
        }
    }

    /// Returns `true` if the container exists and has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Walks the elements in container order.
    ///
    /// An absent container has no elements.
    pub fn elements(&self) -> Box<dyn Iterator<Item = &'a T> + 'a> {
        match *self {
            Container::Absent => Box::new(iter::empty()),
            Container::Array(slice) => Box::new(slice.iter()),
            Container::Collection(ref replay, _) | Container::Sequence(ref replay) => replay.iter(),
            Container::Single(value) => Box::new(iter::once(value)),
        }
    }

    /// Returns the shape name used in log events.
    pub fn shape(&self) -> &'static str {
        match self {
            Container::Absent => "absent",
            Container::Array(_) => "array",
            Container::Collection(..) => "collection",
            Container::Sequence(_) => "sequence",
            Container::Single(_) => "single",
        }
    }
}

impl<T> Clone for Container<'_, T> {
    fn clone(&self) -> Self {
        match *self {
            Container::Absent => Container::Absent,
            Container::Array(slice) => Container::Array(slice),
            Container::Collection(ref replay, len) => Container::Collection(replay.clone(), len),
            Container::Sequence(ref replay) => Container::Sequence(replay.clone()),
            Container::Single(value) => Container::Single(value),
        }
    }
}

impl<T> std::fmt::Debug for Container<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.len() {
            Some(len) => write!(f, "Container::{}({} elements)", self.shape(), len),
            None => write!(f, "Container::{}", self.shape()),
        }
    }
}

/// Something that can start a fresh walk over borrowed elements.
trait Source<'a, T: 'a> {
    fn walk(&self) -> Box<dyn Iterator<Item = &'a T> + 'a>;
}

impl<'a, T: 'a, I> Source<'a, T> for I
where
    I: Iterator<Item = &'a T> + Clone + 'a,
{
    fn walk(&self) -> Box<dyn Iterator<Item = &'a T> + 'a> {
        Box::new(self.clone())
    }
}

/// A re-walkable element source backing collections and sequences.
pub struct Replay<'a, T: 'a> {
    source: Rc<dyn Source<'a, T> + 'a>,
}

impl<'a, T> Replay<'a, T> {
    fn new<I>(elements: I) -> Self
    where
        I: Iterator<Item = &'a T> + Clone + 'a,
    {
        Replay {
            source: Rc::new(elements),
        }
    }

    /// Starts a new walk from the first element.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &'a T> + 'a> {
        self.source.walk()
    }
}

impl<T> Clone for Replay<'_, T> {
    fn clone(&self) -> Self {
        Replay {
            source: Rc::clone(&self.source),
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl<'a, T> From<&'a [T]> for Container<'a, T> {
    fn from(slice: &'a [T]) -> Self {
        Container::Array(slice)
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for Container<'a, T> {
    fn from(array: &'a [T; N]) -> Self {
        Container::Array(array.as_slice())
    }
}

impl<'a, T> From<&'a Vec<T>> for Container<'a, T> {
    fn from(vec: &'a Vec<T>) -> Self {
        Container::Array(vec.as_slice())
    }
}

impl<'a, T, C> From<Option<C>> for Container<'a, T>
where
    C: Into<Container<'a, T>>,
{
    fn from(container: Option<C>) -> Self {
        container.map_or(Container::Absent, Into::into)
    }
}

impl<'a, T> From<&'a VecDeque<T>> for Container<'a, T> {
    fn from(deque: &'a VecDeque<T>) -> Self {
        Container::collection(deque.iter(), deque.len())
    }
}

impl<'a, T> From<&'a LinkedList<T>> for Container<'a, T> {
    fn from(list: &'a LinkedList<T>) -> Self {
        Container::collection(list.iter(), list.len())
    }
}

impl<'a, T> From<&'a BTreeSet<T>> for Container<'a, T> {
    fn from(set: &'a BTreeSet<T>) -> Self {
        Container::collection(set.iter(), set.len())
    }
}

impl<'a, T, S> From<&'a HashSet<T, S>> for Container<'a, T> {
    fn from(set: &'a HashSet<T, S>) -> Self {
        Container::collection(set.iter(), set.len())
    }
}
