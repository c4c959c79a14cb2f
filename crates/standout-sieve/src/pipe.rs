//! Per-call wrapper around filter stream sessions.
//!
//! A [`FilterPipe`] is created fresh for every filtering call and dropped
//! when the call returns. It owns the only mutable state of the call: the
//! latest container verdict and whether its streams have short-circuited.

use std::marker::PhantomData;

use crate::error::{FilterError, Result};
use crate::state::{FilterState, StreamState};
use crate::traits::FilterStream;

/// Drives one or more [`FilterStream`] sessions for a single call.
///
/// Streams in a chained pipe see each element in order; the first one to
/// answer anything but [`StreamState::Continue`] decides for the pipe. A
/// pipe with no streams keeps every container.
///
/// # Example
///
/// ```
/// use standout_sieve::{FilterPipe, FilterState, KeptSomeElements, Quantifier};
///
/// let policy = KeptSomeElements;
/// let mut pipe = FilterPipe::new(Quantifier::<i32>::stream(&policy));
///
/// let mut state = pipe.start().unwrap();
/// assert_eq!(pipe.fed(&-1, FilterState::Discarded).unwrap(), None);
/// if let Some(verdict) = pipe.fed(&2, FilterState::Kept).unwrap() {
///     state = verdict;
/// }
/// assert!(pipe.is_short_circuited());
/// assert_eq!(pipe.end(state).unwrap(), FilterState::Kept);
/// ```
pub struct FilterPipe<T: ?Sized, S> {
    streams: Vec<S>,
    state: Option<FilterState>,
    short_circuited: bool,
    closed: bool,
    _element: PhantomData<fn(&T)>,
}

impl<T: ?Sized, S: FilterStream<T>> FilterPipe<T, S> {
    /// Creates a pipe around a single stream.
    pub fn new(stream: S) -> Self {
        Self::chain([stream])
    }

    /// Creates a pipe feeding several streams in order.
    pub fn chain(streams: impl IntoIterator<Item = S>) -> Self {
        FilterPipe {
            streams: streams.into_iter().collect(),
            state: None,
            short_circuited: false,
            closed: false,
            _element: PhantomData,
        }
    }

    /// Starts every stream and records the tentative container verdict.
    ///
    /// The last stream's start state wins; an empty pipe starts kept.
    pub fn start(&mut self) -> Result<FilterState> {
        if self.closed {
            return Err(FilterError::PipeClosed);
        }

        let mut state = FilterState::Kept;
        for stream in &mut self.streams {
            state = stream.start()?;
        }
        self.state = Some(state);
        Ok(state)
    }

    /// Feeds one element and its verdict through the streams.
    ///
    /// Returns `None` while the container is undecided, or the
    /// short-circuit verdict once any stream has decided. A stream
    /// answering [`StreamState::End`] decides with the verdict the pipe held
    /// before this element.
    pub fn fed(&mut self, element: &T, verdict: FilterState) -> Result<Option<FilterState>> {
        if self.closed {
            return Err(FilterError::PipeClosed);
        }

        let before = match self.state {
            Some(state) if self.short_circuited => return Ok(Some(state)),
            Some(state) => state,
            None => self.start()?,
        };

        if self.streams.is_empty() {
            self.short_circuited = true;
            return Ok(Some(before));
        }

        for stream in &mut self.streams {
            match stream.fed(element, verdict)? {
                StreamState::Continue => continue,
                StreamState::End => {
                    self.short_circuited = true;
                    return Ok(Some(before));
                }
                decided @ (StreamState::Kept | StreamState::Discarded) => {
                    let decided = decided.verdict().unwrap_or(before);
                    self.state = Some(decided);
                    self.short_circuited = true;
                    return Ok(Some(decided));
                }
            }
        }

        Ok(None)
    }

    /// Ends every stream in order and returns the definitive verdict.
    ///
    /// Each stream's answer becomes the `last` verdict of the next one.
    pub fn end(&mut self, last: FilterState) -> Result<FilterState> {
        if self.closed {
            return Err(FilterError::PipeClosed);
        }

        let mut state = last;
        for stream in &mut self.streams {
            state = stream.end(state)?;
        }
        self.state = Some(state);
        self.short_circuited = true;
        self.closed = true;
        Ok(state)
    }

    /// Returns `true` once no stream needs more elements.
    pub fn is_short_circuited(&self) -> bool {
        self.short_circuited
    }

    /// Returns `true` once [`end`](Self::end) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns the latest container verdict, or `None` before `start`.
    pub fn container_state(&self) -> Option<FilterState> {
        self.state
    }

    /// Returns the number of streams in the pipe.
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// Returns `true` if the pipe has no streams.
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Consumes the pipe, returning its streams.
    pub fn into_streams(self) -> Vec<S> {
        self.streams
    }
}

impl<T: ?Sized, S> std::fmt::Debug for FilterPipe<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterPipe")
            .field("streams", &self.streams.len())
            .field("state", &self.state)
            .field("short_circuited", &self.short_circuited)
            .field("closed", &self.closed)
            .finish()
    }
}
