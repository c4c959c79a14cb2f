//! Verdict types.
//!
//! [`FilterState`] is the verdict a caller sees. [`StreamState`] is what a
//! [`FilterStream`](crate::FilterStream) answers for each element it is fed;
//! its two extra values never leave the engine.

/// The verdict on a value or a whole container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterState {
    /// The value passes the filter.
    Kept,
    /// The value is filtered out.
    Discarded,
}

impl FilterState {
    /// Returns `true` if this is [`FilterState::Kept`].
    pub fn is_kept(self) -> bool {
        matches!(self, FilterState::Kept)
    }

    /// Returns `true` if this is [`FilterState::Discarded`].
    pub fn is_discarded(self) -> bool {
        matches!(self, FilterState::Discarded)
    }

    /// Returns the opposite verdict.
    pub fn negate(self) -> FilterState {
        match self {
            FilterState::Kept => FilterState::Discarded,
            FilterState::Discarded => FilterState::Kept,
        }
    }

    /// Returns the display name of this state.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterState::Kept => "kept",
            FilterState::Discarded => "discarded",
        }
    }
}

impl From<bool> for FilterState {
    fn from(kept: bool) -> Self {
        if kept {
            FilterState::Kept
        } else {
            FilterState::Discarded
        }
    }
}

impl std::fmt::Display for FilterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stream's answer after being fed one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamState {
    /// Undecided: keep feeding elements.
    Continue,
    /// Stop, keeping whatever the container state was before this element.
    End,
    /// Short-circuit: the container is kept.
    Kept,
    /// Short-circuit: the container is discarded.
    Discarded,
}

impl StreamState {
    /// Returns the short-circuit verdict, if this is one.
    ///
    /// `Continue` and `End` carry no verdict of their own.
    pub fn verdict(self) -> Option<FilterState> {
        match self {
            StreamState::Kept => Some(FilterState::Kept),
            StreamState::Discarded => Some(FilterState::Discarded),
            StreamState::Continue | StreamState::End => None,
        }
    }

    /// Returns `true` unless this is [`StreamState::Continue`].
    pub fn is_short_circuit(self) -> bool {
        !matches!(self, StreamState::Continue)
    }
}

impl From<FilterState> for StreamState {
    fn from(state: FilterState) -> Self {
        match state {
            FilterState::Kept => StreamState::Kept,
            FilterState::Discarded => StreamState::Discarded,
        }
    }
}
