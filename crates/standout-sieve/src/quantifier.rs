//! Quantifier policies.
//!
//! Each policy folds the per-element verdicts of one container into a
//! container verdict:
//!
//! | Policy | Start | Short-circuit | Empty container |
//! |--------|-------|---------------|-----------------|
//! | [`KeptAllElements`] | kept | discarded on first discarded | kept |
//! | [`KeptSomeElements`] | discarded | kept on first kept | discarded |
//! | [`KeptNoElements`] | kept | discarded on first kept | kept |
//! | [`KeptAllMembers`] | see type | see type | kept iff no members |
//! | [`KeptNoMembers`] | kept | discarded on a kept member | kept |
//! | [`KeepAllStream`] | kept | ends on first element | kept |
//!
//! The element-verdict policies are unit structs and carry no state at
//! all. The member policies hold their member list and open a small
//! per-call session that borrows it.

use crate::error::{FilterError, Result};
use crate::state::{FilterState, StreamState};
use crate::traits::{FilterStream, Quantifier};

/// Keeps the container iff every element is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeptAllElements;

impl<T: ?Sized> FilterStream<T> for KeptAllElements {
    fn start(&mut self) -> Result<FilterState> {
        Ok(FilterState::Kept)
    }

    fn fed(&mut self, _element: &T, verdict: FilterState) -> Result<StreamState> {
        Ok(match verdict {
            FilterState::Kept => StreamState::Continue,
            FilterState::Discarded => StreamState::Discarded,
        })
    }

    fn end(&mut self, last: FilterState) -> Result<FilterState> {
        Ok(last)
    }
}

impl<T: ?Sized> Quantifier<T> for KeptAllElements {
    fn stream(&self) -> Box<dyn FilterStream<T> + '_> {
        Box::new(*self)
    }

    fn name(&self) -> &'static str {
        "kept_all_elements"
    }
}

/// Keeps the container iff at least one element is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeptSomeElements;

impl<T: ?Sized> FilterStream<T> for KeptSomeElements {
    fn start(&mut self) -> Result<FilterState> {
        Ok(FilterState::Discarded)
    }

    fn fed(&mut self, _element: &T, verdict: FilterState) -> Result<StreamState> {
        Ok(match verdict {
            FilterState::Kept => StreamState::Kept,
            FilterState::Discarded => StreamState::Continue,
        })
    }

    fn end(&mut self, last: FilterState) -> Result<FilterState> {
        Ok(last)
    }
}

impl<T: ?Sized> Quantifier<T> for KeptSomeElements {
    fn stream(&self) -> Box<dyn FilterStream<T> + '_> {
        Box::new(*self)
    }

    fn name(&self) -> &'static str {
        "kept_some_elements"
    }
}

/// Keeps the container iff no element is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeptNoElements;

impl<T: ?Sized> FilterStream<T> for KeptNoElements {
    fn start(&mut self) -> Result<FilterState> {
        Ok(FilterState::Kept)
    }

    fn fed(&mut self, _element: &T, verdict: FilterState) -> Result<StreamState> {
        Ok(match verdict {
            FilterState::Kept => StreamState::Discarded,
            FilterState::Discarded => StreamState::Continue,
        })
    }

    fn end(&mut self, last: FilterState) -> Result<FilterState> {
        Ok(last)
    }
}

impl<T: ?Sized> Quantifier<T> for KeptNoElements {
    fn stream(&self) -> Box<dyn FilterStream<T> + '_> {
        Box::new(*self)
    }

    fn name(&self) -> &'static str {
        "kept_no_elements"
    }
}

/// Identity policy: keeps every container.
///
/// Installed when an elements filter is built without an explicit
/// quantifier. It ends the session on the first element, so without an
/// observer the engine looks at one element at most.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeepAllStream;

impl<T: ?Sized> FilterStream<T> for KeepAllStream {
    fn start(&mut self) -> Result<FilterState> {
        Ok(FilterState::Kept)
    }

    fn fed(&mut self, _element: &T, _verdict: FilterState) -> Result<StreamState> {
        Ok(StreamState::End)
    }

    fn end(&mut self, _last: FilterState) -> Result<FilterState> {
        Ok(FilterState::Kept)
    }
}

impl<T: ?Sized> Quantifier<T> for KeepAllStream {
    fn stream(&self) -> Box<dyn FilterStream<T> + '_> {
        Box::new(*self)
    }

    fn name(&self) -> &'static str {
        "keep_all"
    }
}

// ============================================================================
// Member policies
// ============================================================================

/// Rejects member lists that name a value twice.
fn distinct<M: PartialEq>(members: Vec<M>) -> Result<Vec<M>> {
    for (position, member) in members.iter().enumerate() {
        if members[..position].contains(member) {
            return Err(FilterError::DuplicateMember { position });
        }
    }
    Ok(members)
}

/// Keeps the container iff every listed member is fed with a kept verdict.
///
/// Values that are not members are ignored. A member fed with a discarded
/// verdict discards the container at once; seeing the last outstanding
/// member keeps it at once.
///
/// Index filters feed element positions here, member filters feed the
/// elements themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct KeptAllMembers<M> {
    members: Vec<M>,
}

impl<M: PartialEq> KeptAllMembers<M> {
    /// Creates the policy.
    ///
    /// Returns an error if the list names the same member twice.
    pub fn new(members: impl IntoIterator<Item = M>) -> Result<Self> {
        Ok(KeptAllMembers {
            members: distinct(members.into_iter().collect())?,
        })
    }

    /// Returns the members.
    pub fn members(&self) -> &[M] {
        &self.members
    }
}

struct AllMembersSession<'m, M> {
    members: &'m [M],
    seen: Vec<bool>,
    outstanding: usize,
    failed: bool,
}

impl<M: PartialEq> FilterStream<M> for AllMembersSession<'_, M> {
    fn start(&mut self) -> Result<FilterState> {
        Ok(FilterState::from(self.outstanding == 0))
    }

    fn fed(&mut self, element: &M, verdict: FilterState) -> Result<StreamState> {
        let Some(position) = self.members.iter().position(|m| m == element) else {
            return Ok(StreamState::Continue);
        };

        if verdict.is_discarded() {
            self.failed = true;
            return Ok(StreamState::Discarded);
        }

        if !self.seen[position] {
            self.seen[position] = true;
            self.outstanding -= 1;
        }

        if self.outstanding == 0 {
            Ok(StreamState::Kept)
        } else {
            Ok(StreamState::Continue)
        }
    }

    fn end(&mut self, _last: FilterState) -> Result<FilterState> {
        Ok(FilterState::from(!self.failed && self.outstanding == 0))
    }
}

impl<M: PartialEq + Send + Sync> Quantifier<M> for KeptAllMembers<M> {
    fn stream(&self) -> Box<dyn FilterStream<M> + '_> {
        Box::new(AllMembersSession {
            members: &self.members,
            seen: vec![false; self.members.len()],
            outstanding: self.members.len(),
            failed: false,
        })
    }

    fn name(&self) -> &'static str {
        "kept_all_members"
    }
}

/// Keeps the container unless some listed member is fed with a kept verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct KeptNoMembers<M> {
    members: Vec<M>,
}

impl<M: PartialEq> KeptNoMembers<M> {
    /// Creates the policy.
    ///
    /// Returns an error if the list names the same member twice.
    pub fn new(members: impl IntoIterator<Item = M>) -> Result<Self> {
        Ok(KeptNoMembers {
            members: distinct(members.into_iter().collect())?,
        })
    }

    /// Returns the members.
    pub fn members(&self) -> &[M] {
        &self.members
    }
}

struct NoMembersSession<'m, M> {
    members: &'m [M],
}

impl<M: PartialEq> FilterStream<M> for NoMembersSession<'_, M> {
    fn start(&mut self) -> Result<FilterState> {
        Ok(FilterState::Kept)
    }

    fn fed(&mut self, element: &M, verdict: FilterState) -> Result<StreamState> {
        if verdict.is_kept() && self.members.contains(element) {
            Ok(StreamState::Discarded)
        } else {
            Ok(StreamState::Continue)
        }
    }

    fn end(&mut self, last: FilterState) -> Result<FilterState> {
        Ok(last)
    }
}

impl<M: PartialEq + Send + Sync> Quantifier<M> for KeptNoMembers<M> {
    fn stream(&self) -> Box<dyn FilterStream<M> + '_> {
        Box::new(NoMembersSession {
            members: &self.members,
        })
    }

    fn name(&self) -> &'static str {
        "kept_no_members"
    }
}
