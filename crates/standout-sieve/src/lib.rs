//! Sieve - Keep or discard whole containers from per-element verdicts.
//!
//! Sieve judges a container (slice, collection, lazy sequence, or a single
//! bare value) by running a per-element predicate, the **qualifier**, and
//! folding the verdicts with an aggregation policy, the **quantifier**. It
//! supports:
//!
//! - Quantifiers: all, some, none, all-members, no-members, keep-all
//! - Index-aware filters that judge elements by position and value
//! - Observers that see every element verdict (e.g. to collect keepers)
//! - Boolean combinators over value filters and container filters
//! - Fail-closed evaluation: absent containers, panics and stream errors
//!   discard the container instead of reaching the caller
//!
//! # Quick Start
//!
//! ```rust
//! use standout_sieve::{every, excludes, includes, predicate, ElementsFilterExt, FilterState};
//!
//! let negative = || predicate(|n: &i32| *n < 0);
//!
//! // Quantifiers over the same qualifier
//! assert!(excludes(negative()).is_kept(&[1, 2, 3]));
//! assert!(!excludes(negative()).is_kept(&[1, -2, 3]));
//! assert!(includes(negative()).is_kept(&[1, -2, 3]));
//! assert!(every(negative()).is_kept(&Vec::<i32>::new()));
//!
//! // Observers see each element's verdict
//! let positive = includes(predicate(|n: &i32| *n > 0));
//! assert_eq!(positive.keepers(&[-3, 3, -2, 2, -1, 1, 0]), vec![3, 2, 1]);
//!
//! // Absent containers are always discarded
//! assert_eq!(positive.filter(None::<&Vec<i32>>), FilterState::Discarded);
//! ```
//!
//! # Evaluation
//!
//! Every streaming filter walks its container once:
//!
//! ```text
//! quantifier.start, observer.start
//! for each (index, element):
//!     verdict = qualifier(element)
//!     feed quantifier (unless decided), feed observer (unless decided)
//!     stop when both are decided
//! quantifier.end, observer.end  ->  container verdict
//! ```
//!
//! A quantifier decides early when it can: [`KeptAllElements`] stops at the
//! first discarded element, [`KeptSomeElements`] at the first kept one. An
//! attached observer keeps the walk going until it is satisfied too, unless
//! the filter is built with [`Traversal::QuantifierOnly`].
//!
//! # Quantifiers
//!
//! | Quantifier | Empty container | Short-circuits |
//! |------------|-----------------|----------------|
//! | [`KeptAllElements`] | kept | discarded on first discard |
//! | [`KeptSomeElements`] | discarded | kept on first keep |
//! | [`KeptNoElements`] | kept | discarded on first keep |
//! | [`KeptAllMembers`] | kept iff no members | either way |
//! | [`KeptNoMembers`] | kept | discarded on a kept member |
//! | [`KeepAllStream`] | kept | ends on first element |

mod collector;
mod composite;
mod container;
mod elements;
mod error;
mod leaf;
mod pipe;
mod quantifier;
mod state;
mod traits;

// Re-export public API
pub use collector::{Collector, Gather};
pub use composite::{And, Not, Or, Xor};
pub use container::{Container, Replay};
pub use elements::{
    every, excludes, excludes_indices, excludes_members, includes, includes_indices,
    includes_members, includes_only_indices, includes_only_members, no_nulls, AllElementsFilter,
    AllIndicesFilter, AndElements, ElementsFilter, ElementsFilterExt, LengthFilter, Nested,
    NoDuplicates, NotElements, OrElements, StringElementsFilter, Traversal, XorElements,
};
pub use error::{FilterError, Result};
pub use leaf::{predicate, DiscardAll, KeepAll, Matches, MemberOf, NotNull, Nullable, Predicate};
pub use pipe::FilterPipe;
pub use quantifier::{
    KeepAllStream, KeptAllElements, KeptAllMembers, KeptNoElements, KeptNoMembers,
    KeptSomeElements,
};
pub use state::{FilterState, StreamState};
pub use traits::{Filter, FilterStream, Quantifier};
