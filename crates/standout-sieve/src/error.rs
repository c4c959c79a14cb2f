//! Error types for the sieve crate.
//!
//! Construction errors are returned to the caller. Everything raised while
//! a container is being filtered is absorbed by the engine and turned into
//! [`FilterState::Discarded`](crate::FilterState::Discarded).

use thiserror::Error;

/// Errors that can occur when building filters or running a filter stream.
#[derive(Debug, Error)]
pub enum FilterError {
    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// A member list names the same value twice.
    #[error("duplicate member at position {position}")]
    DuplicateMember { position: usize },

    /// Length bounds where the minimum exceeds the maximum.
    #[error("invalid length bounds: min {min} is greater than max {max}")]
    InvalidLengthBounds { min: usize, max: usize },

    /// A filter stream gave up on the current session.
    #[error("filter stream failed: {0}")]
    Stream(String),

    /// A pipe was used after its session ended.
    #[error("filter pipe used after end")]
    PipeClosed,

    /// A qualifier, stream or container iterator panicked mid-call.
    #[error("filter panicked: {0}")]
    Panicked(String),
}

/// Result type for sieve operations.
pub type Result<T> = std::result::Result<T, FilterError>;
