//! Domain-level errors

use thiserror::Error;

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Errors raised while manipulating orderings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A move referenced a position outside the collection. Programmer error.
    #[error("invalid index {index} for collection of length {len}")]
    InvalidIndex { index: usize, len: usize },

    /// An overlay did not cover the whole collection.
    #[error("partial overlay: {covered} of {expected} entries")]
    PartialOverlay { covered: usize, expected: usize },

    /// An overlay referenced an id outside the collection.
    #[error("unknown id in overlay: {0}")]
    UnknownId(String),

    /// An overlay listed the same id twice.
    #[error("duplicate id in overlay: {0}")]
    DuplicateId(String),

    /// Overlay orders are not a permutation of 0..n-1.
    #[error("overlay orders are not dense")]
    NotDense,

    #[error("not found: {0}")]
    NotFound(String),

    /// The tree has not been fetched yet.
    #[error("category tree is not loaded")]
    NotLoaded,
}
