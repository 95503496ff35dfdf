//! Error types for relation index operations.

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors that can occur while building or updating a [`RelationIndex`](crate::qbaf::RelationIndex).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelationError {
    /// An input item could not be read as an (agent, patient) pair.
    #[error("every relation must be a pair (agent, patient); item at position {position} has {arity} element(s)")]
    InvalidInput {
        /// The position of the faulty item in the input sequence.
        position: usize,
        /// The number of elements the item holds.
        arity: usize,
    },

    /// A container could not allocate the room needed by the operation.
    #[error("container allocation failed: {0}")]
    Allocation(#[from] TryReserveError),
}

impl RelationError {
    /// Returns `true` iff this error comes from the validation of an input item.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, RelationError::InvalidInput { .. })
    }

    pub(crate) fn with_position(self, position: usize) -> Self {
        match self {
            RelationError::InvalidInput { arity, .. } => {
                RelationError::InvalidInput { position, arity }
            }
            e => e,
        }
    }
}
