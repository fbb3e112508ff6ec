/*!
 * Collection Types
 * Error types for container operations
 */

use crate::memory::MemoryError;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use thiserror::Error;

/// Stack operation result
pub type StackResult<T> = Result<T, StackError>;

/// Stack errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum StackError {
    #[error("Stack is empty")]
    #[diagnostic(
        code(stack::empty),
        help("Check is_empty() before reading the top element.")
    )]
    Empty,

    #[error("Node allocation failed: {0}")]
    #[diagnostic(
        code(stack::allocation_failed),
        help("The bound memory resource refused the node. The stack is unchanged.")
    )]
    Allocation(#[from] MemoryError),
}

/// Failure of a fallible in-place construction
///
/// The constructor's own error is passed through unchanged. Either way the
/// stack is left exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmplaceError<E> {
    #[error("Node allocation failed: {0}")]
    Allocation(#[from] MemoryError),

    #[error("Value construction failed: {0}")]
    Construction(E),
}

impl<E> EmplaceError<E> {
    pub fn is_allocation(&self) -> bool {
        matches!(self, EmplaceError::Allocation(_))
    }

    /// The constructor's error, if construction was what failed
    pub fn into_construction(self) -> Option<E> {
        match self {
            EmplaceError::Construction(e) => Some(e),
            EmplaceError::Allocation(_) => None,
        }
    }
}

impl From<EmplaceError<Infallible>> for StackError {
    fn from(err: EmplaceError<Infallible>) -> Self {
        match err {
            EmplaceError::Allocation(e) => StackError::Allocation(e),
            EmplaceError::Construction(never) => match never {},
        }
    }
}
