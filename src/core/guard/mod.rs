/*!
 * RAII Resource Guards
 *
 * Scoped ownership of raw storage with automatic rollback.
 *
 * ## Guard Types
 *
 * - **NodeGuard**: raw node storage reserved from a bound allocator; freed on
 *   drop unless a value is constructed into it
 *
 * ## Example
 *
 * ```ignore
 * let guard = NodeGuard::<Node<T>>::allocate(alloc)?;
 * let value = make_value()?;        // early return frees the storage
 * let ptr = guard.construct(node);  // ownership moves to the caller
 * ```
 */

mod node;
mod traits;

pub use node::NodeGuard;
pub use traits::{Guard, GuardDrop};

/// Result type for guard operations
pub type GuardResult<T> = Result<T, GuardError>;

/// Errors that can occur during guard operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
    #[error("Resource already released")]
    AlreadyReleased,
}
