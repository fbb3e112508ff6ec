/*!
 * Stack Node
 */

use std::ptr::NonNull;

/// Link to the next node; owned exclusively by its predecessor
pub(super) type Link<T> = Option<NonNull<Node<T>>>;

/// One element of the chain
pub(super) struct Node<T> {
    pub(super) value: T,
    pub(super) next: Link<T>,
}

impl<T> Node<T> {
    #[inline]
    pub(super) fn new(value: T, next: Link<T>) -> Self {
        Self { value, next }
    }
}
