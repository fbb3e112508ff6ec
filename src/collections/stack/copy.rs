/*!
 * Stack Copy
 *
 * Order-preserving deep copy by double reversal.
 *
 * Walking a stack top to bottom and pushing each element onto another stack
 * reverses the order. A copy therefore runs two passes: source into a scratch
 * stack on the source's resource (reversed), then scratch into the
 * destination (restored). The scratch chain is a full second copy and is
 * freed when the copy completes, so one copy of `n` elements allocates `2n`
 * nodes, frees `n`, and transiently holds `3n` (source included).
 */

use super::Stack;
use crate::collections::types::StackResult;
use tracing::trace;

impl<'r, T: Clone> Stack<'r, T> {
    /// Deep copy bound to the same resource, iterating exactly like `self`
    pub fn try_clone(&self) -> StackResult<Self> {
        let mut copy = Stack::with_allocator(self.alloc);
        copy.copy_in_order(self)?;
        Ok(copy)
    }

    /// Copy assignment
    ///
    /// Clears `self` with its current binding, adopts `source`'s binding,
    /// then copies. If an allocation fails part-way, `self` is left empty
    /// (still bound to `source`'s resource) and the error is returned.
    pub fn try_clone_from(&mut self, source: &Self) -> StackResult<()> {
        self.clear();
        self.alloc = source.alloc;

        if let Err(e) = self.copy_in_order(source) {
            self.clear();
            return Err(e);
        }
        Ok(())
    }

    fn copy_in_order(&mut self, source: &Self) -> StackResult<()> {
        debug_assert!(self.is_empty(), "copy destination must start empty");
        if source.is_empty() {
            return Ok(());
        }

        let mut scratch = Stack::with_allocator(source.alloc);
        for value in source.iter() {
            scratch.push(value.clone())?;
        }
        for value in scratch.iter() {
            self.push(value.clone())?;
        }

        trace!(len = self.len, "stack copied through scratch chain");
        Ok(())
    }
}

impl<T: Clone> Clone for Stack<'_, T> {
    /// # Panics
    ///
    /// Panics if the resource refuses a node; use [`Stack::try_clone`] to
    /// handle that case.
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(copy) => copy,
            Err(e) => panic!("stack clone failed: {}", e),
        }
    }

    /// # Panics
    ///
    /// Panics if the resource refuses a node; use [`Stack::try_clone_from`]
    /// to handle that case.
    fn clone_from(&mut self, source: &Self) {
        if let Err(e) = self.try_clone_from(source) {
            panic!("stack clone_from failed: {}", e);
        }
    }
}
