/*!
 * Stack Iterators
 *
 * Forward cursors over the live chain, top to bottom
 */

use super::node::{Link, Node};
use super::Stack;
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// Forward cursor over shared elements
///
/// Besides [`Iterator`], exposes the cursor protocol: [`Iter::get`]
/// dereferences, [`Iter::advance`] steps, and `==` compares node identity,
/// so `stack.begin()` advanced `len` times equals `stack.end()`. The borrow
/// on the stack rules out mutation while a cursor is alive.
pub struct Iter<'a, T> {
    current: Link<T>,
    remaining: usize,
    _marker: PhantomData<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    #[inline]
    pub(super) fn new(head: Link<T>, len: usize) -> Self {
        Self {
            current: head,
            remaining: len,
            _marker: PhantomData,
        }
    }

    /// Past-the-end sentinel
    #[inline]
    pub(super) fn end() -> Self {
        Self::new(None, 0)
    }

    /// Element under the cursor; `None` at the end
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        // SAFETY: nodes stay alive and unmodified for 'a (shared borrow of the stack).
        self.current.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Step to the next node; no-op at the end
    #[inline]
    pub fn advance(&mut self) {
        if let Some(node) = self.current {
            // SAFETY: see `get`.
            self.current = unsafe { node.as_ref().next };
            self.remaining -= 1;
        }
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.get()?;
        self.advance();
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            current: self.current,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

impl<T> PartialEq for Iter<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current
    }
}

impl<T> Eq for Iter<'_, T> {}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("current", &self.current)
            .field("remaining", &self.remaining)
            .finish()
    }
}

/// Forward iterator over mutable elements
pub struct IterMut<'a, T> {
    current: Link<T>,
    remaining: usize,
    _marker: PhantomData<&'a mut Node<T>>,
}

impl<'a, T> IterMut<'a, T> {
    #[inline]
    pub(super) fn new(head: Link<T>, len: usize) -> Self {
        Self {
            current: head,
            remaining: len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current?;
        // SAFETY: the stack is uniquely borrowed for 'a and each node is
        // yielded at most once.
        unsafe {
            self.current = node.as_ref().next;
            self.remaining -= 1;
            Some(&mut (*node.as_ptr()).value)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator; pops from the top
pub struct IntoIter<'r, T> {
    stack: Stack<'r, T>,
}

impl<'r, T> IntoIter<'r, T> {
    #[inline]
    pub(super) fn new(stack: Stack<'r, T>) -> Self {
        Self { stack }
    }
}

impl<T> Iterator for IntoIter<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.stack.pop()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), Some(self.stack.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<'_, T> {}

impl<T> FusedIterator for IntoIter<'_, T> {}
