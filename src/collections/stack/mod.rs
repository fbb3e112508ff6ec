/*!
 * Stack
 *
 * Intrusive singly linked LIFO container over a bound memory resource.
 *
 * ## Storage
 *
 * Every node is obtained through the stack's [`BoundAllocator`], one
 * allocation per element. The stack owns the head node, each node owns its
 * successor; insertion and removal happen at the head only, so the chain
 * never branches or cycles.
 *
 * ## Guarantees
 *
 * - **Strong push/emplace**: storage is reserved before the value is built;
 *   if building fails (error or panic) the storage is released and the stack
 *   is untouched
 * - **Order-preserving copy**: clones iterate exactly like their source
 *   (see [`Stack::try_clone`])
 * - **O(1) move**: [`Stack::take`] leaves the source empty and still bound
 * - **No leaks**: dropping the stack returns every node to the resource
 */

mod copy;
mod iter;
mod node;

pub use iter::{IntoIter, Iter, IterMut};

use super::types::{EmplaceError, StackError, StackResult};
use crate::core::guard::NodeGuard;
use crate::memory::{BoundAllocator, MemoryResource};
use node::{Link, Node};
use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;
use std::mem;

/// LIFO container whose nodes live in a borrowed memory resource
///
/// # Example
///
/// ```
/// use tracked_stack::{Stack, TrackedResource};
///
/// let resource = TrackedResource::new();
/// let mut stack = Stack::new_in(&resource);
/// stack.push(10)?;
/// stack.push(20)?;
///
/// assert_eq!(stack.top()?, &20);
/// assert_eq!(resource.outstanding_blocks(), 2);
/// # Ok::<(), tracked_stack::StackError>(())
/// ```
pub struct Stack<'r, T> {
    head: Link<T>,
    len: usize,
    alloc: BoundAllocator<'r>,
    _marker: PhantomData<Box<Node<T>>>,
}

impl<T> Stack<'static, T> {
    /// Create an empty stack on the process-wide default resource
    pub fn new() -> Self {
        Self::with_allocator(BoundAllocator::default())
    }
}

impl<T> Default for Stack<'static, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r, T> Stack<'r, T> {
    /// Create an empty stack bound to `resource`
    pub fn new_in(resource: &'r dyn MemoryResource) -> Self {
        Self::with_allocator(BoundAllocator::new(resource))
    }

    /// Create an empty stack with an existing binding
    pub fn with_allocator(alloc: BoundAllocator<'r>) -> Self {
        Self {
            head: None,
            len: 0,
            alloc,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn allocator(&self) -> BoundAllocator<'r> {
        self.alloc
    }

    #[inline]
    pub fn resource(&self) -> &'r dyn MemoryResource {
        self.alloc.resource()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Push `value` as the new top
    pub fn push(&mut self, value: T) -> StackResult<()> {
        self.try_emplace_with::<Infallible, _>(|| Ok(value))?;
        Ok(())
    }

    /// Construct the new top from `args` via `T::from`
    pub fn emplace<A>(&mut self, args: A) -> StackResult<&mut T>
    where
        T: From<A>,
    {
        self.emplace_with(|| T::from(args))
    }

    /// Construct the new top with `f`
    ///
    /// `f` runs after the node storage is reserved. If it panics, the storage
    /// is returned before the panic continues.
    pub fn emplace_with<F>(&mut self, f: F) -> StackResult<&mut T>
    where
        F: FnOnce() -> T,
    {
        self.try_emplace_with::<Infallible, _>(|| Ok(f()))
            .map_err(StackError::from)
    }

    /// Construct the new top from `args` via `T::try_from`
    pub fn try_emplace<A>(&mut self, args: A) -> Result<&mut T, EmplaceError<T::Error>>
    where
        T: TryFrom<A>,
    {
        self.try_emplace_with(|| T::try_from(args))
    }

    /// Construct the new top with a fallible `f`
    ///
    /// On any failure the stack is unchanged and no storage is kept.
    pub fn try_emplace_with<E, F>(&mut self, f: F) -> Result<&mut T, EmplaceError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let guard = NodeGuard::<Node<T>>::allocate(self.alloc)?;
        let value = f().map_err(EmplaceError::Construction)?;

        let node = guard.construct(Node::new(value, self.head));
        self.head = Some(node);
        self.len += 1;

        // SAFETY: node is live and reachable only through `&mut self`.
        Ok(unsafe { &mut (*node.as_ptr()).value })
    }

    /// Push every item of `iter`, stopping at the first allocation failure
    pub fn try_extend<I>(&mut self, iter: I) -> StackResult<()>
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.push(value)?;
        }
        Ok(())
    }

    /// Remove the top and return its value; `None` when empty
    pub fn pop(&mut self) -> Option<T> {
        let node = self.unlink_head()?;
        // SAFETY: node is unlinked, so this is the only pointer to it; the
        // value is moved out before its storage is returned.
        unsafe {
            let Node { value, .. } = node.as_ptr().read();
            self.alloc.deallocate_node(node);
            Some(value)
        }
    }

    /// Top element
    pub fn top(&self) -> StackResult<&T> {
        match self.head {
            // SAFETY: head is a live node owned by this stack.
            Some(node) => Ok(unsafe { &(*node.as_ptr()).value }),
            None => Err(StackError::Empty),
        }
    }

    /// Top element, mutably
    pub fn top_mut(&mut self) -> StackResult<&mut T> {
        match self.head {
            // SAFETY: head is a live node, uniquely borrowed through `&mut self`.
            Some(node) => Ok(unsafe { &mut (*node.as_ptr()).value }),
            None => Err(StackError::Empty),
        }
    }

    /// Destroy every element, top first
    pub fn clear(&mut self) {
        while let Some(node) = self.unlink_head() {
            // SAFETY: node is unlinked; the guard frees its storage even if
            // the value's destructor panics.
            unsafe {
                let storage = NodeGuard::adopt(node, self.alloc);
                self.alloc.destroy_node(node);
                drop(storage);
            }
        }
    }

    /// Move the contents out in O(1), leaving `self` empty and still bound
    pub fn take(&mut self) -> Self {
        Self {
            head: self.head.take(),
            len: mem::take(&mut self.len),
            alloc: self.alloc,
            _marker: PhantomData,
        }
    }

    /// Move assignment: drop the current contents, then take `source`'s
    /// nodes and binding; `source` is left empty and still bound
    pub fn take_from(&mut self, source: &mut Self) {
        self.clear();
        self.alloc = source.alloc;
        self.head = source.head.take();
        self.len = mem::take(&mut source.len);
    }

    /// Cursor at the top element
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.head, self.len)
    }

    /// Same as [`Stack::iter`]
    #[inline]
    pub fn begin(&self) -> Iter<'_, T> {
        self.iter()
    }

    /// Past-the-end sentinel
    #[inline]
    pub fn end(&self) -> Iter<'_, T> {
        Iter::end()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.head, self.len)
    }

    fn unlink_head(&mut self) -> Link<T> {
        let node = self.head?;
        // SAFETY: head is a live node owned by this stack.
        self.head = unsafe { node.as_ref().next };
        self.len -= 1;
        Some(node)
    }
}

impl<T> Drop for Stack<'_, T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, 'b, T: PartialEq> PartialEq<Stack<'b, T>> for Stack<'a, T> {
    fn eq(&self, other: &Stack<'b, T>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Stack<'_, T> {}

impl<'a, 'r, T> IntoIterator for &'a Stack<'r, T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, 'r, T> IntoIterator for &'a mut Stack<'r, T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<'r, T> IntoIterator for Stack<'r, T> {
    type Item = T;
    type IntoIter = IntoIter<'r, T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}
