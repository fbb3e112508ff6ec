/*!
 * Node Guards
 *
 * RAII guard over node storage with automatic release
 */

use super::traits::{Guard, GuardDrop};
use super::{GuardError, GuardResult};
use crate::memory::{BoundAllocator, MemoryResult};
use std::mem;
use std::ptr::NonNull;
use tracing::trace;

/// Scoped node storage with automatic deallocation
///
/// Holds uninitialized storage for one `N`. Dropping the guard (including
/// during a panic unwind) hands the storage back to the allocator; calling
/// [`NodeGuard::construct`] moves a value in and transfers ownership to the
/// caller instead.
///
/// # Example
///
/// ```ignore
/// let guard = NodeGuard::<Node<T>>::allocate(alloc)?;
/// let value = build()?;            // guard frees the storage on early return
/// let node = guard.construct(Node::new(value, head));
/// ```
pub struct NodeGuard<'r, N> {
    storage: NonNull<N>,
    alloc: BoundAllocator<'r>,
    active: bool,
}

impl<'r, N> NodeGuard<'r, N> {
    /// Reserve storage for one `N` through `alloc`
    pub fn allocate(alloc: BoundAllocator<'r>) -> MemoryResult<Self> {
        let storage = alloc.allocate_node::<N>()?;
        Ok(Self {
            storage,
            alloc,
            active: true,
        })
    }

    /// Take over the release of storage that already belongs to a node
    ///
    /// The guard frees the storage when dropped; destroy the value first.
    ///
    /// # Safety
    ///
    /// `storage` must come from `allocate_node::<N>` on an allocator bound to
    /// the same resource as `alloc`, and nothing else may free it.
    pub(crate) unsafe fn adopt(storage: NonNull<N>, alloc: BoundAllocator<'r>) -> Self {
        Self {
            storage,
            alloc,
            active: true,
        }
    }

    /// Raw pointer to the guarded storage
    #[inline]
    pub fn as_ptr(&self) -> NonNull<N> {
        self.storage
    }

    /// Construct `value` into the storage and take ownership of it
    ///
    /// The returned pointer must eventually be passed to
    /// [`BoundAllocator::destroy_node`] and [`BoundAllocator::deallocate_node`]
    /// on the same allocator.
    pub fn construct(mut self, value: N) -> NonNull<N> {
        // SAFETY: storage was allocated for exactly one `N` and is still uninitialized.
        unsafe { self.alloc.construct_node(self.storage, value) };
        self.active = false;
        self.storage
    }
}

impl<N> Guard for NodeGuard<'_, N> {
    fn is_active(&self) -> bool {
        self.active
    }

    fn release(&mut self) -> GuardResult<()> {
        if !self.active {
            return Err(GuardError::AlreadyReleased);
        }

        self.active = false;
        // SAFETY: storage came from this allocator and holds no live value.
        unsafe { self.alloc.deallocate_node(self.storage) };

        trace!(size = mem::size_of::<N>(), "node storage released");
        Ok(())
    }
}

impl<N> GuardDrop for NodeGuard<'_, N> {
    fn on_drop(&mut self) {
        if self.active {
            if let Err(e) = self.release() {
                tracing::error!(error = %e, "node guard drop failed");
            }
        }
    }
}

impl<N> Drop for NodeGuard<'_, N> {
    #[inline]
    fn drop(&mut self) {
        self.on_drop();
    }
}
