/*!
 * Bound Allocator
 * Binds a container to one memory resource
 */

use super::system::default_resource;
use super::traits::MemoryResource;
use super::types::MemoryResult;
use std::alloc::Layout;
use std::fmt;
use std::ptr::{self, NonNull};

/// Typed node allocation through a borrowed resource
///
/// Copying a `BoundAllocator` copies the binding, never the resource. Two
/// allocators are equal iff their resources are the same instance.
#[derive(Clone, Copy)]
pub struct BoundAllocator<'r> {
    resource: &'r dyn MemoryResource,
}

impl<'r> BoundAllocator<'r> {
    #[inline]
    pub fn new(resource: &'r dyn MemoryResource) -> Self {
        Self { resource }
    }

    #[inline]
    pub fn resource(&self) -> &'r dyn MemoryResource {
        self.resource
    }

    /// Reserve uninitialized storage for one `N`
    #[inline]
    pub fn allocate_node<N>(&self) -> MemoryResult<NonNull<N>> {
        self.resource
            .allocate_layout(Layout::new::<N>())
            .map(|ptr| ptr.cast())
    }

    /// Move `value` into storage from [`BoundAllocator::allocate_node`]
    ///
    /// # Safety
    ///
    /// `ptr` must point to allocated, uninitialized storage for an `N`.
    #[inline]
    pub unsafe fn construct_node<N>(&self, ptr: NonNull<N>, value: N) {
        ptr.as_ptr().write(value);
    }

    /// Drop the value in place, leaving the storage allocated
    ///
    /// # Safety
    ///
    /// `ptr` must point to an initialized `N` that is not used afterwards.
    #[inline]
    pub unsafe fn destroy_node<N>(&self, ptr: NonNull<N>) {
        ptr::drop_in_place(ptr.as_ptr());
    }

    /// Return node storage to the resource
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate_node::<N>` on an allocator bound to the
    /// same resource, and must hold no live value.
    #[inline]
    pub unsafe fn deallocate_node<N>(&self, ptr: NonNull<N>) {
        self.resource.deallocate_layout(ptr.cast(), Layout::new::<N>());
    }
}

impl Default for BoundAllocator<'static> {
    /// Bind to the process-wide default resource
    fn default() -> Self {
        Self::new(default_resource())
    }
}

impl PartialEq for BoundAllocator<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.resource.is_equal(other.resource)
    }
}

impl Eq for BoundAllocator<'_> {}

impl fmt::Debug for BoundAllocator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundAllocator")
            .field(
                "resource",
                &(self.resource as *const dyn MemoryResource as *const u8),
            )
            .finish()
    }
}
