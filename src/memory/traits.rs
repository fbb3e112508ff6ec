/*!
 * Memory Traits
 * Resource abstraction injected into containers
 */

use super::types::MemoryResult;
use crate::core::types::{Alignment, Size};
use std::alloc::Layout;
use std::ptr::NonNull;

/// Raw storage provider
///
/// Containers hold a `&dyn MemoryResource` and route every node allocation
/// through it. Implementations are single-threaded; sharing one across
/// threads requires caller-supplied synchronization.
pub trait MemoryResource {
    /// Allocate `bytes` of storage aligned to `alignment`
    ///
    /// Never returns a dangling pointer on success.
    fn allocate(&self, bytes: Size, alignment: Alignment) -> MemoryResult<NonNull<u8>>;

    /// Return storage obtained from [`MemoryResource::allocate`]
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate` on this same resource with
    /// the same `bytes` and `alignment`, and must not have been deallocated
    /// since. The storage must not be accessed afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, bytes: Size, alignment: Alignment);

    /// Identity comparison: storage from `self` may be returned to `other`
    fn is_equal(&self, other: &dyn MemoryResource) -> bool;

    /// Allocate storage for `layout`
    fn allocate_layout(&self, layout: Layout) -> MemoryResult<NonNull<u8>> {
        self.allocate(layout.size(), layout.align())
    }

    /// Return storage obtained from [`MemoryResource::allocate_layout`]
    ///
    /// # Safety
    ///
    /// Same contract as [`MemoryResource::deallocate`].
    unsafe fn deallocate_layout(&self, ptr: NonNull<u8>, layout: Layout) {
        self.deallocate(ptr, layout.size(), layout.align())
    }
}

/// True when both references point at the same resource instance
#[inline]
pub fn same_instance(a: &dyn MemoryResource, b: &dyn MemoryResource) -> bool {
    std::ptr::eq(
        a as *const dyn MemoryResource as *const u8,
        b as *const dyn MemoryResource as *const u8,
    )
}
