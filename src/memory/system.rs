/*!
 * System Resource
 * Untracked pass-through to the system allocator
 */

use super::traits::{same_instance, MemoryResource};
use super::types::{block_layout, MemoryError, MemoryResult};
use crate::core::types::{Alignment, Size};
use std::alloc::{GlobalAlloc, System};
use std::ptr::NonNull;

/// Stateless resource forwarding to [`std::alloc::System`]
///
/// Keeps no registry and emits no events. Used as the process-wide default
/// for containers created without an explicit resource.
#[derive(Debug, Default)]
pub struct SystemResource;

static DEFAULT_RESOURCE: SystemResource = SystemResource;

/// Process-wide default resource
#[inline]
pub fn default_resource() -> &'static dyn MemoryResource {
    &DEFAULT_RESOURCE
}

impl MemoryResource for SystemResource {
    fn allocate(&self, bytes: Size, alignment: Alignment) -> MemoryResult<NonNull<u8>> {
        let layout = block_layout(bytes, alignment)?;
        // SAFETY: block_layout never produces a zero-sized layout.
        let raw = unsafe { System.alloc(layout) };
        NonNull::new(raw).ok_or(MemoryError::OutOfMemory {
            size: bytes,
            alignment,
        })
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, bytes: Size, alignment: Alignment) {
        match block_layout(bytes, alignment) {
            Ok(layout) => System.dealloc(ptr.as_ptr(), layout),
            Err(e) => tracing::error!(error = %e, "refusing to free block with invalid layout"),
        }
    }

    fn is_equal(&self, other: &dyn MemoryResource) -> bool {
        same_instance(self, other)
    }
}
