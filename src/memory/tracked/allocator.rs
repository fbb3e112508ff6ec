/*!
 * Tracked Allocation
 * Allocation and deallocation logic with registry bookkeeping
 */

use super::TrackedResource;
use crate::core::limits::MEMORY_TRACE_TARGET;
use crate::core::types::{address_of, Alignment, Size};
use crate::memory::traits::{same_instance, MemoryResource};
use crate::memory::types::{block_layout, BlockRecord, MemoryError, MemoryResult, ResourceStats};
use crate::monitoring::{Payload, Severity};
use std::alloc::{GlobalAlloc, System};
use std::ptr::NonNull;
use tracing::{debug, error, warn};

impl MemoryResource for TrackedResource {
    /// Allocate from the system allocator and register the block
    fn allocate(&self, bytes: Size, alignment: Alignment) -> MemoryResult<NonNull<u8>> {
        let layout = block_layout(bytes, alignment)?;

        if let Some(capacity) = self.config.capacity {
            let outstanding = self.stats.get().outstanding_bytes;
            if outstanding.saturating_add(bytes) > capacity {
                warn!(
                    target: MEMORY_TRACE_TARGET,
                    label = %self.config.label,
                    requested = bytes,
                    outstanding,
                    capacity,
                    "allocation exceeds resource capacity"
                );
                return Err(MemoryError::CapacityExceeded {
                    requested: bytes,
                    outstanding,
                    capacity,
                });
            }
        }

        // SAFETY: block_layout never produces a zero-sized layout.
        let raw = unsafe { System.alloc(layout) };
        let Some(ptr) = NonNull::new(raw) else {
            error!(
                target: MEMORY_TRACE_TARGET,
                label = %self.config.label,
                size = bytes,
                alignment,
                "system allocator returned null"
            );
            return Err(MemoryError::OutOfMemory {
                size: bytes,
                alignment,
            });
        };

        let address = address_of(ptr.as_ptr());
        self.registry
            .borrow_mut()
            .insert(BlockRecord::new(address, bytes, alignment));
        self.update_stats(|stats| stats.record_allocation(bytes));

        debug!(
            target: MEMORY_TRACE_TARGET,
            label = %self.config.label,
            size = bytes,
            address = format_args!("{:#x}", address),
            alignment,
            "Allocated {} bytes at address {:#x}",
            bytes,
            address
        );
        self.emit(
            Severity::Debug,
            Payload::Allocated {
                size: bytes,
                address,
                alignment,
            },
        );

        Ok(ptr)
    }

    /// Report the block, unregister it, then return it to the system allocator
    ///
    /// Unregistered addresses are logged and left untouched. The recorded
    /// layout is authoritative when the caller's size or alignment disagree.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, bytes: Size, alignment: Alignment) {
        let address = address_of(ptr.as_ptr());

        let found = self.registry.borrow().find(address).copied();
        let Some(record) = found else {
            error!(
                target: MEMORY_TRACE_TARGET,
                label = %self.config.label,
                size = bytes,
                address = format_args!("{:#x}", address),
                "deallocate called with unregistered address"
            );
            self.emit(
                Severity::Error,
                Payload::InvalidDeallocation {
                    size: bytes,
                    address,
                },
            );
            return;
        };

        if record.size != bytes || record.alignment != alignment {
            warn!(
                target: MEMORY_TRACE_TARGET,
                label = %self.config.label,
                address = format_args!("{:#x}", address),
                recorded_size = record.size,
                recorded_alignment = record.alignment,
                size = bytes,
                alignment,
                "deallocate layout differs from recorded layout"
            );
        }

        debug!(
            target: MEMORY_TRACE_TARGET,
            label = %self.config.label,
            size = bytes,
            address = format_args!("{:#x}", address),
            alignment,
            "Deallocated {} bytes at address {:#x}",
            bytes,
            address
        );
        self.emit(
            Severity::Debug,
            Payload::Deallocated {
                size: bytes,
                address,
                alignment,
            },
        );

        // Event first, then unregister, then release
        self.registry.borrow_mut().remove(address);
        self.update_stats(|stats: &mut ResourceStats| stats.record_deallocation(record.size));

        match record.layout() {
            // SAFETY: the record proves `ptr` came from System.alloc with this layout.
            Ok(layout) => System.dealloc(ptr.as_ptr(), layout),
            Err(e) => error!(
                target: MEMORY_TRACE_TARGET,
                address = format_args!("{:#x}", address),
                error = %e,
                "cannot release block with invalid recorded layout"
            ),
        }
    }

    fn is_equal(&self, other: &dyn MemoryResource) -> bool {
        same_instance(self, other)
    }
}
