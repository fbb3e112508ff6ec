/*!
 * Memory Types
 * Common types for tracked allocation
 */

use crate::core::limits::MIN_BLOCK_SIZE;
use crate::core::types::{Address, Alignment, Size};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::alloc::Layout;
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum MemoryError {
    #[error("Out of memory: system allocator refused {size} bytes (alignment {alignment})")]
    #[diagnostic(
        code(memory::out_of_memory),
        help("The system allocator could not satisfy the request. Free memory and retry.")
    )]
    OutOfMemory { size: Size, alignment: Alignment },

    #[error("Invalid layout: {size} bytes with alignment {alignment}")]
    #[diagnostic(
        code(memory::invalid_layout),
        help("Alignment must be a power of two and size rounded to it must not overflow isize.")
    )]
    InvalidLayout { size: Size, alignment: Alignment },

    #[error("Capacity exceeded: requested {requested} bytes, {outstanding} of {capacity} bytes outstanding")]
    #[diagnostic(
        code(memory::capacity_exceeded),
        help("The resource was configured with a byte budget. Release blocks or raise the capacity.")
    )]
    CapacityExceeded {
        requested: Size,
        outstanding: Size,
        capacity: Size,
    },
}

/// Build the system layout for a block of `size` bytes
///
/// Zero-sized requests map to a `MIN_BLOCK_SIZE` layout.
pub fn block_layout(size: Size, alignment: Alignment) -> MemoryResult<Layout> {
    Layout::from_size_align(size.max(MIN_BLOCK_SIZE), alignment)
        .map_err(|_| MemoryError::InvalidLayout { size, alignment })
}

/// Registry entry for one outstanding block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub address: Address,
    pub size: Size,
    pub alignment: Alignment,
}

impl BlockRecord {
    pub fn new(address: Address, size: Size, alignment: Alignment) -> Self {
        Self {
            address,
            size,
            alignment,
        }
    }

    /// Layout the block was allocated with
    pub fn layout(&self) -> MemoryResult<Layout> {
        block_layout(self.size, self.alignment)
    }
}

/// Allocation statistics for one resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceStats {
    pub outstanding_blocks: usize,
    pub outstanding_bytes: Size,
    pub total_allocations: u64,
    pub total_deallocations: u64,
    pub peak_blocks: usize,
    pub peak_bytes: Size,
}

impl ResourceStats {
    pub fn record_allocation(&mut self, size: Size) {
        self.outstanding_blocks += 1;
        self.outstanding_bytes += size;
        self.total_allocations += 1;
        if self.outstanding_blocks > self.peak_blocks {
            self.peak_blocks = self.outstanding_blocks;
        }
        if self.outstanding_bytes > self.peak_bytes {
            self.peak_bytes = self.outstanding_bytes;
        }
    }

    pub fn record_deallocation(&mut self, size: Size) {
        self.outstanding_blocks = self.outstanding_blocks.saturating_sub(1);
        self.outstanding_bytes = self.outstanding_bytes.saturating_sub(size);
        self.total_deallocations += 1;
    }

    /// Restart peak tracking from the current outstanding values
    pub fn reset_peak(&mut self) {
        self.peak_blocks = self.outstanding_blocks;
        self.peak_bytes = self.outstanding_bytes;
    }
}
