/*!
 * Core Types
 * Common types used across the crate
 */

/// Address type for memory operations
pub type Address = usize;

/// Size type for memory operations
pub type Size = usize;

/// Alignment type for memory operations (always a power of two)
pub type Alignment = usize;

/// Address of a raw pointer, for registry lookups and diagnostics
#[inline]
pub fn address_of<T: ?Sized>(ptr: *const T) -> Address {
    ptr as *const u8 as Address
}
