/*!
 * Tracked Stack Library
 * Instrumented memory resource and a LIFO container built on it
 */

pub mod collections;
pub mod core;
pub mod memory;
pub mod monitoring;

// Re-exports
pub use collections::{EmplaceError, IntoIter, Iter, IterMut, Stack, StackError, StackResult};
pub use memory::{
    default_resource, BlockRecord, BoundAllocator, MemoryError, MemoryResource, MemoryResult,
    ResourceConfig, ResourceStats, SystemResource, TrackedResource,
};
pub use monitoring::{init_tracing, Collector, Event, EventKind, Payload, Severity};
