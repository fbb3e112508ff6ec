/*!
 * Memory Module
 * Tracked memory resources and the allocator binding used by containers
 */

pub mod bound;
pub mod config;
pub mod system;
pub mod traits;
pub mod tracked;
pub mod types;

// Re-export for convenience
pub use bound::BoundAllocator;
pub use config::ResourceConfig;
pub use system::{default_resource, SystemResource};
pub use traits::*;
pub use tracked::TrackedResource;
pub use types::*;
