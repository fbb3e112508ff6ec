/*!
 * Tracked Resource
 *
 * Memory resource that keeps a live registry of every outstanding block.
 *
 * ## Features
 *
 * - **Registry**: address, size and alignment of each block not yet returned
 * - **Diagnostics**: one event per allocate/deallocate, traced and optionally
 *   recorded by a [`Collector`]
 * - **Statistics**: outstanding, total and peak counts
 * - **Byte budget**: optional capacity; requests beyond it fail cleanly
 * - **Leak release**: blocks still registered on drop are freed and reported
 */

mod allocator;
mod registry;

use super::config::ResourceConfig;
use super::types::{BlockRecord, ResourceStats};
use crate::core::limits::MEMORY_TRACE_TARGET;
use crate::core::types::{address_of, Size};
use crate::monitoring::{Collector, Event, Payload, Severity};
use registry::Registry;
use std::alloc::{GlobalAlloc, System};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, error, warn};

/// Memory resource with allocation bookkeeping
///
/// Shared by reference between every container bound to it, and must
/// outlive them; the borrow checker enforces this through the lifetime on
/// [`BoundAllocator`](super::BoundAllocator). Interior mutability makes it
/// `!Sync`.
pub struct TrackedResource {
    registry: RefCell<Registry>,
    stats: Cell<ResourceStats>,
    config: ResourceConfig,
    collector: Option<Rc<Collector>>,
}

impl TrackedResource {
    pub fn new() -> Self {
        Self::with_config(ResourceConfig::default())
    }

    /// Create a resource from an explicit configuration
    pub fn with_config(config: ResourceConfig) -> Self {
        debug!(
            target: MEMORY_TRACE_TARGET,
            label = %config.label,
            registry_capacity = config.registry_capacity,
            capacity = ?config.capacity,
            "tracked resource created"
        );
        Self {
            registry: RefCell::new(Registry::with_capacity(config.registry_capacity)),
            stats: Cell::new(ResourceStats::default()),
            config,
            collector: None,
        }
    }

    /// Record every event into `collector`
    pub fn with_collector(mut self, collector: Rc<Collector>) -> Self {
        self.collector = Some(collector);
        self
    }

    /// Set collector after construction
    pub fn set_collector(&mut self, collector: Rc<Collector>) {
        self.collector = Some(collector);
    }

    /// Get collector reference
    pub fn collector(&self) -> Option<Rc<Collector>> {
        self.collector.clone()
    }

    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    pub fn label(&self) -> &str {
        &self.config.label
    }

    /// Number of blocks allocated and not yet deallocated
    pub fn outstanding_blocks(&self) -> usize {
        self.registry.borrow().len()
    }

    /// Bytes held by outstanding blocks (requested sizes)
    pub fn outstanding_bytes(&self) -> Size {
        self.registry.borrow().total_bytes()
    }

    /// Check if `ptr` is a block currently handed out by this resource
    pub fn is_registered<T: ?Sized>(&self, ptr: *const T) -> bool {
        self.registry.borrow().find(address_of(ptr)).is_some()
    }

    /// Requested size of the block at `ptr`, if registered
    pub fn block_size<T: ?Sized>(&self, ptr: *const T) -> Option<Size> {
        self.registry
            .borrow()
            .find(address_of(ptr))
            .map(|record| record.size)
    }

    /// Snapshot of the registry (unordered)
    pub fn blocks(&self) -> Vec<BlockRecord> {
        self.registry.borrow().snapshot()
    }

    pub fn stats(&self) -> ResourceStats {
        self.stats.get()
    }

    /// Restart peak tracking from the current outstanding values
    pub fn reset_peak(&self) {
        self.update_stats(ResourceStats::reset_peak);
    }

    fn update_stats(&self, f: impl FnOnce(&mut ResourceStats)) {
        let mut stats = self.stats.get();
        f(&mut stats);
        self.stats.set(stats);
    }

    fn emit(&self, severity: Severity, payload: Payload) {
        if let Some(ref collector) = self.collector {
            collector.emit(Event::new(severity, payload).with_resource(self.label()));
        }
    }
}

impl Default for TrackedResource {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TrackedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedResource")
            .field("label", &self.config.label)
            .field("outstanding_blocks", &self.outstanding_blocks())
            .field("stats", &self.stats.get())
            .finish()
    }
}

impl Drop for TrackedResource {
    fn drop(&mut self) {
        let leaked = self.registry.get_mut().drain();
        let leaked_blocks = leaked.len();
        let leaked_bytes: Size = leaked.iter().map(|record| record.size).sum();

        // Raw storage only: element destructors are not run
        for record in &leaked {
            match record.layout() {
                // SAFETY: every registered address came from System.alloc with this layout.
                Ok(layout) => unsafe { System.dealloc(record.address as *mut u8, layout) },
                Err(e) => error!(
                    target: MEMORY_TRACE_TARGET,
                    address = format_args!("{:#x}", record.address),
                    error = %e,
                    "cannot release leaked block"
                ),
            }
        }

        let severity = if leaked_blocks > 0 {
            warn!(
                target: MEMORY_TRACE_TARGET,
                label = %self.config.label,
                leaked_blocks,
                leaked_bytes,
                "TrackedResource released {} leaked blocks ({} bytes)",
                leaked_blocks,
                leaked_bytes
            );
            Severity::Warn
        } else {
            debug!(
                target: MEMORY_TRACE_TARGET,
                label = %self.config.label,
                "TrackedResource released 0 leaked blocks"
            );
            Severity::Info
        };

        self.emit(
            severity,
            Payload::Released {
                leaked_blocks,
                leaked_bytes,
            },
        );
    }
}
