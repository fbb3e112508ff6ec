/*!
 * Limits and Constants
 *
 * Centralized location for crate-wide limits, defaults and magic numbers.
 */

// =============================================================================
// REGISTRY LIMITS
// =============================================================================

/// Initial block registry capacity (16 records)
/// The registry grows by doubling once this fills up
pub const DEFAULT_REGISTRY_CAPACITY: usize = 16;

/// Smallest block handed to the system allocator (1 byte)
/// Zero-sized requests are rounded up to this; `GlobalAlloc` forbids zero-sized layouts
pub const MIN_BLOCK_SIZE: usize = 1;

// =============================================================================
// DIAGNOSTICS
// =============================================================================

/// Label used by resources created without an explicit configuration
pub const DEFAULT_LABEL: &str = "tracked";

/// Tracing target for allocation events
pub const MEMORY_TRACE_TARGET: &str = "tracked_stack::memory";

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Byte budget for resources built with `ResourceConfig::from_env`
pub const ENV_CAPACITY: &str = "TRACKED_STACK_CAPACITY";

/// Label for resources built with `ResourceConfig::from_env`
pub const ENV_LABEL: &str = "TRACKED_STACK_LABEL";

/// Switches `init_tracing` to JSON output when set to `1` or `true`
pub const ENV_TRACE_JSON: &str = "TRACKED_STACK_TRACE_JSON";
