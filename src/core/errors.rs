/*!
 * Error Types
 * Centralized error re-exports
 */

// Re-export MemoryError from memory module
pub use crate::memory::{MemoryError, MemoryResult};

// Re-export StackError from collections module
pub use crate::collections::{EmplaceError, StackError, StackResult};

// Re-export GuardError from guard module
pub use super::guard::{GuardError, GuardResult};
