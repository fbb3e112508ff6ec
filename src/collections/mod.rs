/*!
 * Collections
 * Containers whose storage comes from a bound memory resource
 */

pub mod stack;
pub mod types;

// Re-export for convenience
pub use stack::{IntoIter, Iter, IterMut, Stack};
pub use types::*;
