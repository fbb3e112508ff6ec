/*!
 * Guard Traits
 *
 * Core abstractions for RAII resource guards
 */

use super::GuardResult;

/// Core guard trait
///
/// A guard owns one resource until it is released, either explicitly or
/// when dropped.
pub trait Guard {
    /// Check if guard still owns its resource
    fn is_active(&self) -> bool;

    /// Manually release the resource
    ///
    /// Returns `Err` if already released
    fn release(&mut self) -> GuardResult<()>;
}

/// Guards that can be dropped with custom cleanup
pub trait GuardDrop: Guard {
    /// Perform cleanup on drop
    ///
    /// # Panics
    ///
    /// Should NOT panic. Log errors instead.
    fn on_drop(&mut self);
}
