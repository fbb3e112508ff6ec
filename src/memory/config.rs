/*!
 * Resource Configuration
 *
 * Runtime configuration for tracked resources
 */

use crate::core::limits::{DEFAULT_LABEL, DEFAULT_REGISTRY_CAPACITY, ENV_CAPACITY, ENV_LABEL};
use crate::core::types::Size;
use std::borrow::Cow;

/// Tracked resource configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceConfig {
    /// Name attached to every diagnostic event of the resource
    pub label: Cow<'static, str>,
    /// Records reserved up front in the block registry
    pub registry_capacity: usize,
    /// Byte budget for outstanding blocks (`None` = unbounded)
    pub capacity: Option<Size>,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            label: Cow::Borrowed(DEFAULT_LABEL),
            registry_capacity: DEFAULT_REGISTRY_CAPACITY,
            capacity: None,
        }
    }
}

impl ResourceConfig {
    /// Configuration with a byte budget for outstanding blocks
    pub const fn bounded(capacity: Size) -> Self {
        Self {
            label: Cow::Borrowed(DEFAULT_LABEL),
            registry_capacity: DEFAULT_REGISTRY_CAPACITY,
            capacity: Some(capacity),
        }
    }

    /// Read overrides from `TRACKED_STACK_CAPACITY` and `TRACKED_STACK_LABEL`
    ///
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(label) = std::env::var(ENV_LABEL) {
            config.label = Cow::Owned(label);
        }

        if let Ok(raw) = std::env::var(ENV_CAPACITY) {
            match raw.trim().parse::<Size>() {
                Ok(capacity) => config.capacity = Some(capacity),
                Err(e) => tracing::warn!(value = %raw, error = %e, "ignoring invalid {}", ENV_CAPACITY),
            }
        }

        config
    }

    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_registry_capacity(mut self, registry_capacity: usize) -> Self {
        self.registry_capacity = registry_capacity;
        self
    }

    pub fn with_capacity(mut self, capacity: Size) -> Self {
        self.capacity = Some(capacity);
        self
    }
}
