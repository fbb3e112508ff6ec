/*!
 * Event System
 * Strongly-typed allocation events
 */

use crate::core::types::{Address, Alignment, Size};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Event severity for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Severity {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

/// Payload discriminant for counting and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Allocated,
    Deallocated,
    Released,
    InvalidDeallocation,
}

/// One diagnostic event emitted by a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Position in the collector's stream (assigned on emit)
    pub sequence: u64,
    /// Event severity
    pub severity: Severity,
    /// Label of the emitting resource
    pub resource: String,
    /// Event payload
    pub payload: Payload,
}

/// Event payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    Allocated {
        size: Size,
        address: Address,
        alignment: Alignment,
    },
    Deallocated {
        size: Size,
        address: Address,
        alignment: Alignment,
    },
    /// Resource dropped; any blocks still registered were freed
    Released {
        leaked_blocks: usize,
        leaked_bytes: Size,
    },
    /// Deallocation of an address the resource never handed out
    InvalidDeallocation { size: Size, address: Address },
}

impl Payload {
    #[inline]
    pub fn kind(&self) -> EventKind {
        match self {
            Payload::Allocated { .. } => EventKind::Allocated,
            Payload::Deallocated { .. } => EventKind::Deallocated,
            Payload::Released { .. } => EventKind::Released,
            Payload::InvalidDeallocation { .. } => EventKind::InvalidDeallocation,
        }
    }

    /// Block address for allocation payloads
    pub fn address(&self) -> Option<Address> {
        match self {
            Payload::Allocated { address, .. }
            | Payload::Deallocated { address, .. }
            | Payload::InvalidDeallocation { address, .. } => Some(*address),
            Payload::Released { .. } => None,
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Allocated { size, address, .. } => {
                write!(f, "Allocated {} bytes at address {:#x}", size, address)
            }
            Payload::Deallocated { size, address, .. } => {
                write!(f, "Deallocated {} bytes at address {:#x}", size, address)
            }
            Payload::Released {
                leaked_blocks,
                leaked_bytes,
            } => write!(
                f,
                "TrackedResource released {} leaked blocks ({} bytes)",
                leaked_blocks, leaked_bytes
            ),
            Payload::InvalidDeallocation { size, address } => write!(
                f,
                "Rejected deallocation of {} bytes at unregistered address {:#x}",
                size, address
            ),
        }
    }
}

impl Event {
    /// Create a new event; the sequence is filled in by the collector
    #[inline]
    pub fn new(severity: Severity, payload: Payload) -> Self {
        Self {
            sequence: 0,
            severity,
            resource: String::new(),
            payload,
        }
    }

    #[inline]
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    #[inline]
    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.payload, f)
    }
}
