/*!
 * Event Collector
 * In-memory sink for resource events
 */

use super::events::{Event, EventKind, Severity};
use std::cell::{Cell, RefCell};

/// Single-threaded event recorder
///
/// Attach one to a resource with `TrackedResource::with_collector` and read
/// the stream back for assertions or reports. Shared by `Rc`; not `Sync`.
#[derive(Debug, Default)]
pub struct Collector {
    events: RefCell<Vec<Event>>,
    next_sequence: Cell<u64>,
}

impl Collector {
    /// Create a new collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event, assigning its sequence number
    #[inline]
    pub fn emit(&self, mut event: Event) {
        let sequence = self.next_sequence.get();
        self.next_sequence.set(sequence + 1);
        event.sequence = sequence;
        self.events.borrow_mut().push(event);
    }

    /// Snapshot of every recorded event, oldest first
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Take every recorded event, leaving the collector empty
    pub fn drain(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Number of recorded events of `kind`
    pub fn count(&self, kind: EventKind) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.kind() == kind)
            .count()
    }

    /// Number of recorded events at or above `severity`
    pub fn count_at_least(&self, severity: Severity) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.severity >= severity)
            .count()
    }

    /// Rendered text lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.events.borrow().iter().map(ToString::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}
