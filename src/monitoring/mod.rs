/*!
 * Monitoring
 * Allocation event stream and structured tracing setup
 */

mod collector;
mod events;
mod tracer;

pub use collector::Collector;
pub use events::{Event, EventKind, Payload, Severity};
pub use tracer::init_tracing;
