/*!
 * Tracked Resource Tests
 * Registry bookkeeping, event stream and leak release
 */

use pretty_assertions::assert_eq;
use std::rc::Rc;
use tracked_stack::{
    Collector, EventKind, MemoryError, MemoryResource, Payload, ResourceConfig, Severity, Stack,
    TrackedResource,
};

#[test]
fn test_registry_tracks_outstanding_blocks() {
    let resource = TrackedResource::new();

    let a = resource.allocate(16, 8).unwrap();
    let b = resource.allocate(32, 16).unwrap();
    let c = resource.allocate(64, 8).unwrap();
    assert_eq!(resource.outstanding_blocks(), 3);
    assert_eq!(resource.outstanding_bytes(), 112);

    unsafe { resource.deallocate(b, 32, 16) };
    assert_eq!(resource.outstanding_blocks(), 2);
    assert!(resource.is_registered(a.as_ptr()));
    assert!(!resource.is_registered(b.as_ptr()));
    assert!(resource.is_registered(c.as_ptr()));

    let mut sizes: Vec<_> = resource.blocks().iter().map(|r| r.size).collect();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![16, 64]);

    unsafe {
        resource.deallocate(a, 16, 8);
        resource.deallocate(c, 64, 8);
    }
    assert_eq!(resource.outstanding_blocks(), 0);
}

#[test]
fn test_registry_grows_past_initial_capacity() {
    let resource = TrackedResource::with_config(ResourceConfig::default().with_registry_capacity(2));

    let blocks: Vec<_> = (0..40).map(|_| resource.allocate(8, 8).unwrap()).collect();
    assert_eq!(resource.outstanding_blocks(), 40);

    for ptr in blocks {
        unsafe { resource.deallocate(ptr, 8, 8) };
    }
    assert_eq!(resource.outstanding_blocks(), 0);
}

#[test]
fn test_one_event_per_operation() {
    let collector = Rc::new(Collector::new());
    let resource = TrackedResource::new().with_collector(collector.clone());

    let ptr = resource.allocate(48, 8).unwrap();
    unsafe { resource.deallocate(ptr, 48, 8) };

    let lines = collector.lines();
    let address = ptr.as_ptr() as usize;
    assert_eq!(
        lines,
        vec![
            format!("Allocated 48 bytes at address {:#x}", address),
            format!("Deallocated 48 bytes at address {:#x}", address),
        ]
    );
    assert!(collector.events().iter().all(|e| e.resource == "tracked"));
}

#[test]
fn test_stack_events_balance_when_emptied() {
    let collector = Rc::new(Collector::new());
    let resource = TrackedResource::new().with_collector(collector.clone());

    {
        let mut stack = Stack::new_in(&resource);
        stack.try_extend(0..10).unwrap();
        stack.pop();
        stack.pop();
        stack.clear();
    }

    assert_eq!(collector.count(EventKind::Allocated), 10);
    assert_eq!(collector.count(EventKind::Deallocated), 10);
    assert_eq!(resource.outstanding_blocks(), 0);
}

#[test]
fn test_leak_law_with_shared_resource() {
    let resource = TrackedResource::new();
    let baseline = resource.allocate(8, 8).unwrap();
    let before = resource.outstanding_blocks();

    {
        let mut a = Stack::new_in(&resource);
        let mut b = Stack::new_in(&resource);
        a.try_extend([1, 2, 3]).unwrap();
        b.try_extend(["x", "y"]).unwrap();
        assert_eq!(resource.outstanding_blocks(), before + 5);
    }

    assert_eq!(resource.outstanding_blocks(), before);
    unsafe { resource.deallocate(baseline, 8, 8) };
}

#[test]
fn test_drop_releases_forgotten_nodes() {
    let collector = Rc::new(Collector::new());

    let leaked_bytes = {
        let resource = TrackedResource::new().with_collector(collector.clone());
        let mut stack = Stack::new_in(&resource);
        stack.try_extend([1u32, 2, 3]).unwrap();
        std::mem::forget(stack);

        assert_eq!(resource.outstanding_blocks(), 3);
        resource.outstanding_bytes()
    };

    let released = collector.events().last().cloned().unwrap();
    assert_eq!(released.severity, Severity::Warn);
    assert_eq!(
        released.payload,
        Payload::Released {
            leaked_blocks: 3,
            leaked_bytes,
        }
    );
}

#[test]
fn test_clean_drop_reports_zero() {
    let collector = Rc::new(Collector::new());
    drop(TrackedResource::new().with_collector(collector.clone()));

    assert_eq!(collector.count(EventKind::Released), 1);
    assert_eq!(
        collector.events()[0].payload,
        Payload::Released {
            leaked_blocks: 0,
            leaked_bytes: 0,
        }
    );
    assert_eq!(collector.events()[0].severity, Severity::Info);
}

#[test]
fn test_capacity_budget_fails_cleanly() {
    let resource = TrackedResource::with_config(ResourceConfig::bounded(100).with_label("budget"));

    let ptr = resource.allocate(60, 8).unwrap();
    match resource.allocate(60, 8) {
        Err(MemoryError::CapacityExceeded {
            requested,
            outstanding,
            capacity,
        }) => {
            assert_eq!(requested, 60);
            assert_eq!(outstanding, 60);
            assert_eq!(capacity, 100);
        }
        other => panic!("Expected CapacityExceeded, got {:?}", other),
    }

    assert_eq!(resource.stats().total_allocations, 1);
    unsafe { resource.deallocate(ptr, 60, 8) };
}

#[test]
fn test_invalid_layout_is_reported() {
    let resource = TrackedResource::new();
    assert_eq!(
        resource.allocate(8, 12),
        Err(MemoryError::InvalidLayout {
            size: 8,
            alignment: 12
        })
    );
    assert_eq!(resource.outstanding_blocks(), 0);
}

#[test]
fn test_peak_statistics() {
    let resource = TrackedResource::new();
    let a = resource.allocate(10, 1).unwrap();
    let b = resource.allocate(20, 1).unwrap();
    unsafe { resource.deallocate(a, 10, 1) };

    let stats = resource.stats();
    assert_eq!(stats.peak_blocks, 2);
    assert_eq!(stats.peak_bytes, 30);
    assert_eq!(stats.outstanding_bytes, 20);

    resource.reset_peak();
    assert_eq!(resource.stats().peak_bytes, 20);
    unsafe { resource.deallocate(b, 20, 1) };
}

#[test]
fn test_identity_comparison() {
    let a = TrackedResource::new();
    let b = TrackedResource::new();

    assert!(a.is_equal(&a));
    assert!(!a.is_equal(&b));
    assert!(!a.is_equal(tracked_stack::default_resource()));
}
