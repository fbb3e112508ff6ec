/*!
 * Emplace Failure Tests
 * Strong guarantee when allocation or construction fails
 */

use pretty_assertions::assert_eq;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::ptr::NonNull;
use tracked_stack::{
    default_resource, EmplaceError, MemoryError, MemoryResource, MemoryResult, ResourceConfig,
    Stack, StackError, TrackedResource,
};

/// Resource double that forwards to the default resource and can be told
/// to refuse the next allocations
struct FlakyResource {
    remaining: Cell<Option<usize>>,
    allocations: Cell<usize>,
    deallocations: Cell<usize>,
}

impl FlakyResource {
    fn new() -> Self {
        Self {
            remaining: Cell::new(None),
            allocations: Cell::new(0),
            deallocations: Cell::new(0),
        }
    }

    /// Allow `n` more allocations, then refuse
    fn fail_after(&self, n: usize) {
        self.remaining.set(Some(n));
    }
}

impl MemoryResource for FlakyResource {
    fn allocate(&self, bytes: usize, alignment: usize) -> MemoryResult<NonNull<u8>> {
        match self.remaining.get() {
            Some(0) => {
                return Err(MemoryError::OutOfMemory {
                    size: bytes,
                    alignment,
                })
            }
            Some(n) => self.remaining.set(Some(n - 1)),
            None => {}
        }
        let ptr = default_resource().allocate(bytes, alignment)?;
        self.allocations.set(self.allocations.get() + 1);
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, bytes: usize, alignment: usize) {
        self.deallocations.set(self.deallocations.get() + 1);
        default_resource().deallocate(ptr, bytes, alignment);
    }

    fn is_equal(&self, other: &dyn MemoryResource) -> bool {
        std::ptr::eq(
            self as *const Self as *const u8,
            other as *const dyn MemoryResource as *const u8,
        )
    }
}

#[test]
fn test_allocation_failure_leaves_stack_unchanged() {
    let resource = FlakyResource::new();
    let mut stack = Stack::new_in(&resource);
    stack.try_extend([1, 2]).unwrap();
    resource.fail_after(0);

    assert_eq!(
        stack.push(3),
        Err(StackError::Allocation(MemoryError::OutOfMemory {
            size: resource_node_size(),
            alignment: std::mem::align_of::<usize>(),
        }))
    );
    assert_eq!(stack.len(), 2);
    assert!(stack.iter().copied().eq([2, 1]));
    assert_eq!(resource.allocations.get(), 2);

    drop(stack);
    assert_eq!(resource.deallocations.get(), 2);
}

fn resource_node_size() -> usize {
    // i32 payload plus the next link, padded to pointer alignment
    2 * std::mem::size_of::<usize>()
}

#[test]
fn test_constructor_not_run_when_allocation_fails() {
    let resource = FlakyResource::new();
    resource.fail_after(0);
    let mut stack: Stack<'_, String> = Stack::new_in(&resource);

    let ran = Cell::new(false);
    let result = stack.emplace_with(|| {
        ran.set(true);
        String::from("never")
    });

    assert!(result.is_err());
    assert!(!ran.get());
    assert!(stack.is_empty());
}

#[test]
fn test_construction_error_returns_storage() {
    let resource = TrackedResource::new();
    let mut stack = Stack::new_in(&resource);
    stack.push(1u8).unwrap();

    let result = stack.try_emplace(300_i32);
    match result {
        Err(EmplaceError::Construction(_)) => {}
        other => panic!("Expected construction failure, got {:?}", other.map(|v| *v)),
    }

    assert_eq!(stack.len(), 1);
    assert_eq!(stack.top(), Ok(&1));
    assert_eq!(resource.outstanding_blocks(), 1);
    assert_eq!(resource.stats().total_deallocations, 1);
}

#[test]
fn test_try_emplace_success() {
    let resource = TrackedResource::new();
    let mut stack: Stack<'_, u8> = Stack::new_in(&resource);

    let top = stack.try_emplace(200_i32).unwrap();
    *top += 1;
    assert_eq!(stack.top(), Ok(&201));
}

#[test]
fn test_panicking_constructor_returns_storage() {
    let resource = TrackedResource::new();
    let mut stack = Stack::new_in(&resource);
    stack.try_extend([String::from("a"), String::from("b")]).unwrap();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let _ = stack.emplace_with(|| -> String { panic!("constructor failed") });
    }));

    assert!(outcome.is_err());
    assert_eq!(stack.len(), 2);
    assert_eq!(stack.top().unwrap(), "b");
    assert_eq!(resource.outstanding_blocks(), 2);
}

#[test]
fn test_capacity_bounded_try_extend_stops_cleanly() {
    let node = 2 * std::mem::size_of::<usize>();
    let resource = TrackedResource::with_config(ResourceConfig::bounded(4 * node));
    let mut stack = Stack::new_in(&resource);

    let result = stack.try_extend(0..10usize);
    assert!(matches!(
        result,
        Err(StackError::Allocation(MemoryError::CapacityExceeded { .. }))
    ));
    assert_eq!(stack.len(), 4);
    assert_eq!(resource.outstanding_blocks(), 4);
}

#[test]
fn test_allocation_error_is_distinguishable() {
    let resource = FlakyResource::new();
    resource.fail_after(0);
    let mut stack: Stack<'_, u32> = Stack::new_in(&resource);

    let err = stack.try_emplace_with(|| Ok::<_, String>(1)).unwrap_err();
    assert!(err.is_allocation());
    assert_eq!(err.into_construction(), None);
}
