/*!
 * Stack Property Tests
 * Random operation sequences checked against a Vec model
 */

use proptest::prelude::*;
use tracked_stack::{Stack, TrackedResource};

#[derive(Debug, Clone)]
enum Op {
    Push(i32),
    Pop,
    Clear,
    Clone,
    Take,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::Push),
        3 => Just(Op::Pop),
        1 => Just(Op::Clear),
        1 => Just(Op::Clone),
        1 => Just(Op::Take),
    ]
}

proptest! {
    #[test]
    fn stack_matches_vec_model(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let resource = TrackedResource::new();
        let mut stack = Stack::new_in(&resource);
        let mut model: Vec<i32> = Vec::new();

        for op in ops {
            match op {
                Op::Push(value) => {
                    stack.push(value).unwrap();
                    model.push(value);
                }
                Op::Pop => prop_assert_eq!(stack.pop(), model.pop()),
                Op::Clear => {
                    stack.clear();
                    model.clear();
                }
                Op::Clone => {
                    let copy = stack.try_clone().unwrap();
                    prop_assert!(copy.iter().eq(stack.iter()));
                    prop_assert_eq!(resource.outstanding_blocks(), 2 * model.len());
                }
                Op::Take => {
                    let moved = stack.take();
                    prop_assert!(stack.is_empty());
                    prop_assert_eq!(moved.len(), model.len());
                    stack = moved;
                }
            }

            prop_assert_eq!(stack.len(), model.len());
            prop_assert_eq!(stack.top().ok(), model.last());
            prop_assert_eq!(resource.outstanding_blocks(), model.len());
        }

        let expected: Vec<i32> = model.iter().rev().copied().collect();
        prop_assert_eq!(stack.iter().copied().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn push_then_pop_is_empty(values in prop::collection::vec(any::<u64>(), 0..128)) {
        let resource = TrackedResource::new();
        let mut stack = Stack::new_in(&resource);
        stack.try_extend(values.iter().copied()).unwrap();
        prop_assert_eq!(stack.len(), values.len());

        let popped: Vec<u64> = std::iter::from_fn(|| stack.pop()).collect();
        let reversed: Vec<u64> = values.into_iter().rev().collect();
        prop_assert_eq!(popped, reversed);
        prop_assert!(stack.is_empty());
        prop_assert_eq!(resource.outstanding_blocks(), 0);
    }

    #[test]
    fn clone_is_equal_and_independent(
        values in prop::collection::vec(any::<u32>().prop_map(|n| n.to_string()), 1..32)
    ) {
        let resource = TrackedResource::new();
        let mut original = Stack::new_in(&resource);
        original.try_extend(values.iter().cloned()).unwrap();

        let mut copy = original.clone();
        prop_assert_eq!(&copy, &original);

        copy.top_mut().unwrap().push('!');
        prop_assert_ne!(copy.top().unwrap(), original.top().unwrap());
        prop_assert_eq!(resource.outstanding_blocks(), 2 * values.len());
    }

    #[test]
    fn dropping_returns_every_block(count in 0usize..200) {
        let resource = TrackedResource::new();
        {
            let mut stack = Stack::new_in(&resource);
            stack.try_extend(0..count).unwrap();
            prop_assert_eq!(resource.outstanding_blocks(), count);
        }
        prop_assert_eq!(resource.outstanding_blocks(), 0);
        let stats = resource.stats();
        prop_assert_eq!(stats.total_allocations, count as u64);
        prop_assert_eq!(stats.total_deallocations, count as u64);
    }
}
