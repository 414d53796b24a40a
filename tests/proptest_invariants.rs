//! Randomized interleavings of push/pop checked against the sequential
//! queue as oracle, for every concurrent queue variant, single-threaded.

use concurrent_queue_bench::sequential::SequentialQueue;
use concurrent_queue_bench::{build_queue, QueueKind};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Push(i32),
    Pop,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..10_000i32).prop_map(Op::Push),
        Just(Op::Pop),
    ]
}

fn check_against_oracle(ops: &[Op], kind: QueueKind) {
    let mut oracle = SequentialQueue::new();
    let subject = build_queue(kind, 1);

    for op in ops {
        match op {
            Op::Push(v) => {
                assert_eq!(oracle.push(*v), subject.push(*v));
            }
            Op::Pop => {
                assert_eq!(oracle.pop(), subject.pop());
            }
        }
        assert_eq!(oracle.size(), subject.size());
        assert!(subject.size() >= 0);
    }
}

proptest! {
    #[test]
    fn global_lock_matches_sequential_oracle(ops in prop::collection::vec(op_strategy(), 0..200)) {
        check_against_oracle(&ops, QueueKind::GlobalLock);
    }

    #[test]
    fn fine_lock_matches_sequential_oracle(ops in prop::collection::vec(op_strategy(), 0..200)) {
        check_against_oracle(&ops, QueueKind::FineLock);
    }

    #[test]
    fn lock_free_matches_sequential_oracle(ops in prop::collection::vec(op_strategy(), 0..200)) {
        check_against_oracle(&ops, QueueKind::LockFree);
    }

    #[test]
    fn push_then_pop_round_trips_on_empty_queue(v in any::<i32>().prop_filter("not sentinel", |v| *v != i32::MIN)) {
        for kind in [QueueKind::GlobalLock, QueueKind::FineLock, QueueKind::LockFree] {
            let q = build_queue(kind, 1);
            q.push(v);
            prop_assert_eq!(q.pop(), v);
        }
    }
}
