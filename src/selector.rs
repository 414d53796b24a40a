//! Runtime queue-selection vocabulary.

use crate::coarse_lock::CoarseLockQueue;
use crate::lock_free::LockFreeQueue;
use crate::queue_trait::ConcurrentQueue;
use crate::sequential::SingleThreadedQueue;
use crate::two_lock::TwoLockQueue;

/// The four queue variants a collaborator can name from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueKind {
    Sequential,
    GlobalLock,
    FineLock,
    LockFree,
}

/// Builds the requested variant, boxed behind the `ConcurrentQueue` trait
/// object.
///
/// # Panics
/// Panics if `kind` is `Sequential` and `num_threads != 1`. This is a
/// precondition over the *pairing* of kind and thread count, not a property
/// of either alone, so it is not a `ConfigError`.
pub fn build_queue(kind: QueueKind, num_threads: usize) -> Box<dyn ConcurrentQueue> {
    match kind {
        QueueKind::Sequential => {
            assert_eq!(
                num_threads, 1,
                "the sequential queue may only run with num_threads == 1"
            );
            Box::new(SingleThreadedQueue::new())
        }
        QueueKind::GlobalLock => Box::new(CoarseLockQueue::new()),
        QueueKind::FineLock => Box::new(TwoLockQueue::new(num_threads)),
        QueueKind::LockFree => Box::new(LockFreeQueue::new(num_threads)),
    }
}
