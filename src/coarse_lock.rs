//! Sequential queue guarded by a single mutual-exclusion primitive.

use crate::queue_trait::ConcurrentQueue;
use crate::sequential::SequentialQueue;
use crate::value::Value;
use std::sync::Mutex;

/// FIFO queue made thread-safe by taking one global lock per operation.
///
/// Every operation holds the lock for its entire duration and releases it
/// on every exit path (the `MutexGuard` drop makes this automatic even on
/// panic). With a single lock, no deadlock is possible.
pub struct CoarseLockQueue {
    inner: Mutex<SequentialQueue>,
}

impl CoarseLockQueue {
    pub fn new() -> Self {
        CoarseLockQueue {
            inner: Mutex::new(SequentialQueue::new()),
        }
    }
}

impl Default for CoarseLockQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ConcurrentQueue for CoarseLockQueue {
    fn push(&self, value: Value) -> bool {
        self.inner.lock().unwrap().push(value)
    }

    fn pop(&self) -> Value {
        self.inner.lock().unwrap().pop()
    }

    fn size(&self) -> i64 {
        self.inner.lock().unwrap().size()
    }
}
