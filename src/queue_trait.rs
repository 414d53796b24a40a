//! The shared capability set every queue variant implements.

use crate::value::Value;

/// FIFO queue capability shared by all four variants.
///
/// Destruction is not part of this trait: every implementation frees its
/// nodes (including those parked on per-worker free-lists) from its `Drop`
/// impl, so callers never need to invoke anything explicitly.
pub trait ConcurrentQueue: Send + Sync {
    /// Enqueue `value`. Always succeeds for every variant in this crate.
    fn push(&self, value: Value) -> bool;

    /// Dequeue the oldest value, or [`crate::value::SENTINEL`] if empty.
    fn pop(&self) -> Value;

    /// Advisory element count. Exact for the locked variants, eventually
    /// consistent for the lock-free variant.
    fn size(&self) -> i64;
}
