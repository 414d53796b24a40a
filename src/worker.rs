//! Thread-local worker identity.
//!
//! The two-lock and lock-free queues each keep one free-list per worker and
//! need to know, inside `push`/`pop`, which slot belongs to the calling
//! thread — without widening the [`crate::queue_trait::ConcurrentQueue`]
//! capability set with an explicit index parameter. [`crate::driver`] sets
//! this once per spawned worker thread, mirroring how the original
//! benchmark read its thread index straight from the parallel runtime.

use std::cell::Cell;

thread_local! {
    static WORKER_ID: Cell<Option<usize>> = const { Cell::new(None) };
}

/// Bind the calling thread to worker index `id` for the rest of its life.
pub fn set_worker_id(id: usize) {
    WORKER_ID.with(|cell| cell.set(Some(id)));
}

/// The calling thread's worker index, or `0` if it was never bound (e.g. a
/// test driving a queue directly from the main thread).
pub fn worker_id() -> usize {
    WORKER_ID.with(|cell| cell.get()).unwrap_or(0)
}
