//! A cell that is `Sync` by contract rather than by synchronization.
//!
//! Per-worker free-lists are touched by exactly one worker thread for the
//! entire lifetime of a queue, identified by its index into a `Vec`. That
//! makes the free-list itself safe to share across threads even though it
//! holds no locks, as long as every access goes through the owning worker's
//! slot. This mirrors the single-producer/single-consumer contracts used by
//! hand-rolled intrusive structures elsewhere in the lock-free world: the
//! safety obligation is documented on the unsafe `impl`, not enforced by the
//! type system.

#[cfg(loom)]
use loom::cell::UnsafeCell;
#[cfg(not(loom))]
use std::cell::UnsafeCell;

/// Wraps a `T` that is mutated only by the worker that owns its slot.
///
/// # Safety contract
///
/// Callers must never call [`PerWorkerCell::with_mut`] or
/// [`PerWorkerCell::with`] for the same slot from two threads concurrently.
/// The queue variants that use this type uphold that by indexing a
/// `Vec<PerWorkerCell<_>>` with the calling worker's own index and never
/// publishing that index to another worker.
pub(crate) struct PerWorkerCell<T>(UnsafeCell<T>);

// SAFETY: the cell itself carries no thread affinity; the safety obligation
// (no two threads touch the same slot concurrently) is on the caller, as
// documented above, not on moving/sharing the cell.
unsafe impl<T> Send for PerWorkerCell<T> {}
unsafe impl<T> Sync for PerWorkerCell<T> {}

impl<T> PerWorkerCell<T> {
    pub(crate) fn new(value: T) -> Self {
        PerWorkerCell(UnsafeCell::new(value))
    }

    /// Run `f` with exclusive access to the inner value.
    ///
    /// # Safety
    /// The caller must be the sole owner of this slot (see the type-level
    /// safety contract above); this function does not itself check that.
    #[cfg(not(loom))]
    pub(crate) fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        // SAFETY: upheld by callers per the single-owner contract.
        f(unsafe { &mut *self.0.get() })
    }

    #[cfg(loom)]
    pub(crate) fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        self.0.with_mut(|ptr| f(unsafe { &mut *ptr }))
    }
}
