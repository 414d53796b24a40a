//! Michael & Scott's lock-free queue, adapted to tagged pointers instead of
//! hazard pointers or epoch reclamation for ABA safety.

use super::free_list::FreeList;
use super::node::Node;
use super::tagged_ptr::AtomicTaggedPtr;
use crate::backoff::Backoff;
use crate::cell::PerWorkerCell;
use crate::queue_trait::ConcurrentQueue;
use crate::value::{Value, SENTINEL};
use crate::worker::worker_id;
use crossbeam::utils::CachePadded;
use std::ptr;
use std::sync::atomic::{AtomicI64, Ordering};

/// Non-blocking MPMC FIFO queue.
///
/// `head` and `tail` are each a tagged `(pointer, version)` pair packed into
/// one 64-bit word ([`AtomicTaggedPtr`]), so a single CAS moves both the
/// link and its version together — the version is what makes a retired node
/// safe to reuse even though nothing here tracks in-flight readers the way
/// hazard pointers or epochs would.
pub struct LockFreeQueue {
    head: CachePadded<AtomicTaggedPtr<Node>>,
    tail: CachePadded<AtomicTaggedPtr<Node>>,
    free_lists: Vec<PerWorkerCell<FreeList>>,
    size: AtomicI64,
}

impl LockFreeQueue {
    pub fn new(num_workers: usize) -> Self {
        let dummy = Node::new_dummy();
        LockFreeQueue {
            head: CachePadded::new(AtomicTaggedPtr::new(dummy, 0)),
            tail: CachePadded::new(AtomicTaggedPtr::new(dummy, 0)),
            free_lists: (0..num_workers.max(1))
                .map(|_| PerWorkerCell::new(FreeList::new()))
                .collect(),
            size: AtomicI64::new(0),
        }
    }

    fn obtain_node(&self, value: Value) -> *mut Node {
        let id = worker_id().min(self.free_lists.len() - 1);
        let recycled = self.free_lists[id].with_mut(FreeList::pop);
        match recycled {
            Some(node) => {
                unsafe {
                    (*node).value = value;
                    (*node).next.store(ptr::null_mut(), 0, Ordering::Relaxed);
                }
                node
            }
            None => Node::new(value),
        }
    }
}

impl Default for LockFreeQueue {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ConcurrentQueue for LockFreeQueue {
    fn push(&self, value: Value) -> bool {
        let node = self.obtain_node(value);
        let mut backoff = Backoff::new();

        loop {
            let (last, last_ver) = self.tail.load(Ordering::Acquire);
            // SAFETY: `last` is always a live node; nodes are only freed
            // after being unreachable from both `head` and `tail`.
            let (next, next_ver) = unsafe { (*last).next.load(Ordering::Acquire) };

            let (last_again, last_ver_again) = self.tail.load(Ordering::Acquire);
            if last != last_again || last_ver != last_ver_again {
                backoff.reset();
                continue;
            }

            if next.is_null() {
                let linked = unsafe {
                    (*last).next.compare_and_set(
                        next,
                        next_ver,
                        node,
                        next_ver.wrapping_add(1),
                        Ordering::Release,
                        Ordering::Acquire,
                    )
                };
                if linked.is_ok() {
                    let _ = self.tail.compare_and_set(
                        last,
                        last_ver,
                        node,
                        last_ver.wrapping_add(1),
                        Ordering::Release,
                        Ordering::Relaxed,
                    );
                    self.size.fetch_add(1, Ordering::Relaxed);
                    return true;
                }
                backoff.spin();
            } else {
                // Tail lagged behind an already-linked node; help it along
                // before retrying our own link attempt.
                let _ = self.tail.compare_and_set(
                    last,
                    last_ver,
                    next,
                    last_ver.wrapping_add(1),
                    Ordering::Release,
                    Ordering::Relaxed,
                );
                backoff.spin();
            }
        }
    }

    fn pop(&self) -> Value {
        let id = worker_id().min(self.free_lists.len() - 1);
        let mut backoff = Backoff::new();

        loop {
            let (first, first_ver) = self.head.load(Ordering::Acquire);
            let (last, last_ver) = self.tail.load(Ordering::Acquire);
            // SAFETY: `first` is always a live dummy or retired-but-not-yet-
            // recycled node; only this worker can recycle it, and not until
            // after the CAS below succeeds.
            let (next, _) = unsafe { (*first).next.load(Ordering::Acquire) };

            let (first_again, first_ver_again) = self.head.load(Ordering::Acquire);
            if first != first_again || first_ver != first_ver_again {
                backoff.reset();
                continue;
            }

            if first == last {
                if next.is_null() {
                    return SENTINEL;
                }
                // Tail lagged one node behind head; help it catch up and
                // retry rather than reading a value out of a half-linked
                // queue.
                let _ = self.tail.compare_and_set(
                    last,
                    last_ver,
                    next,
                    last_ver.wrapping_add(1),
                    Ordering::Release,
                    Ordering::Relaxed,
                );
                backoff.spin();
                continue;
            }

            if next.is_null() {
                // head/tail briefly disagree about a node mid-link; retry.
                backoff.spin();
                continue;
            }

            let value = unsafe { (*next).value };

            let advanced = self.head.compare_and_set(
                first,
                first_ver,
                next,
                first_ver.wrapping_add(1),
                Ordering::Release,
                Ordering::Acquire,
            );
            if advanced.is_ok() {
                self.size.fetch_sub(1, Ordering::Relaxed);
                self.free_lists[id].with_mut(|fl| fl.push(first));
                return value;
            }
            backoff.spin();
        }
    }

    fn size(&self) -> i64 {
        self.size.load(Ordering::Relaxed).max(0)
    }
}

impl Drop for LockFreeQueue {
    fn drop(&mut self) {
        let (mut current, _) = self.head.load(Ordering::Relaxed);
        while !current.is_null() {
            let (next, _) = unsafe { (*current).next.load(Ordering::Relaxed) };
            unsafe { drop(Box::from_raw(current)) };
            current = next;
        }
        // `free_lists` drops its own recycled nodes via `FreeList::drop`.
    }
}
