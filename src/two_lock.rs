//! Fine-grained queue with a dedicated head-lock and tail-lock.

use crate::cell::PerWorkerCell;
use crate::queue_trait::ConcurrentQueue;
use crate::value::{Value, SENTINEL};
use crate::worker::worker_id;
use std::ptr;
use std::sync::atomic::{AtomicI64, AtomicPtr, Ordering};
use std::sync::Mutex;

struct Node {
    value: Value,
    next: AtomicPtr<Node>,
}

/// Per-worker LIFO of retired nodes, touched only through a
/// [`PerWorkerCell`] so no locking is needed on the free-list fast path.
struct PlainFreeList {
    top: *mut Node,
}

impl PlainFreeList {
    fn new() -> Self {
        PlainFreeList {
            top: ptr::null_mut(),
        }
    }

    fn push(&mut self, node: *mut Node) {
        // Relaxed: this field is only ever read back by the same worker via
        // `pop`, which happens-after this write program-order on one thread.
        unsafe { (*node).next.store(self.top, Ordering::Relaxed) };
        self.top = node;
    }

    fn pop(&mut self) -> Option<*mut Node> {
        if self.top.is_null() {
            return None;
        }
        let node = self.top;
        self.top = unsafe { (*node).next.load(Ordering::Relaxed) };
        Some(node)
    }
}

impl Drop for PlainFreeList {
    fn drop(&mut self) {
        while let Some(node) = self.pop() {
            unsafe { drop(Box::from_raw(node)) };
        }
    }
}

/// FIFO queue with separate head-lock and tail-lock, allowing one enqueuer
/// and one dequeuer to make progress without contending on the same lock.
///
/// `head` always points at a permanent dummy node allocated in [`Self::new`]
/// and never replaced; only `head`'s `next` pointer advances. This keeps the
/// "head is always a dummy" invariant trivially true and avoids ever having
/// to recycle the anchor itself.
pub struct TwoLockQueue {
    head: *mut Node,
    head_lock: Mutex<()>,
    tail: Mutex<*mut Node>,
    free_lists: Vec<PerWorkerCell<PlainFreeList>>,
    size: AtomicI64,
}

impl TwoLockQueue {
    pub fn new(num_workers: usize) -> Self {
        let dummy = Box::into_raw(Box::new(Node {
            value: SENTINEL,
            next: AtomicPtr::new(ptr::null_mut()),
        }));
        TwoLockQueue {
            head: dummy,
            head_lock: Mutex::new(()),
            tail: Mutex::new(dummy),
            free_lists: (0..num_workers.max(1))
                .map(|_| PerWorkerCell::new(PlainFreeList::new()))
                .collect(),
            size: AtomicI64::new(0),
        }
    }

    fn obtain_node(&self, value: Value) -> *mut Node {
        let id = worker_id().min(self.free_lists.len() - 1);
        let recycled = self.free_lists[id].with_mut(PlainFreeList::pop);
        match recycled {
            Some(node) => {
                unsafe {
                    (*node).value = value;
                    (*node).next.store(ptr::null_mut(), Ordering::Relaxed);
                }
                node
            }
            None => Box::into_raw(Box::new(Node {
                value,
                next: AtomicPtr::new(ptr::null_mut()),
            })),
        }
    }
}

impl Default for TwoLockQueue {
    fn default() -> Self {
        Self::new(1)
    }
}

// SAFETY: all mutable state reachable from multiple threads (`head.next`,
// every node's `next`) is either behind a `Mutex` or an `AtomicPtr`, and
// each worker only ever touches its own `free_lists` slot.
unsafe impl Send for TwoLockQueue {}
unsafe impl Sync for TwoLockQueue {}

impl ConcurrentQueue for TwoLockQueue {
    fn push(&self, value: Value) -> bool {
        let node = self.obtain_node(value);

        let mut tail = self.tail.lock().unwrap();
        // SAFETY: `*tail` is always a live node owned by this queue.
        unsafe { (**tail).next.store(node, Ordering::Release) };
        *tail = node;
        drop(tail);

        self.size.fetch_add(1, Ordering::Relaxed);
        true
    }

    fn pop(&self) -> Value {
        let _head_guard = self.head_lock.lock().unwrap();

        // SAFETY: `self.head` is the permanent dummy, always live.
        let current = unsafe { (*self.head).next.load(Ordering::Acquire) };
        if current.is_null() {
            return SENTINEL;
        }

        let next = unsafe { (*current).next.load(Ordering::Acquire) };
        if next.is_null() {
            // `current` may be the last node. Re-check under tail-lock too:
            // a concurrent enqueue may have linked a further node between
            // our first read of `next` and now.
            let mut tail = self.tail.lock().unwrap();
            let next_now = unsafe { (*current).next.load(Ordering::Acquire) };
            if next_now.is_null() {
                debug_assert_eq!(*tail, current);
                unsafe { (*self.head).next.store(ptr::null_mut(), Ordering::Release) };
                *tail = self.head;
            } else {
                unsafe { (*self.head).next.store(next_now, Ordering::Release) };
            }
        } else {
            unsafe { (*self.head).next.store(next, Ordering::Release) };
        }

        let value = unsafe { (*current).value };
        self.size.fetch_sub(1, Ordering::Relaxed);

        let id = worker_id().min(self.free_lists.len() - 1);
        self.free_lists[id].with_mut(|fl| fl.push(current));

        value
    }

    fn size(&self) -> i64 {
        self.size.load(Ordering::Relaxed).max(0)
    }
}

impl Drop for TwoLockQueue {
    fn drop(&mut self) {
        let mut current = self.head;
        while !current.is_null() {
            let next = unsafe { (*current).next.load(Ordering::Relaxed) };
            unsafe { drop(Box::from_raw(current)) };
            current = next;
        }
        // `free_lists` drops its own retired nodes via `PlainFreeList::drop`.
    }
}
