//! Per-worker recycling of retired lock-free nodes.

use super::node::Node;
use std::sync::atomic::Ordering;

/// Unsynchronized LIFO of nodes retired by one worker.
///
/// Only ever touched through a [`crate::cell::PerWorkerCell`], so the fast
/// path (push on dequeue, pop on enqueue) takes no lock and issues no
/// atomic RMW — the version tag on the queue's own tagged pointers is what
/// makes reuse safe, not synchronization inside the free-list itself.
pub(crate) struct FreeList {
    top: *mut Node,
}

impl FreeList {
    pub(crate) fn new() -> Self {
        FreeList {
            top: std::ptr::null_mut(),
        }
    }

    pub(crate) fn push(&mut self, node: *mut Node) {
        // Relaxed: only this worker ever reads this field back, and only
        // after this same write in its own program order.
        unsafe { (*node).next.store(self.top, 0, Ordering::Relaxed) };
        self.top = node;
    }

    pub(crate) fn pop(&mut self) -> Option<*mut Node> {
        if self.top.is_null() {
            return None;
        }
        let node = self.top;
        let (next, _) = unsafe { (*node).next.load(Ordering::Relaxed) };
        self.top = next;
        Some(node)
    }
}

impl Drop for FreeList {
    fn drop(&mut self) {
        while let Some(node) = self.pop() {
            unsafe { drop(Box::from_raw(node)) };
        }
    }
}
