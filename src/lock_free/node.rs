use super::tagged_ptr::AtomicTaggedPtr;
use crate::value::{Value, SENTINEL};

/// A lock-free queue node.
///
/// Aligned to a 64-byte cache line so that a producer CASing `next` and a
/// consumer reading `value` on two different nodes never fight over the
/// same cache line.
#[repr(align(64))]
pub(crate) struct Node {
    pub(crate) next: AtomicTaggedPtr<Node>,
    pub(crate) value: Value,
}

impl Node {
    pub(crate) fn new_dummy() -> *mut Node {
        Box::into_raw(Box::new(Node {
            next: AtomicTaggedPtr::new(std::ptr::null_mut(), 0),
            value: SENTINEL,
        }))
    }

    pub(crate) fn new(value: Value) -> *mut Node {
        Box::into_raw(Box::new(Node {
            next: AtomicTaggedPtr::new(std::ptr::null_mut(), 0),
            value,
        }))
    }
}
