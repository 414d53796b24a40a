//! Tagged-pointer lock-free queue and its supporting primitives.

mod free_list;
mod node;
mod queue;
mod tagged_ptr;

pub use queue::LockFreeQueue;
